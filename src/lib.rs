//! # Appointment Bot
//!
//! A Telegram bot that books language-service appointments.
//!
//! ## Features
//! - Guided booking dialogue: service language, date, time slot
//! - Taken slots shown but not selectable, re-checked on confirmation
//! - Bookings kept in a single JSON file
//! - Administrator notified about every new booking
//! - Long polling or webhook transport, plus health endpoints

/// Telegram handlers, dialogue state machine and webhook
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Message templates for every supported language
pub mod i18n;
/// Availability, notification and health services
pub mod services;
/// Booking models and the JSON slot store
pub mod storage;
/// Utility functions for datetime, validation, and logging
pub mod utils;
