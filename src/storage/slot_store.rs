use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::models::{Booking, BookingRecord, Schedule};
use crate::utils::logging::log_store_error;

/// Result of a check-on-write booking attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome {
    /// The slot was free and the booking is now on disk.
    Booked(Booking),
    /// The slot already holds this record; nothing was written.
    AlreadyBooked(BookingRecord),
}

/// Single-file JSON store of all bookings.
///
/// Every read goes to disk; there is no in-memory mirror. Writers inside this
/// process are serialized, but nothing guards the file against another process
/// doing its own load/modify/save, in which case the last save wins.
#[derive(Clone)]
pub struct SlotStore {
    path: Arc<PathBuf>,
    write_lock: Arc<Mutex<()>>,
}

impl SlotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates the directory holding the store file.
    pub async fn init(&self) -> Result<()> {
        if let Some(parent) = self.parent_dir() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        Ok(())
    }

    /// Reads the whole schedule. A missing or unparsable file is an empty schedule.
    pub async fn load(&self) -> Schedule {
        self.read().await.0
    }

    /// Second value is true when the file exists but could not be parsed.
    async fn read(&self) -> (Schedule, bool) {
        let raw = match fs::read(self.path.as_path()).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Store file {} not found, starting empty", self.path.display());
                return (Schedule::new(), false);
            }
            Err(e) => {
                log_store_error("read", &self.path.display().to_string(), &e.to_string());
                return (Schedule::new(), false);
            }
        };

        match serde_json::from_slice(&raw) {
            Ok(schedule) => (schedule, false),
            Err(e) => {
                warn!(
                    "Store file {} is not valid booking JSON, treating it as empty: {}",
                    self.path.display(),
                    e
                );
                (Schedule::new(), true)
            }
        }
    }

    /// Overwrites the file with `schedule`.
    pub async fn save(&self, schedule: &Schedule) -> Result<()> {
        self.init().await?;

        let json = serde_json::to_vec_pretty(schedule).context("Failed to serialize schedule")?;

        // Write beside the target and rename so readers never see a torn file.
        let tmp = self.temp_path();
        fs::write(&tmp, json)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, self.path.as_path())
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        debug!("Saved {} day(s) to {}", schedule.len(), self.path.display());
        Ok(())
    }

    /// Reloads the file, rejects the booking if its slot is present, otherwise
    /// inserts and saves. An unparsable file is copied to `<path>.bak` first.
    pub async fn book(&self, booking: Booking) -> Result<BookingOutcome> {
        let _guard = self.write_lock.lock().await;

        let (mut schedule, unreadable) = self.read().await;
        if unreadable {
            let backup = self.sibling_path("bak");
            fs::copy(self.path.as_path(), &backup)
                .await
                .with_context(|| format!("Failed to back up {}", self.path.display()))?;
            warn!(
                "Backed up unreadable store file {} to {}",
                self.path.display(),
                backup.display()
            );
        }
        if let Some(existing) = schedule
            .get(&booking.date)
            .and_then(|day| day.get(&booking.time))
        {
            return Ok(BookingOutcome::AlreadyBooked(existing.clone()));
        }

        schedule
            .entry(booking.date)
            .or_default()
            .insert(booking.time.clone(), booking.record());
        self.save(&schedule).await?;

        info!(
            "Stored booking {} {} ({}) for user {}",
            booking.date, booking.time, booking.language, booking.user_id
        );
        Ok(BookingOutcome::Booked(booking))
    }

    pub async fn lookup(&self, date: NaiveDate, time: &str) -> Option<BookingRecord> {
        self.load()
            .await
            .get(&date)
            .and_then(|day| day.get(time))
            .cloned()
    }

    /// Number of stored bookings across all days.
    pub async fn count(&self) -> usize {
        self.load().await.values().map(|day| day.len()).sum()
    }

    /// True when the directory holding the store file exists.
    pub async fn is_ready(&self) -> bool {
        let dir = self.parent_dir().unwrap_or(Path::new("."));
        fs::metadata(dir).await.map(|m| m.is_dir()).unwrap_or(false)
    }

    fn parent_dir(&self) -> Option<&Path> {
        self.path.parent().filter(|p| !p.as_os_str().is_empty())
    }

    fn temp_path(&self) -> PathBuf {
        self.sibling_path("tmp")
    }

    fn sibling_path(&self, extension: &str) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Language;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> SlotStore {
        SlotStore::new(dir.path().join("appointments.json"))
    }

    fn booking(time: &str, language: Language, user_id: i64) -> Booking {
        Booking {
            date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
            time: time.to_string(),
            language,
            user_id,
            username: None,
        }
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load().await.is_empty());
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_garbage_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();
        assert!(store.load().await.is_empty());

        std::fs::write(store.path(), "").unwrap();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_book_then_reject_same_slot() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let first = store.book(booking("14:00", Language::En, 1)).await.unwrap();
        assert!(matches!(first, BookingOutcome::Booked(_)));

        let second = store.book(booking("14:00", Language::Ru, 2)).await.unwrap();
        match second {
            BookingOutcome::AlreadyBooked(existing) => {
                assert_eq!(existing.language, Language::En);
                assert_eq!(existing.user_id, 1);
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = SlotStore::new(dir.path().join("data/nested/appointments.json"));
        store.book(booking("12:00", Language::Ka, 7)).await.unwrap();
        assert!(store.path().exists());
        assert!(!store.temp_path().exists());
        assert!(store.is_ready().await);
    }

    #[tokio::test]
    async fn test_init_makes_fresh_nested_path_ready() {
        let dir = TempDir::new().unwrap();
        let store = SlotStore::new(dir.path().join("data/appointments.json"));
        assert!(!store.is_ready().await);

        store.init().await.unwrap();
        assert!(store.is_ready().await);
        assert!(!store.path().exists());

        // Idempotent on restart
        store.init().await.unwrap();
        assert!(store.is_ready().await);
    }

    #[tokio::test]
    async fn test_unreadable_file_is_backed_up_before_overwrite() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        store.book(booking("13:00", Language::En, 3)).await.unwrap();

        let backup = std::fs::read_to_string(store.sibling_path("bak")).unwrap();
        assert_eq!(backup, "{ not json");
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn test_readable_file_is_not_backed_up() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.book(booking("13:00", Language::En, 3)).await.unwrap();
        store.book(booking("14:00", Language::En, 4)).await.unwrap();
        assert!(!store.sibling_path("bak").exists());
    }

    #[tokio::test]
    async fn test_file_layout_is_date_time_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut b = booking("15:00", Language::En, 5);
        b.username = Some("bob".to_string());
        store.book(b).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["2026-10-18"]["15:00"]["language"], "en");
        assert_eq!(value["2026-10-18"]["15:00"]["user_id"], 5);
        assert_eq!(value["2026-10-18"]["15:00"]["username"], "bob");
    }
}
