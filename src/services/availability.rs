use chrono::{Days, NaiveDate, NaiveTime};

use crate::i18n::Language;
use crate::storage::SlotStore;
use crate::utils::datetime::format_slot;

/// Fixed daily schedule of bookable start times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    start_hour: u32,
    end_hour: u32,
    step_minutes: u32,
}

impl SlotCatalog {
    /// Slots from `start_hour` up to, not including, `end_hour`.
    pub fn new(start_hour: u32, end_hour: u32, step_minutes: u32) -> Self {
        Self {
            start_hour,
            end_hour: end_hour.min(24),
            step_minutes: step_minutes.max(1),
        }
    }

    /// Ordered "HH:MM" labels. Every day shares the same catalog.
    pub fn slots_for(&self, _date: NaiveDate) -> Vec<String> {
        let start = self.start_hour * 60;
        let end = self.end_hour * 60;

        (start..end)
            .step_by(self.step_minutes as usize)
            .filter_map(|minute| NaiveTime::from_hms_opt(minute / 60, minute % 60, 0))
            .map(format_slot)
            .collect()
    }
}

impl Default for SlotCatalog {
    fn default() -> Self {
        Self::new(12, 22, 60)
    }
}

/// One row of the time menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotStatus {
    pub time: String,
    pub booked_by: Option<Language>,
}

impl SlotStatus {
    pub fn is_free(&self) -> bool {
        self.booked_by.is_none()
    }
}

/// Answers which dates and slots are open, reading bookings from the store.
#[derive(Clone)]
pub struct Availability {
    store: SlotStore,
    catalog: SlotCatalog,
    booking_days: u32,
}

impl Availability {
    pub fn new(store: SlotStore, catalog: SlotCatalog, booking_days: u32) -> Self {
        Self {
            store,
            catalog,
            booking_days,
        }
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    pub fn slots_for(&self, date: NaiveDate) -> Vec<String> {
        self.catalog.slots_for(date)
    }

    pub async fn is_taken(&self, date: NaiveDate, time: &str) -> bool {
        self.store
            .load()
            .await
            .get(&date)
            .is_some_and(|day| day.contains_key(time))
    }

    /// Every catalog slot of `date` together with who holds it.
    pub async fn day(&self, date: NaiveDate) -> Vec<SlotStatus> {
        let schedule = self.store.load().await;
        let taken = schedule.get(&date);

        self.catalog
            .slots_for(date)
            .into_iter()
            .map(|time| {
                let booked_by = taken
                    .and_then(|day| day.get(&time))
                    .map(|record| record.language);
                SlotStatus { time, booked_by }
            })
            .collect()
    }

    /// Dates offered for booking, starting with `today`.
    pub fn booking_days(&self, today: NaiveDate) -> Vec<NaiveDate> {
        (0..self.booking_days)
            .filter_map(|offset| today.checked_add_days(Days::new(u64::from(offset))))
            .collect()
    }

    /// Whether `date` is on the date menu built for `today`.
    pub fn offers(&self, today: NaiveDate, date: NaiveDate) -> bool {
        self.booking_days(today).contains(&date)
    }

    /// Whether `time` is a catalog slot label.
    pub fn contains(&self, date: NaiveDate, time: &str) -> bool {
        self.catalog.slots_for(date).iter().any(|slot| slot == time)
    }
}
