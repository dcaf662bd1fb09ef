use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::time::{format_minute, format_timestamp};

use super::time_slot::TimeSlot;

/// One raw reading delivered by a position source. Coordinates are passed through untouched:
/// nothing checks that they are finite or within geographic bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    /// Degrees, positive north.
    pub latitude: f64,
    /// Degrees, positive east.
    pub longitude: f64,
    /// When the source captured the reading. Not used for classification.
    pub captured_at: DateTime<Utc>,
    /// Horizontal accuracy in metres, if the source reports one.
    #[serde(default)]
    pub accuracy_m: Option<f64>,
}

impl PositionSample {
    pub fn new(latitude: f64, longitude: f64, captured_at: DateTime<Utc>) -> Self {
        Self {
            latitude,
            longitude,
            captured_at,
            accuracy_m: None,
        }
    }

    pub fn with_accuracy(self, accuracy_m: f64) -> Self {
        Self {
            accuracy_m: Some(accuracy_m),
            ..self
        }
    }
}

/// Classified record of one accepted sample. Fields are private so an entry can't change after
/// [LogEntry::accept] built it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    id: Uuid,
    timestamp: DateTime<FixedOffset>,
    position: PositionSample,
    hour_of_day: u32,
    weekday: u32,
    time_slot: TimeSlot,
}

impl LogEntry {
    /// Builds the entry for `position` accepted at `timestamp`. Calendar fields come from the
    /// wall clock of the timestamp's offset. Weekday is numbered from Sunday = 1 to Saturday = 7.
    pub fn accept(position: PositionSample, timestamp: DateTime<FixedOffset>) -> Self {
        let hour_of_day = timestamp.hour();
        Self {
            id: Uuid::new_v4(),
            timestamp,
            position,
            hour_of_day,
            weekday: timestamp.weekday().number_from_sunday(),
            time_slot: TimeSlot::from_hour(hour_of_day),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn position(&self) -> &PositionSample {
        &self.position
    }

    pub fn hour_of_day(&self) -> u32 {
        self.hour_of_day
    }

    pub fn weekday(&self) -> u32 {
        self.weekday
    }

    pub fn time_slot(&self) -> TimeSlot {
        self.time_slot
    }

    /// Line emitted when the entry gets appended.
    pub fn notification_line(&self) -> String {
        format!(
            "[{}] {} location update: latitude {}, longitude {}",
            format_timestamp(&self.timestamp),
            self.time_slot,
            self.position.latitude,
            self.position.longitude
        )
    }

    /// Line used when dumping the log.
    pub fn dump_line(&self) -> String {
        format!(
            "{} ({}, weekday {}) → {}, {}",
            format_minute(&self.timestamp),
            self.time_slot,
            self.weekday,
            self.position.latitude,
            self.position.longitude
        )
    }
}
