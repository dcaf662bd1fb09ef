use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, PoisonError, RwLock,
};

use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    tracker::{
        model::entities::{LogEntry, PositionSample},
        source::SourceError,
    },
    utils::{clock::Clock, time::CalendarZone},
};

use super::dump::LogDump;

/// Owner of the position log. It has a single writer: whoever holds the aggregator calls
/// [LogAggregator::handle] one sample at a time. Everyone else reads through a [LogReader].
pub struct LogAggregator {
    log: Arc<RwLock<Vec<LogEntry>>>,
    latest: watch::Sender<Option<LogEntry>>,
    failures: Arc<AtomicU64>,
    clock: Box<dyn Clock>,
    zone: CalendarZone,
}

impl LogAggregator {
    pub fn new(clock: Box<dyn Clock>, zone: CalendarZone) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            log: Arc::default(),
            latest,
            failures: Arc::default(),
            clock,
            zone,
        }
    }

    pub fn reader(&self) -> LogReader {
        LogReader {
            log: self.log.clone(),
            latest: self.latest.subscribe(),
            failures: self.failures.clone(),
        }
    }

    /// Classifies `sample` by the current time, appends it to the log and notifies subscribers.
    /// Returns a copy of the appended entry.
    pub fn handle(&mut self, sample: PositionSample) -> LogEntry {
        let now = self.zone.localize(self.clock.time());
        let entry = LogEntry::accept(sample, now);

        self.log
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(entry.clone());
        self.latest.send_replace(Some(entry.clone()));

        info!(id = %entry.id(), "{}", entry.notification_line());
        entry
    }

    /// Records a failure reported by the source. The log is left alone.
    pub fn handle_failure(&mut self, error: &SourceError) {
        let failures = self.failures.fetch_add(1, Ordering::Relaxed) + 1;
        warn!(failures, "Location update failed: {error}");
    }

    pub fn dump_log(&self) -> LogDump {
        read_snapshot(&self.log)
    }
}

/// Read-only view of the log held by an aggregator. Cheap to clone, and stays valid after the
/// aggregator is gone.
#[derive(Clone)]
pub struct LogReader {
    log: Arc<RwLock<Vec<LogEntry>>>,
    latest: watch::Receiver<Option<LogEntry>>,
    failures: Arc<AtomicU64>,
}

impl LogReader {
    /// Position of the most recently appended entry. `None` until the first sample arrives.
    pub fn latest_position(&self) -> Option<PositionSample> {
        self.latest_entry().map(|entry| *entry.position())
    }

    pub fn latest_entry(&self) -> Option<LogEntry> {
        self.log
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.log.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.log.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Snapshot of the log in append order. Appends are blocked only while the entries are
    /// copied.
    pub fn dump_log(&self) -> LogDump {
        read_snapshot(&self.log)
    }

    /// Receiver of the latest appended entry. Anything appended after this reader was created
    /// is reported as changed.
    pub fn subscribe(&self) -> watch::Receiver<Option<LogEntry>> {
        self.latest.clone()
    }

    pub fn failure_count(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

fn read_snapshot(log: &RwLock<Vec<LogEntry>>) -> LogDump {
    let entries = log.read().unwrap_or_else(PoisonError::into_inner).clone();
    LogDump::new(entries)
}
