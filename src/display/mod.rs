//! Console consumer of the log. It only reads through a [LogReader] and formats what it sees.

use std::time::Duration;

use futures::StreamExt;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use crate::tracker::{
    aggregation::{aggregator::LogReader, dump::LogDump},
    model::entities::{LogEntry, PositionSample},
};

/// Text shown for the current position.
pub fn render_latest(position: Option<&PositionSample>) -> String {
    match position {
        Some(position) => format!(
            "Current position: latitude {}, longitude {}",
            position.latitude, position.longitude
        ),
        None => "Waiting for the first position...".to_string(),
    }
}

/// Text printed for an on-demand dump.
pub fn render_dump(dump: &LogDump) -> String {
    if dump.is_empty() {
        return "Log is empty".to_string();
    }
    let mut out = format!("Log ({} entries):\n", dump.len());
    for line in dump.lines() {
        out += "  ";
        out += &line;
        out.push('\n');
    }
    out
}

/// Prints the latest position every time it changes, and the whole log every `dump_every` if
/// given. Finishes once the aggregator side is gone.
pub async fn run_console_display(reader: LogReader, dump_every: Option<Duration>) {
    let mut updates = WatchStream::new(reader.subscribe());
    let mut dump_timer = dump_every.map(|every| {
        let mut timer = tokio::time::interval_at(tokio::time::Instant::now() + every, every);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        timer
    });

    loop {
        let dump_tick = async {
            match dump_timer.as_mut() {
                Some(timer) => {
                    timer.tick().await;
                }
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            latest = updates.next() => match latest {
                Some(latest) => {
                    println!("{}", render_latest(latest.as_ref().map(LogEntry::position)))
                }
                None => {
                    debug!("Log publisher closed, display finished");
                    return;
                }
            },
            _ = dump_tick => print!("{}", render_dump(&reader.dump_log())),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{
        tracker::aggregation::aggregator::LogAggregator,
        utils::{clock::ManualClock, time::CalendarZone},
    };

    #[test]
    fn renders_waiting_and_position() {
        let now = Utc.with_ymd_and_hms(2018, 7, 4, 9, 0, 0).unwrap();
        assert_eq!(render_latest(None), "Waiting for the first position...");
        assert_eq!(
            render_latest(Some(&PositionSample::new(37.5, 127.0, now))),
            "Current position: latitude 37.5, longitude 127"
        );
    }

    #[test]
    fn renders_dump_in_order() {
        let now = Utc.with_ymd_and_hms(2018, 7, 4, 21, 59, 0).unwrap();
        let mut aggregator =
            LogAggregator::new(Box::new(ManualClock::new(now)), CalendarZone::utc());
        assert_eq!(render_dump(&aggregator.dump_log()), "Log is empty");

        aggregator.handle(PositionSample::new(1.5, 2.5, now));
        aggregator.handle(PositionSample::new(3.5, 4.5, now));

        assert_eq!(
            render_dump(&aggregator.dump_log()),
            concat!(
                "Log (2 entries):\n",
                "  2018-07-04 21:59 (Evening, weekday 4) → 1.5, 2.5\n",
                "  2018-07-04 21:59 (Evening, weekday 4) → 3.5, 4.5\n",
            )
        );
    }

    #[tokio::test]
    async fn display_ends_with_aggregator() {
        let now = Utc.with_ymd_and_hms(2018, 7, 4, 9, 0, 0).unwrap();
        let mut aggregator =
            LogAggregator::new(Box::new(ManualClock::new(now)), CalendarZone::utc());
        let reader = aggregator.reader();
        aggregator.handle(PositionSample::new(1., 1., now));

        let display = tokio::spawn(run_console_display(reader, None));
        drop(aggregator);
        display.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn periodic_dumps_stop_with_aggregator() {
        let now = Utc.with_ymd_and_hms(2018, 7, 4, 9, 0, 0).unwrap();
        let mut aggregator =
            LogAggregator::new(Box::new(ManualClock::new(now)), CalendarZone::utc());
        let reader = aggregator.reader();
        aggregator.handle(PositionSample::new(1., 1., now));

        let display = tokio::spawn(run_console_display(
            reader.clone(),
            Some(Duration::from_secs(1)),
        ));
        // Let a few dump ticks fire while the aggregator is still alive.
        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert!(!display.is_finished());

        aggregator.handle(PositionSample::new(2., 2., now));
        drop(aggregator);

        tokio::time::timeout(Duration::from_secs(10), display)
            .await
            .expect("display should stop once the aggregator is dropped")
            .unwrap();
        assert_eq!(reader.len(), 2);
    }
}
