//! Pipeline from a position source to the log:
//!
//! source → [delivery::DeliveryModule] → mpsc channel → [aggregation::AggregationModule] →
//! [aggregation::aggregator::LogAggregator]
//!
//! Readers get an [aggregation::aggregator::LogReader] from [Tracker::reader] before the
//! pipeline starts running.

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::error;

use aggregation::{
    aggregator::{LogAggregator, LogReader},
    AggregationModule,
};
use delivery::DeliveryModule;
use source::{PositionSource, PositionUpdate};

use crate::utils::{clock::Clock, time::CalendarZone};

pub mod aggregation;
pub mod args;
pub mod delivery;
pub mod model;
pub mod shutdown;
pub mod source;

pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy)]
pub struct TrackerConfig {
    pub zone: CalendarZone,
    pub channel_capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            zone: CalendarZone::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Fully wired pipeline, ready to run.
pub struct Tracker {
    delivery: DeliveryModule,
    aggregation: AggregationModule,
    reader: LogReader,
}

impl Tracker {
    pub fn new(
        source: impl PositionSource + 'static,
        config: TrackerConfig,
        clock: impl Clock,
        shutdown: &CancellationToken,
    ) -> Self {
        let (sender, receiver) = mpsc::channel::<PositionUpdate>(config.channel_capacity);
        let aggregator = LogAggregator::new(Box::new(clock), config.zone);
        let reader = aggregator.reader();

        Self {
            delivery: create_delivery(sender, source, shutdown),
            aggregation: AggregationModule::new(receiver, aggregator),
            reader,
        }
    }

    pub fn reader(&self) -> LogReader {
        self.reader.clone()
    }

    /// Runs until the source is exhausted or `shutdown` is cancelled. Everything delivered
    /// before that point ends up in the log.
    pub async fn run(self) -> Result<()> {
        let (delivery_result, aggregation_result) =
            tokio::join!(self.delivery.run(), self.aggregation.run());

        if let Err(delivery_result) = delivery_result {
            error!("Delivery module got an error {:?}", delivery_result);
        }

        if let Err(aggregation_result) = aggregation_result {
            error!("Aggregation module got an error {:?}", aggregation_result);
        }

        Ok(())
    }
}

fn create_delivery(
    sender: mpsc::Sender<PositionUpdate>,
    source: impl PositionSource + 'static,
    shutdown_token: &CancellationToken,
) -> DeliveryModule {
    DeliveryModule::new(sender, Box::new(source), shutdown_token.clone())
}
