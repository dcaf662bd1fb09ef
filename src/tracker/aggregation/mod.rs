//! The log itself lives in [aggregator::LogAggregator]. [AggregationModule] is the task that
//! feeds it, and the only place the log gets written from.

pub mod aggregator;
pub mod dump;

use anyhow::Result;
use tokio::sync::mpsc::Receiver;
use tracing::{debug, info};

use aggregator::LogAggregator;

use super::source::PositionUpdate;

/// Receives updates from the delivery side and applies them to the aggregator strictly in the
/// order they were sent.
pub struct AggregationModule {
    receiver: Receiver<PositionUpdate>,
    aggregator: LogAggregator,
}

impl AggregationModule {
    pub fn new(receiver: Receiver<PositionUpdate>, aggregator: LogAggregator) -> Self {
        Self {
            receiver,
            aggregator,
        }
    }

    /// Runs until every sender is gone.
    pub async fn run(mut self) -> Result<()> {
        while let Some(update) = self.receiver.recv().await {
            debug!("Processing update {:?}", update);
            match update {
                PositionUpdate::Sample(sample) => {
                    self.aggregator.handle(sample);
                }
                PositionUpdate::Failure(error) => self.aggregator.handle_failure(&error),
            }
        }

        self.receiver.close();
        info!(
            "Position updates ended with {} entries logged",
            self.aggregator.reader().len()
        );
        Ok(())
    }
}
