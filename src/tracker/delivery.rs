use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, Instrument};

use super::source::{PositionSource, PositionUpdate};

/// Drives a [PositionSource] and forwards everything it produces to the aggregation side. This
/// is the only asynchronous hop between a source and the log.
pub struct DeliveryModule {
    next: mpsc::Sender<PositionUpdate>,
    source: Box<dyn PositionSource>,
    shutdown: CancellationToken,
}

impl DeliveryModule {
    pub fn new(
        next: mpsc::Sender<PositionUpdate>,
        source: Box<dyn PositionSource>,
        shutdown: CancellationToken,
    ) -> Self {
        Self {
            next,
            source,
            shutdown,
        }
    }

    async fn forward(&self, update: PositionUpdate) -> Result<()> {
        let span = info_span!("Delivering position update");
        debug!("Sending update {:?}", update);
        self.next
            .send(update)
            .instrument(span)
            .await
            .inspect_err(|e| error!("Unexpected error during sending {e:?}"))?;
        Ok(())
    }

    /// Executes the delivery loop. A source that fails to start gets its error forwarded and is
    /// not retried.
    pub async fn run(mut self) -> Result<()> {
        if let Err(e) = self.source.start().await {
            error!("Position source failed to start: {e}");
            return self.forward(PositionUpdate::Failure(e)).await;
        }
        info!("Position source started");

        loop {
            let update = tokio::select! {
                biased;
                // Returning drops the sender, which lets the aggregation module drain and stop.
                _ = self.shutdown.cancelled() => {
                    info!("Delivery cancelled");
                    return Ok(())
                }
                update = self.source.next_update() => update,
            };

            match update {
                Some(update) => self.forward(update).await?,
                None => {
                    info!("Position source has no more updates");
                    return Ok(());
                }
            }
        }
    }
}
