use std::{f64::consts::PI, num::NonZeroU32, time::Duration};

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::{tracker::model::entities::PositionSample, utils::clock::Clock};

use super::{PositionSource, PositionUpdate, SourceError};

/// Number of ticks needed to walk once around the circle.
const TICKS_PER_LAP: f64 = 16.;

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub origin_latitude: f64,
    pub origin_longitude: f64,
    /// Radius of the walked circle in degrees.
    pub step_degrees: f64,
    pub interval: Duration,
    /// Stop after this many ticks. Failures count as ticks.
    pub ticks: Option<u64>,
    /// Report a lost signal instead of a sample on every n-th tick.
    pub fail_every: Option<NonZeroU32>,
    /// Refuse to start, as a device whose user declined location access would.
    pub deny_permission: bool,
    pub accuracy_m: Option<f64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            origin_latitude: 37.5665,
            origin_longitude: 126.978,
            step_degrees: 0.0005,
            interval: Duration::from_secs(1),
            ticks: None,
            fail_every: None,
            deny_permission: false,
            accuracy_m: None,
        }
    }
}

/// Source that walks around a circle centred on the origin, one point per interval. Useful when
/// no positioning hardware is around.
pub struct SimulatedSource {
    config: SimulationConfig,
    clock: Box<dyn Clock>,
    next_point: Option<Instant>,
    tick: u64,
}

impl SimulatedSource {
    pub fn new(config: SimulationConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            config,
            clock,
            next_point: None,
            tick: 0,
        }
    }

    fn sample_for(&self, tick: u64) -> PositionSample {
        let angle = 2. * PI * (tick as f64 / TICKS_PER_LAP);
        let sample = PositionSample::new(
            self.config.origin_latitude + self.config.step_degrees * angle.sin(),
            self.config.origin_longitude + self.config.step_degrees * angle.cos(),
            self.clock.time(),
        );
        match self.config.accuracy_m {
            Some(accuracy) => sample.with_accuracy(accuracy),
            None => sample,
        }
    }

    fn is_failure_tick(&self, tick: u64) -> bool {
        self.config
            .fail_every
            .is_some_and(|every| tick % u64::from(every.get()) == 0)
    }
}

#[async_trait]
impl PositionSource for SimulatedSource {
    async fn start(&mut self) -> Result<(), SourceError> {
        if self.config.deny_permission {
            return Err(SourceError::PermissionDenied);
        }
        info!(
            "Simulating positions around {}, {} every {:?}",
            self.config.origin_latitude, self.config.origin_longitude, self.config.interval
        );
        self.next_point = Some(self.clock.instant());
        Ok(())
    }

    async fn next_update(&mut self) -> Option<PositionUpdate> {
        // Never started, nothing to deliver.
        let point = self.next_point?;
        if self.config.ticks.is_some_and(|limit| self.tick >= limit) {
            debug!("Simulation finished after {} ticks", self.tick);
            return None;
        }

        self.clock.sleep_until(point).await;
        self.next_point = Some(point + self.config.interval);
        self.tick += 1;

        if self.is_failure_tick(self.tick) {
            Some(PositionUpdate::Failure(SourceError::SignalLost))
        } else {
            Some(PositionUpdate::Sample(self.sample_for(self.tick)))
        }
    }
}
