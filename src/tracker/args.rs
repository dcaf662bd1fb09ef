use std::{num::NonZeroU32, time::Duration};

use clap::Args;

use crate::utils::time::CalendarZone;

use super::{source::simulated::SimulationConfig, TrackerConfig, DEFAULT_CHANNEL_CAPACITY};

#[derive(Args, Debug, Clone)]
pub struct TrackArgs {
    #[arg(
        long = "lat",
        default_value_t = 37.5665,
        allow_hyphen_values = true,
        help = "Latitude the simulated walk circles around"
    )]
    pub latitude: f64,
    #[arg(
        long = "lon",
        default_value_t = 126.978,
        allow_hyphen_values = true,
        help = "Longitude the simulated walk circles around"
    )]
    pub longitude: f64,
    #[arg(
        long,
        default_value_t = 0.0005,
        help = "Radius of the simulated walk in degrees"
    )]
    pub step: f64,
    #[arg(
        long = "interval-ms",
        default_value_t = 1000,
        help = "Time between simulated samples"
    )]
    pub interval_ms: u64,
    #[arg(
        long,
        help = "Stop after this many simulated updates. Runs until Ctrl-C otherwise"
    )]
    pub count: Option<u64>,
    #[arg(long = "fail-every", help = "Report a lost signal on every n-th update")]
    pub fail_every: Option<NonZeroU32>,
    #[arg(long = "deny-permission", help = "Make the simulated source refuse to start")]
    pub deny_permission: bool,
    #[arg(long = "accuracy-m", help = "Accuracy in metres reported with every sample")]
    pub accuracy_m: Option<f64>,
    #[arg(
        long,
        default_value_t = CalendarZone::SystemLocal,
        help = "Zone used for hour and weekday of entries: local, utc or an offset like +09:00"
    )]
    pub zone: CalendarZone,
    #[arg(long = "dump-every", help = "Print the whole log every n seconds")]
    pub dump_every: Option<u64>,
    #[arg(long = "json", help = "Print the final log dump as json lines")]
    pub json: bool,
    #[arg(long = "channel-capacity", default_value_t = DEFAULT_CHANNEL_CAPACITY)]
    pub channel_capacity: usize,
}

impl TrackArgs {
    pub fn simulation(&self) -> SimulationConfig {
        SimulationConfig {
            origin_latitude: self.latitude,
            origin_longitude: self.longitude,
            step_degrees: self.step,
            interval: Duration::from_millis(self.interval_ms),
            ticks: self.count,
            fail_every: self.fail_every,
            deny_permission: self.deny_permission,
            accuracy_m: self.accuracy_m,
        }
    }

    pub fn tracker(&self) -> TrackerConfig {
        TrackerConfig {
            zone: self.zone,
            channel_capacity: self.channel_capacity.max(1),
        }
    }

    pub fn dump_interval(&self) -> Option<Duration> {
        self.dump_every
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
