//! Contract between the tracker and whatever produces positions. Setting a source up
//! (permissions, accuracy, hardware) stays inside each implementation; the tracker only sees
//! [PositionSource::start] and the stream of [PositionUpdate]s.

pub mod simulated;

use async_trait::async_trait;
use thiserror::Error;

use super::model::entities::PositionSample;

/// Failures reported by a position source. None of them stop the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("Permission to read the position was denied")]
    PermissionDenied,
    #[error("Position signal was lost")]
    SignalLost,
    #[error("Position source is unavailable: {0}")]
    Unavailable(String),
}

/// Single item delivered by a source.
#[derive(Debug, Clone, PartialEq)]
pub enum PositionUpdate {
    Sample(PositionSample),
    Failure(SourceError),
}

/// Asynchronous producer of positions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PositionSource: Send {
    /// Begins producing updates. Anything the source needs before it can deliver, such as asking
    /// for permission, happens here.
    async fn start(&mut self) -> Result<(), SourceError>;

    /// Waits for the next update. `None` means the source will not deliver anything anymore.
    async fn next_update(&mut self) -> Option<PositionUpdate>;
}
