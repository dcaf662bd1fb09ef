//! Records that flow through the tracker.
//!  - [entities::PositionSample] is what a position source hands over. It is never interpreted
//!    beyond being copied.
//!  - [entities::LogEntry] is what the aggregator derives from a sample at the moment it accepts
//!    it.
//!  - [time_slot::TimeSlot] is the part of the day an entry falls into.

pub mod entities;
pub mod time_slot;
