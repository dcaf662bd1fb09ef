//! Follows a device's position and keeps an append-only log of where it was, with every entry
//! tagged by hour, weekday and part of the day. The log is owned by a single aggregator task and
//! shared with displays through read-only handles.

pub mod cli;
pub mod display;
pub mod tracker;
pub mod utils;
