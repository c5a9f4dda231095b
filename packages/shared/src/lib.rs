//! Shared utilities for the gamepulse server and tooling.

pub mod logger;
pub mod time;
