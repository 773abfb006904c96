// Platform telemetry readers and reporters

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod moving_average;
pub mod platform_repo;
pub mod report;

pub use error::{Result, StatsError};
pub use moving_average::MovingAverage;
