// Per-CPU /proc/stat counters and the utilization derived from two of them

use crate::error::{Result, StatsError};

/// One `/proc/stat` row, in clock ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CpuStat {
    pub cpu: usize,
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
    pub iowait: u64,
    pub irq: u64,
    pub softirq: u64,
    /// Filled in once a later sample has been compared against this one.
    pub total_util: f64,
}

impl CpuStat {
    /// Idle time including I/O wait.
    pub fn idle_total(&self) -> u64 {
        self.idle + self.iowait
    }

    pub fn busy_total(&self) -> u64 {
        self.user + self.nice + self.system + self.irq + self.softirq
    }

    pub fn total(&self) -> u64 {
        self.idle_total() + self.busy_total()
    }

    /// Utilization in percent between `prev` and `self`.
    ///
    /// Computed as `(1000 * busy_delta / total_delta + 1) / 10`, so a fully
    /// idle interval reports 0.1.
    pub fn utilization_since(&self, prev: &CpuStat) -> Result<f64> {
        let total_delta = self.total() as f64 - prev.total() as f64;
        let idle_delta = self.idle_total() as f64 - prev.idle_total() as f64;
        if total_delta <= 0.0 {
            return Err(StatsError::NoElapsedTicks { cpu: self.cpu });
        }
        Ok((1000.0 * (total_delta - idle_delta) / total_delta + 1.0) / 10.0)
    }

    /// Raw counters in the `CPU<i>: user nice system idle iowait irq softirq` layout.
    pub fn counters_line(&self) -> String {
        format!(
            "CPU{}: {} {} {} {} {} {} {}",
            self.cpu, self.user, self.nice, self.system, self.idle, self.iowait, self.irq, self.softirq
        )
    }
}
