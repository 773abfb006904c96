//! Command-line interface.
//!
//! With no metric flag the full report is printed, as with `--all`.

use crate::report::{Family, Selection};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "platformstats",
    about = "Print CPU, memory, CMA and power/thermal stats of an embedded Linux platform",
    version,
    propagate_version = true
)]
pub struct Args {
    /// Print all stats
    #[arg(short = 'a', long)]
    pub all: bool,

    /// CPU utilization over a one-interval window
    #[arg(short = 'c', long)]
    pub cpu_util: bool,

    /// RAM utilization
    #[arg(short = 'r', long)]
    pub ram_util: bool,

    /// Swap utilization
    #[arg(short = 's', long)]
    pub swap_util: bool,

    /// Power monitor and system monitor readings
    #[arg(short = 'p', long)]
    pub power_util: bool,

    /// CMA utilization
    #[arg(short = 'm', long)]
    pub cma_util: bool,

    /// Current CPU frequency
    #[arg(short = 'f', long)]
    pub cpu_freq: bool,

    /// Print raw counters and debug logs
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Seconds between power samples (overrides config)
    #[arg(long)]
    pub rate: Option<u64>,

    /// Number of power samples (overrides config)
    #[arg(long)]
    pub duration: Option<usize>,

    /// Config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn selection(&self) -> Selection {
        if self.all {
            return Selection::all();
        }
        Selection::default()
            .with(Family::CpuUtilization, self.cpu_util)
            .with(Family::Ram, self.ram_util)
            .with(Family::Swap, self.swap_util)
            .with(Family::Power, self.power_util)
            .with(Family::Cma, self.cma_util)
            .with(Family::CpuFrequency, self.cpu_freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_selects_everything() {
        let args = Args::parse_from(["platformstats"]);
        assert_eq!(args.selection().ordered(), Family::ALL.to_vec());
    }

    #[test]
    fn short_flags_pick_families() {
        let args = Args::parse_from(["platformstats", "-r", "-f", "-v", "--duration", "5"]);
        assert!(args.verbose);
        assert_eq!(args.duration, Some(5));
        assert_eq!(
            args.selection().ordered(),
            vec![Family::Ram, Family::CpuFrequency]
        );
    }

    #[test]
    fn all_wins_over_individual_flags() {
        let args = Args::parse_from(["platformstats", "-a", "-m"]);
        assert_eq!(args.selection(), Selection::all());
    }
}
