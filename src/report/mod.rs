// Report driver: runs each selected metric family in order and keeps going on failure

mod cpu;
mod memory;
mod power;

pub use cpu::{render_utilization, report_cpu_frequency, report_cpu_utilization, sample_pass};
pub use memory::{
    render_cma, render_ram, render_swap, report_cma_utilization, report_ram_utilization,
    report_swap_utilization,
};
pub use power::{render_power_tick, render_sysmon, report_power_monitor, report_system_monitor};

use crate::config::AppConfig;
use crate::error::StatsError;
use crate::platform_repo::PlatformRepo;
use std::io::Write;
use std::time::Duration;

/// A group of related metrics printed under one heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    CpuUtilization,
    Ram,
    Swap,
    Power,
    Cma,
    CpuFrequency,
}

impl Family {
    /// Order of the full report.
    pub const ALL: [Family; 6] = [
        Family::CpuUtilization,
        Family::Ram,
        Family::Swap,
        Family::Power,
        Family::Cma,
        Family::CpuFrequency,
    ];

    pub fn operation(self) -> &'static str {
        match self {
            Family::CpuUtilization => "cpu_utilization",
            Family::Ram => "ram_utilization",
            Family::Swap => "swap_utilization",
            Family::Power => "power_utilization",
            Family::Cma => "cma_utilization",
            Family::CpuFrequency => "cpu_frequency",
        }
    }
}

/// Which families to print. Empty means everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    families: Vec<Family>,
}

impl Selection {
    pub fn all() -> Self {
        Self {
            families: Family::ALL.to_vec(),
        }
    }

    pub fn with(mut self, family: Family, enabled: bool) -> Self {
        if enabled && !self.families.contains(&family) {
            self.families.push(family);
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    pub fn contains(&self, family: Family) -> bool {
        self.families.contains(&family)
    }

    /// Selected families in report order.
    pub fn ordered(&self) -> Vec<Family> {
        if self.is_empty() {
            return Family::ALL.to_vec();
        }
        Family::ALL
            .into_iter()
            .filter(|f| self.contains(*f))
            .collect()
    }
}

/// Outcome of a full report run.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub failures: usize,
    /// First I/O failure; decides the exit status.
    pub first_io_error: Option<StatsError>,
}

impl RunSummary {
    /// 0, or the OS error code of the first I/O failure (1 when it has none).
    pub fn exit_code(&self) -> i32 {
        match &self.first_io_error {
            None => 0,
            Some(e) => e.os_code().unwrap_or(1),
        }
    }
}

pub(crate) fn output_err(e: std::io::Error) -> StatsError {
    StatsError::io("<output>", e)
}

pub struct Reporter {
    repo: PlatformRepo,
    config: AppConfig,
    verbose: bool,
}

impl Reporter {
    pub fn new(repo: PlatformRepo, config: AppConfig, verbose: bool) -> Self {
        Self {
            repo,
            config,
            verbose,
        }
    }

    pub fn repo(&self) -> &PlatformRepo {
        &self.repo
    }

    /// Prints every selected family. A failing family prints its error and
    /// the run continues with the next one.
    pub async fn run<W: Write>(&self, selection: &Selection, out: &mut W) -> RunSummary {
        let mut summary = RunSummary::default();
        for family in selection.ordered() {
            for e in self.run_family(family, out).await {
                tracing::warn!(error = %e, operation = family.operation(), "report failed");
                if let Err(write_err) = writeln!(out, "{e}\n") {
                    tracing::warn!(error = %write_err, "failed to write report");
                }
                summary.failures += 1;
                if e.is_fatal_io() && summary.first_io_error.is_none() {
                    summary.first_io_error = Some(e);
                }
            }
        }
        summary
    }

    /// Runs one family and returns every failure it produced. The power
    /// family runs two independent reports, so it can fail twice.
    async fn run_family<W: Write>(&self, family: Family, out: &mut W) -> Vec<StatsError> {
        let sampling = &self.config.sampling;
        let result = match family {
            Family::CpuUtilization => {
                let cpus = self.repo.configured_cpus();
                let interval = Duration::from_millis(sampling.cpu_interval_ms);
                report_cpu_utilization(&self.repo, cpus, interval, self.verbose, out).await
            }
            Family::Ram => report_ram_utilization(&self.repo, out),
            Family::Swap => report_swap_utilization(&self.repo, out),
            Family::Power => {
                let rate = Duration::from_secs(sampling.rate_secs);
                let power = report_power_monitor(
                    &self.repo,
                    &self.config.devices.power_monitor,
                    rate,
                    sampling.duration,
                    out,
                )
                .await;
                let sysmon =
                    report_system_monitor(&self.repo, &self.config.devices.system_monitor, out);
                return [power, sysmon].into_iter().filter_map(|r| r.err()).collect();
            }
            Family::Cma => report_cma_utilization(&self.repo, out),
            Family::CpuFrequency => {
                report_cpu_frequency(&self.repo, self.repo.configured_cpus(), out)
            }
        };
        result.err().into_iter().collect()
    }
}
