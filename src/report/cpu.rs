// CPU utilization and frequency reports

use super::output_err;
use crate::error::{Result, StatsError};
use crate::models::CpuStat;
use crate::platform_repo::PlatformRepo;
use std::io::Write;
use std::time::Duration;

/// Snapshots CPUs `0..count`. A CPU whose row is missing or malformed is
/// reported as `None`; an unreadable `/proc/stat` aborts the pass.
pub fn sample_pass(repo: &PlatformRepo, count: usize) -> Result<Vec<Option<CpuStat>>> {
    let mut stats = Vec::with_capacity(count);
    for cpu in 0..count {
        match repo.get_cpu_stat(cpu) {
            Ok(s) => stats.push(Some(s)),
            Err(e) if e.is_fatal_io() => return Err(e),
            Err(e) => {
                tracing::warn!(cpu, error = %e, "skipping cpu");
                stats.push(None);
            }
        }
    }
    Ok(stats)
}

fn write_counters<W: Write>(
    stats: &[Option<CpuStat>],
    header: impl Fn(usize) -> String,
    out: &mut W,
) -> Result<()> {
    for s in stats.iter().flatten() {
        writeln!(out, "{}", header(s.cpu)).map_err(output_err)?;
        writeln!(out, "{}", s.counters_line()).map_err(output_err)?;
    }
    Ok(())
}

/// Two `/proc/stat` passes `interval` apart, then one line per CPU.
pub async fn report_cpu_utilization<W: Write>(
    repo: &PlatformRepo,
    count: usize,
    interval: Duration,
    verbose: bool,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "CPU Utilization").map_err(output_err)?;
    let prev = sample_pass(repo, count)?;
    if verbose {
        write_counters(&prev, |cpu| format!("cpu_id={cpu}\nStats at t0"), out)?;
    }

    tokio::time::sleep(interval).await;

    let mut curr = sample_pass(repo, count)?;
    render_utilization(&prev, &mut curr, verbose.then_some(interval), out)?;
    writeln!(out).map_err(output_err)
}

/// Fills `total_util` in `curr` and prints `CPU<i>\t:     <util>%` per CPU.
///
/// With `verbose_interval` set, each CPU's second-pass counters are printed
/// just before its utilization line.
pub fn render_utilization<W: Write>(
    prev: &[Option<CpuStat>],
    curr: &mut [Option<CpuStat>],
    verbose_interval: Option<Duration>,
    out: &mut W,
) -> Result<()> {
    for (cpu, (p, c)) in prev.iter().zip(curr.iter_mut()).enumerate() {
        if let (Some(interval), Some(c)) = (verbose_interval, c.as_ref()) {
            writeln!(out, "Stats at t1 after {}s", interval.as_secs_f64()).map_err(output_err)?;
            writeln!(out, "{}", c.counters_line()).map_err(output_err)?;
        }
        let (Some(p), Some(c)) = (p, c.as_mut()) else {
            writeln!(out, "CPU{cpu}\t:     unavailable").map_err(output_err)?;
            continue;
        };
        match c.utilization_since(p) {
            Ok(util) => {
                c.total_util = util;
                writeln!(out, "CPU{cpu}\t:     {util:.6}%").map_err(output_err)?;
            }
            Err(e @ StatsError::NoElapsedTicks { .. }) => {
                tracing::warn!(cpu, error = %e, "utilization undefined");
                writeln!(out, "CPU{cpu}\t:     unavailable (no elapsed ticks)")
                    .map_err(output_err)?;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// `cpuinfo_cur_freq` per CPU, printed in MHz. Every CPU is attempted;
/// the first failure is returned after the group is printed.
pub fn report_cpu_frequency<W: Write>(repo: &PlatformRepo, count: usize, out: &mut W) -> Result<()> {
    writeln!(out, "CPU Frequency").map_err(output_err)?;
    let mut first_err = None;
    for cpu in 0..count {
        match repo.get_cpu_frequency_khz(cpu) {
            Ok(khz) => {
                writeln!(out, "CPU{cpu}\t:    {:.6} MHz", khz / 1000.0).map_err(output_err)?;
            }
            Err(e) => {
                writeln!(out, "CPU{cpu}\t:    unavailable").map_err(output_err)?;
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
    }
    writeln!(out).map_err(output_err)?;
    first_err.map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat(cpu: usize, user: u64, system: u64, idle: u64, iowait: u64) -> CpuStat {
        CpuStat {
            cpu,
            user,
            system,
            idle,
            iowait,
            ..Default::default()
        }
    }

    #[test]
    fn renders_one_line_per_cpu() {
        let prev = vec![Some(stat(0, 100, 50, 200, 10)), Some(stat(1, 10, 10, 10, 0))];
        let mut curr = vec![Some(stat(0, 150, 70, 210, 10)), Some(stat(1, 10, 10, 10, 0))];
        let mut out = Vec::new();
        render_utilization(&prev, &mut curr, None, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "CPU0\t:     87.600000%\nCPU1\t:     unavailable (no elapsed ticks)\n"
        );
        assert!((curr[0].unwrap().total_util - 87.6).abs() < 1e-9);
        assert_eq!(curr[1].unwrap().total_util, 0.0);
    }

    #[test]
    fn missing_sample_is_unavailable() {
        let prev = vec![None];
        let mut curr = vec![Some(stat(0, 1, 1, 1, 1))];
        let mut out = Vec::new();
        render_utilization(&prev, &mut curr, None, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "CPU0\t:     unavailable\n");
    }

    #[test]
    fn verbose_interleaves_counters_with_utilization() {
        let prev = vec![Some(stat(0, 100, 50, 200, 10)), Some(stat(1, 10, 10, 100, 0))];
        let mut curr = vec![Some(stat(0, 150, 70, 210, 10)), Some(stat(1, 10, 10, 200, 0))];
        let mut out = Vec::new();
        render_utilization(&prev, &mut curr, Some(Duration::from_secs(1)), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Stats at t1 after 1s\n\
             CPU0: 150 0 70 210 10 0 0\n\
             CPU0\t:     87.600000%\n\
             Stats at t1 after 1s\n\
             CPU1: 10 0 10 200 0 0 0\n\
             CPU1\t:     0.100000%\n"
        );
    }
}
