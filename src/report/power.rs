// Power monitor (moving averages over `duration` ticks) and system monitor reports

use super::output_err;
use crate::error::{Result, StatsError};
use crate::models::{HwmonDevice, PowerSample, SysmonReadings};
use crate::moving_average::MovingAverage;
use crate::platform_repo::PlatformRepo;
use std::io::Write;
use std::time::Duration;

/// Looks up `name`; a missing device (or a host without hwmon) prints a
/// notice and yields `None` rather than an error.
fn locate<W: Write>(repo: &PlatformRepo, name: &str, out: &mut W) -> Result<Option<HwmonDevice>> {
    let found = match repo.find_hwmon_device(name) {
        Ok(found) => found,
        Err(StatsError::NotAvailable { path }) => {
            tracing::debug!(%path, "hwmon class directory missing");
            None
        }
        Err(e) => return Err(e),
    };
    if found.is_none() {
        writeln!(
            out,
            "no hwmon device found for {name} under {}\n",
            repo.sys_root().join("class/hwmon").display()
        )
        .map_err(output_err)?;
    }
    Ok(found)
}

/// Samples the power monitor `duration` times, `rate` apart, printing each
/// reading next to its running average.
pub async fn report_power_monitor<W: Write>(
    repo: &PlatformRepo,
    name: &str,
    rate: Duration,
    duration: usize,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Power Utilization").map_err(output_err)?;
    let Some(device) = locate(repo, name, out)? else {
        return Ok(());
    };
    tracing::debug!(hwmon_id = device.id, device_name = %device.name, "power monitor found");

    let mut power_avg = MovingAverage::new(duration)?;
    let mut current_avg = MovingAverage::new(duration)?;
    let mut voltage_avg = MovingAverage::new(duration)?;

    for tick in 0..duration {
        let sample = repo.get_power_sample(&device)?;
        let averages = PowerSample {
            power_mw: power_avg.observe(sample.power_mw),
            current_ma: current_avg.observe(sample.current_ma),
            voltage_mv: voltage_avg.observe(sample.voltage_mv),
        };
        render_power_tick(&sample, &averages, out)?;
        if tick + 1 < duration {
            tokio::time::sleep(rate).await;
        }
    }
    Ok(())
}

pub fn render_power_tick<W: Write>(
    sample: &PowerSample,
    averages: &PowerSample,
    out: &mut W,
) -> Result<()> {
    write!(
        out,
        "SOM total power    :     {} mW\t SOM avg power    :    {} mW\n\
         SOM total current  :     {} mA\t\t SOM avg current  :    {} mA\n\
         SOM total voltage  :     {} mV\t SOM avg voltage  :   {} mV\n\n",
        sample.power_mw,
        averages.power_mw,
        sample.current_ma,
        averages.current_ma,
        sample.voltage_mv,
        averages.voltage_mv
    )
    .map_err(output_err)
}

/// One-shot temperature and rail voltages from the system monitor.
pub fn report_system_monitor<W: Write>(repo: &PlatformRepo, name: &str, out: &mut W) -> Result<()> {
    let Some(device) = locate(repo, name, out)? else {
        return Ok(());
    };
    let readings = repo.get_sysmon_readings(&device)?;
    render_sysmon(&readings, out)
}

fn line<W: Write>(out: &mut W, label: &str, value: i64, unit: &str) -> Result<()> {
    writeln!(out, "{label:<56}:     {value} {unit}").map_err(output_err)
}

pub fn render_sysmon<W: Write>(r: &SysmonReadings, out: &mut W) -> Result<()> {
    writeln!(out, "AMS CTRL").map_err(output_err)?;
    line(out, "System PLLs voltage measurement, VCC_PSLL", r.vcc_pspll, "mV")?;
    line(out, "PL internal voltage measurement, VCC_PSBATT", r.pl_vccint, "mV")?;
    line(out, "Voltage measurement for six DDR I/O PLLs, VCC_PSDDR_PLL", r.volt_ddrs, "mV")?;
    line(out, "VCC_PSINTFP_DDR voltage measurement", r.vcc_psintfp, "mV")?;
    writeln!(out).map_err(output_err)?;

    writeln!(out, "PS Sysmon").map_err(output_err)?;
    line(out, "LPD temperature measurement", r.lpd_temp / 1000, "C")?;
    line(out, "FPD temperature measurement (REMOTE)", r.fpd_temp / 1000, "C")?;
    line(out, "VCC PS FPD voltage measurement (supply 2)", r.vcc_ps_fpd, "mV")?;
    line(out, "PS IO Bank 500 voltage measurement (supply 6)", r.ps_io_bank_500, "mV")?;
    line(out, "VCC PS GTR voltage", r.vcc_ps_gtr, "mV")?;
    line(out, "VTT PS GTR voltage", r.vtt_ps_gtr, "mV")?;
    writeln!(out).map_err(output_err)?;

    writeln!(out, "PL Sysmon").map_err(output_err)?;
    line(out, "PL temperature", r.pl_temp / 1000, "C")?;
    writeln!(out).map_err(output_err)
}
