// Platform stats via procfs and sysfs

mod hwmon;
mod procfs;
pub mod sysfs;

pub use procfs::MemInfo;

use crate::config::PathsConfig;
use crate::error::Result;
use crate::models::*;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Reads the pseudo-files under a procfs root and a sysfs root.
///
/// Nothing is cached: every call re-opens the files it needs.
#[derive(Debug, Clone)]
pub struct PlatformRepo {
    proc_root: PathBuf,
    sys_root: PathBuf,
}

impl Default for PlatformRepo {
    fn default() -> Self {
        Self::new("/proc", "/sys")
    }
}

impl PlatformRepo {
    pub fn new(proc_root: impl Into<PathBuf>, sys_root: impl Into<PathBuf>) -> Self {
        Self {
            proc_root: proc_root.into(),
            sys_root: sys_root.into(),
        }
    }

    pub fn from_config(paths: &PathsConfig) -> Self {
        Self::new(paths.proc_root.clone(), paths.sys_root.clone())
    }

    pub fn proc_root(&self) -> &Path {
        &self.proc_root
    }

    pub fn sys_root(&self) -> &Path {
        &self.sys_root
    }

    fn hwmon_class_dir(&self) -> PathBuf {
        self.sys_root.join("class/hwmon")
    }

    fn hwmon_base(&self) -> String {
        format!("{}/hwmon", self.hwmon_class_dir().display())
    }

    /// Number of configured CPUs, from `devices/system/cpu/possible`.
    /// Falls back to the sysinfo CPU list when that file is unavailable.
    pub fn configured_cpus(&self) -> usize {
        let possible = self.sys_root.join("devices/system/cpu/possible");
        if let Ok(content) = std::fs::read_to_string(&possible)
            && let Some(count) = procfs::parse_cpu_range(&content)
        {
            return count;
        }
        tracing::debug!(path = %possible.display(), "cpu list unavailable, asking sysinfo");
        let sys = sysinfo::System::new_with_specifics(
            sysinfo::RefreshKind::nothing().with_cpu(sysinfo::CpuRefreshKind::nothing()),
        );
        sys.cpus().len().max(1)
    }

    #[instrument(skip(self), fields(repo = "procfs", operation = "get_cpu_stat"))]
    pub fn get_cpu_stat(&self, cpu: usize) -> Result<CpuStat> {
        procfs::read_cpu_stat(&self.proc_root.join("stat"), cpu)
    }

    /// Current frequency of `cpu` in kHz.
    #[instrument(skip(self), fields(repo = "sysfs", operation = "get_cpu_frequency"))]
    pub fn get_cpu_frequency_khz(&self, cpu: usize) -> Result<f64> {
        let base = format!("{}/devices/system/cpu/cpu", self.sys_root.display());
        sysfs::read_float(&sysfs::attr_path(&base, cpu, "/cpufreq/cpuinfo_cur_freq"))
    }

    pub fn get_meminfo(&self) -> Result<MemInfo> {
        MemInfo::read(&self.proc_root.join("meminfo"))
    }

    pub fn get_ram_stats(&self) -> Result<MemoryFigures> {
        self.get_meminfo()?.ram()
    }

    pub fn get_swap_stats(&self) -> Result<SwapFigures> {
        self.get_meminfo()?.swap()
    }

    pub fn get_cma_stats(&self) -> Result<CmaFigures> {
        self.get_meminfo()?.cma()
    }

    pub fn count_hwmon_devices(&self) -> Result<u32> {
        hwmon::count_devices(&self.hwmon_class_dir())
    }

    /// Resolves a hwmon device by its `name` attribute; `None` when absent.
    #[instrument(skip(self), fields(repo = "sysfs", operation = "find_hwmon_device"))]
    pub fn find_hwmon_device(&self, name: &str) -> Result<Option<HwmonDevice>> {
        hwmon::resolve(&self.hwmon_class_dir(), name)
    }

    /// Reads an integer attribute such as `/in1_input` of hwmon device `id`.
    pub fn read_hwmon_attr(&self, id: u32, attr: &str) -> Result<i64> {
        sysfs::read_int(&sysfs::attr_path(&self.hwmon_base(), id, attr))
    }

    /// One power-monitor tick. `power1_input` is in µW and is scaled to mW.
    pub fn get_power_sample(&self, device: &HwmonDevice) -> Result<PowerSample> {
        Ok(PowerSample {
            power_mw: self.read_hwmon_attr(device.id, "/power1_input")? / 1000,
            current_ma: self.read_hwmon_attr(device.id, "/curr1_input")?,
            voltage_mv: self.read_hwmon_attr(device.id, "/in1_input")?,
        })
    }

    #[instrument(skip(self), fields(repo = "sysfs", operation = "get_sysmon_readings"))]
    pub fn get_sysmon_readings(&self, device: &HwmonDevice) -> Result<SysmonReadings> {
        let read = |attr: &str| self.read_hwmon_attr(device.id, attr);
        Ok(SysmonReadings {
            lpd_temp: read("/temp1_input")?,
            fpd_temp: read("/temp2_input")?,
            pl_temp: read("/temp3_input")?,
            vcc_pspll: read("/in1_input")?,
            pl_vccint: read("/in3_input")?,
            volt_ddrs: read("/in6_input")?,
            vcc_psintfp: read("/in7_input")?,
            vcc_ps_fpd: read("/in9_input")?,
            ps_io_bank_500: read("/in13_input")?,
            vcc_ps_gtr: read("/in16_input")?,
            vtt_ps_gtr: read("/in17_input")?,
        })
    }
}
