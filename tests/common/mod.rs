// Shared test helpers: a synthetic procfs/sysfs tree in a temp dir

#![allow(dead_code)]

use platformstats::platform_repo::PlatformRepo;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const MEMINFO: &str = "MemTotal:        1000 kB\n\
MemFree:          200 kB\n\
MemAvailable:     500 kB\n\
Buffers:           10 kB\n\
SwapCached:         0 kB\n\
SwapTotal:        2048 kB\n\
SwapFree:         1024 kB\n\
CmaTotal:        65536 kB\n\
CmaFree:         60000 kB\n";

pub struct FakePlatform {
    dir: TempDir,
}

impl FakePlatform {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("proc")).unwrap();
        std::fs::create_dir_all(dir.path().join("sys")).unwrap();
        Self { dir }
    }

    pub fn proc_root(&self) -> PathBuf {
        self.dir.path().join("proc")
    }

    pub fn sys_root(&self) -> PathBuf {
        self.dir.path().join("sys")
    }

    pub fn repo(&self) -> PlatformRepo {
        PlatformRepo::new(self.proc_root(), self.sys_root())
    }

    fn write(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn write_proc(&self, rel: &str, content: &str) {
        Self::write(&self.proc_root().join(rel), content);
    }

    pub fn write_sys(&self, rel: &str, content: &str) {
        Self::write(&self.sys_root().join(rel), content);
    }

    /// `/proc/stat` with an aggregate row followed by one row per entry.
    pub fn write_stat(&self, rows: &[[u64; 7]]) {
        let mut content = String::from("cpu  0 0 0 0 0 0 0 0 0 0\n");
        for (cpu, r) in rows.iter().enumerate() {
            content.push_str(&format!(
                "cpu{cpu} {} {} {} {} {} {} {} 0 0 0\n",
                r[0], r[1], r[2], r[3], r[4], r[5], r[6]
            ));
        }
        content.push_str("intr 1 2 3\nctxt 42\n");
        self.write_proc("stat", &content);
    }

    /// Declares `freqs_khz.len()` CPUs with the given current frequencies.
    pub fn set_cpus(&self, freqs_khz: &[u64]) {
        self.write_sys(
            "devices/system/cpu/possible",
            &format!("0-{}\n", freqs_khz.len() - 1),
        );
        for (cpu, khz) in freqs_khz.iter().enumerate() {
            self.write_sys(
                &format!("devices/system/cpu/cpu{cpu}/cpufreq/cpuinfo_cur_freq"),
                &format!("{khz}\n"),
            );
        }
    }

    /// Registers `hwmon<id>` with a `name` attribute and extra attributes.
    pub fn add_hwmon(&self, id: u32, name: &str, attrs: &[(&str, i64)]) {
        self.write_sys(&format!("class/hwmon/hwmon{id}/name"), &format!("{name}\n"));
        for (attr, value) in attrs {
            self.write_sys(
                &format!("class/hwmon/hwmon{id}/{attr}"),
                &format!("{value}\n"),
            );
        }
    }

    pub fn add_power_monitor(&self, id: u32) {
        self.add_hwmon(
            id,
            "ina260_u14",
            &[
                ("power1_input", 5_120_000),
                ("curr1_input", 420),
                ("in1_input", 12_000),
            ],
        );
    }

    pub fn add_system_monitor(&self, id: u32) {
        self.add_hwmon(
            id,
            "ams",
            &[
                ("temp1_input", 45_678),
                ("temp2_input", 46_100),
                ("temp3_input", 51_999),
                ("in1_input", 1_201),
                ("in3_input", 850),
                ("in6_input", 1_199),
                ("in7_input", 851),
                ("in9_input", 852),
                ("in13_input", 1_802),
                ("in16_input", 853),
                ("in17_input", 1_800),
            ],
        );
    }
}
