// hwmon device identity and sensor readings

/// A registered `/sys/class/hwmon/hwmon<id>` device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HwmonDevice {
    pub id: u32,
    pub name: String,
}

/// One tick of the power monitor, in mW / mA / mV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PowerSample {
    pub power_mw: i64,
    pub current_ma: i64,
    pub voltage_mv: i64,
}

/// One-shot system monitor readout. Temperatures in m°C, rails in mV.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SysmonReadings {
    pub lpd_temp: i64,
    pub fpd_temp: i64,
    pub pl_temp: i64,
    pub vcc_pspll: i64,
    pub pl_vccint: i64,
    pub volt_ddrs: i64,
    pub vcc_psintfp: i64,
    pub vcc_ps_fpd: i64,
    pub ps_io_bank_500: i64,
    pub vcc_ps_gtr: i64,
    pub vtt_ps_gtr: i64,
}
