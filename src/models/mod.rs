// Domain models for one reporting pass

mod cpu;
mod hwmon;
mod memory;

pub use cpu::CpuStat;
pub use hwmon::{HwmonDevice, PowerSample, SysmonReadings};
pub use memory::{CmaFigures, MemoryFigures, SwapFigures};
