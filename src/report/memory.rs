// RAM, swap and CMA reports from /proc/meminfo

use super::output_err;
use crate::error::Result;
use crate::models::{CmaFigures, MemoryFigures, SwapFigures};
use crate::platform_repo::PlatformRepo;
use std::io::Write;

pub fn report_ram_utilization<W: Write>(repo: &PlatformRepo, out: &mut W) -> Result<()> {
    writeln!(out, "RAM Utilization").map_err(output_err)?;
    let ram = repo.get_ram_stats()?;
    render_ram(&ram, out)
}

pub fn render_ram<W: Write>(ram: &MemoryFigures, out: &mut W) -> Result<()> {
    write!(
        out,
        "MemTotal      :     {} kB\n\
         MemFree       :     {} kB\n\
         MemAvailable  :     {} kB\n\n",
        ram.total, ram.free, ram.available
    )
    .map_err(output_err)
}

pub fn report_swap_utilization<W: Write>(repo: &PlatformRepo, out: &mut W) -> Result<()> {
    writeln!(out, "Swap Mem Utilization").map_err(output_err)?;
    let swap = repo.get_swap_stats()?;
    render_swap(&swap, out)
}

pub fn render_swap<W: Write>(swap: &SwapFigures, out: &mut W) -> Result<()> {
    write!(
        out,
        "SwapTotal    :    {} kB\n\
         SwapFree     :    {} kB\n\n",
        swap.total, swap.free
    )
    .map_err(output_err)
}

pub fn report_cma_utilization<W: Write>(repo: &PlatformRepo, out: &mut W) -> Result<()> {
    writeln!(out, "CMA Mem Utilization").map_err(output_err)?;
    let cma = repo.get_cma_stats()?;
    render_cma(&cma, out)
}

pub fn render_cma<W: Write>(cma: &CmaFigures, out: &mut W) -> Result<()> {
    write!(
        out,
        "CmaTotal   :     {} kB\n\
         CmaFree    :     {} kB\n\n",
        cma.total, cma.free
    )
    .map_err(output_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ram_block_layout() {
        let mut out = Vec::new();
        render_ram(
            &MemoryFigures {
                total: 1000,
                free: 200,
                available: 500,
            },
            &mut out,
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "MemTotal      :     1000 kB\nMemFree       :     200 kB\nMemAvailable  :     500 kB\n\n"
        );
    }

    #[test]
    fn cma_block_ends_with_blank_line() {
        let mut out = Vec::new();
        render_cma(&CmaFigures { total: 65536, free: 60000 }, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().ends_with("60000 kB\n\n"));
    }
}
