// /proc/stat rows, /proc/meminfo fields and CPU range lists

use crate::error::{Result, StatsError};
use crate::models::{CmaFigures, CpuStat, MemoryFigures, SwapFigures};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::sysfs::skip_lines;

/// Reads the `/proc/stat` row for `cpu`.
///
/// Row 0 is the aggregate `cpu` line, so the per-CPU row sits `cpu + 1`
/// lines in. The row label must match, since the kernel omits rows for
/// offline CPUs. A file too short to hold the row is a parse error.
pub(super) fn read_cpu_stat(path: &Path, cpu: usize) -> Result<CpuStat> {
    let file = File::open(path).map_err(|e| StatsError::io(path.display(), e))?;
    let mut reader = BufReader::new(file);
    skip_lines(&mut reader, cpu + 1).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            StatsError::Parse {
                path: path.display().to_string(),
                detail: format!("no row for cpu{cpu}"),
            }
        } else {
            StatsError::io(path.display(), e)
        }
    })?;
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| StatsError::io(path.display(), e))?;
    parse_cpu_row(&line, cpu).map_err(|detail| StatsError::Parse {
        path: path.display().to_string(),
        detail,
    })
}

fn parse_cpu_row(line: &str, cpu: usize) -> std::result::Result<CpuStat, String> {
    let mut parts = line.split_whitespace();
    let label = parts.next().unwrap_or_default();
    if label != format!("cpu{cpu}") {
        return Err(format!("expected row cpu{cpu}, found '{label}'"));
    }
    let mut fields = [0u64; 7];
    for (i, slot) in fields.iter_mut().enumerate() {
        let token = parts
            .next()
            .ok_or_else(|| format!("cpu{cpu} row has only {i} counters"))?;
        *slot = token
            .parse()
            .map_err(|_| format!("cpu{cpu} counter {i} is not an integer: '{token}'"))?;
    }
    let [user, nice, system, idle, iowait, irq, softirq] = fields;
    Ok(CpuStat {
        cpu,
        user,
        nice,
        system,
        idle,
        iowait,
        irq,
        softirq,
        total_util: 0.0,
    })
}

/// `/proc/meminfo` keyed by field name, values in kB.
#[derive(Debug, Clone)]
pub struct MemInfo {
    path: String,
    fields: HashMap<String, u64>,
}

impl MemInfo {
    pub fn read(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| StatsError::io(path.display(), e))?;
        Ok(Self::parse(&path.display().to_string(), &content))
    }

    /// Lines look like `MemTotal:       16384000 kB`; anything else is skipped.
    pub fn parse(path: &str, content: &str) -> Self {
        let fields = content
            .lines()
            .filter_map(|line| {
                let (key, rest) = line.split_once(':')?;
                let value = rest.split_whitespace().next()?.parse::<u64>().ok()?;
                Some((key.trim().to_string(), value))
            })
            .collect();
        Self {
            path: path.to_string(),
            fields,
        }
    }

    pub fn field(&self, name: &str) -> Result<u64> {
        self.fields
            .get(name)
            .copied()
            .ok_or_else(|| StatsError::MissingField {
                path: self.path.clone(),
                field: name.to_string(),
            })
    }

    pub fn ram(&self) -> Result<MemoryFigures> {
        Ok(MemoryFigures {
            total: self.field("MemTotal")?,
            free: self.field("MemFree")?,
            available: self.field("MemAvailable")?,
        })
    }

    pub fn swap(&self) -> Result<SwapFigures> {
        Ok(SwapFigures {
            total: self.field("SwapTotal")?,
            free: self.field("SwapFree")?,
        })
    }

    pub fn cma(&self) -> Result<CmaFigures> {
        Ok(CmaFigures {
            total: self.field("CmaTotal")?,
            free: self.field("CmaFree")?,
        })
    }
}

/// Parses a CPU list like `"0-3"` -> 4, `"0"` -> 1, `"0,2-3"` -> 3.
pub(super) fn parse_cpu_range(s: &str) -> Option<usize> {
    let mut total = 0usize;
    for part in s.trim().split(',') {
        let part = part.trim();
        if let Some((start, end)) = part.split_once('-') {
            let start: usize = start.trim().parse().ok()?;
            let end: usize = end.trim().parse().ok()?;
            total += end.checked_sub(start)? + 1;
        } else {
            let _: usize = part.parse().ok()?;
            total += 1;
        }
    }
    (total > 0).then_some(total)
}
