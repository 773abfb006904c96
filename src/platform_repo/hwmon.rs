// hwmon device enumeration and name -> id resolution

use crate::error::{Result, StatsError};
use crate::models::HwmonDevice;
use std::path::Path;

use super::sysfs::{attr_path, read_token};

/// Counts entries of the hwmon class directory whose name contains `hwmon`.
pub(super) fn count_devices(class_dir: &Path) -> Result<u32> {
    let entries = std::fs::read_dir(class_dir).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            StatsError::NotAvailable {
                path: class_dir.display().to_string(),
            }
        } else {
            StatsError::io(class_dir.display(), e)
        }
    })?;
    let count = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().contains("hwmon"))
        .count();
    Ok(count as u32)
}

/// Walks ids `0..count` and returns the first device whose `name` equals `target`.
///
/// Ids whose `name` attribute cannot be read are skipped.
pub(super) fn resolve(class_dir: &Path, target: &str) -> Result<Option<HwmonDevice>> {
    let count = count_devices(class_dir)?;
    let base = format!("{}/hwmon", class_dir.display());
    for id in 0..count {
        let name = match read_token(&attr_path(&base, id, "/name")) {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!(hwmon_id = id, error = %e, "skipping hwmon device");
                continue;
            }
        };
        tracing::debug!(hwmon_id = id, device_name = %name, "inspecting hwmon device");
        if name == target {
            return Ok(Some(HwmonDevice { id, name }));
        }
    }
    Ok(None)
}
