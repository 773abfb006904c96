// Error types for procfs/sysfs readers and reporters.

/// Errors that can occur while reading platform telemetry.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// A procfs or sysfs file could not be opened or read.
    #[error("unable to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The file was readable but its content is not in the expected shape.
    #[error("failed to parse {path}: {detail}")]
    Parse { path: String, detail: String },

    /// A `/proc/meminfo` key the reporter depends on is absent.
    #[error("{field} not found in {path}")]
    MissingField { path: String, field: String },

    /// The sysfs class directory does not exist on this hardware.
    #[error("{path} is not available on this platform")]
    NotAvailable { path: String },

    /// A sample window could not be reserved.
    #[error("cannot allocate a {capacity}-sample window: {source}")]
    Allocation {
        capacity: usize,
        source: std::collections::TryReserveError,
    },

    /// Both `/proc/stat` samples carry the same tick count.
    #[error("no ticks elapsed between samples for cpu{cpu}")]
    NoElapsedTicks { cpu: usize },
}

impl StatsError {
    pub(crate) fn io(path: impl std::fmt::Display, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_string(),
            source,
        }
    }

    /// OS error code carried by an I/O failure, if any.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            Self::Io { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }

    /// Whether this failure should decide the process exit status.
    pub fn is_fatal_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;
