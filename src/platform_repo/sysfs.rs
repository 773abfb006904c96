// Scalar attribute readers and the line skipper for fixed-layout pseudo-files.

use crate::error::{Result, StatsError};
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// Builds `<base><id><suffix>`, e.g. `/sys/class/hwmon/hwmon` + `2` + `/name`.
pub fn attr_path(base: &str, id: impl std::fmt::Display, suffix: &str) -> PathBuf {
    PathBuf::from(format!("{base}{id}{suffix}"))
}

/// Reads the first whitespace-delimited token of a pseudo-file.
///
/// Open/read failures are returned before any parsing is attempted.
pub fn read_token(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path).map_err(|e| StatsError::io(path.display(), e))?;
    content
        .split_whitespace()
        .next()
        .map(str::to_string)
        .ok_or_else(|| StatsError::Parse {
            path: path.display().to_string(),
            detail: "file is empty".into(),
        })
}

pub fn read_int(path: &Path) -> Result<i64> {
    let token = read_token(path)?;
    token.parse::<i64>().map_err(|_| StatsError::Parse {
        path: path.display().to_string(),
        detail: format!("expected integer, got '{token}'"),
    })
}

pub fn read_float(path: &Path) -> Result<f64> {
    let token = read_token(path)?;
    token.parse::<f64>().map_err(|_| StatsError::Parse {
        path: path.display().to_string(),
        detail: format!("expected number, got '{token}'"),
    })
}

/// Consumes `count` newline-terminated records from `reader`.
///
/// Running out of input before `count` records is `UnexpectedEof`; callers
/// rely on landing exactly on a known row.
pub fn skip_lines<R: BufRead>(reader: &mut R, count: usize) -> std::io::Result<()> {
    let mut buf = Vec::new();
    for _ in 0..count {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("expected {count} lines"),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    #[test]
    fn attr_path_concatenates() {
        assert_eq!(
            attr_path("/sys/class/hwmon/hwmon", 3, "/in1_input"),
            PathBuf::from("/sys/class/hwmon/hwmon3/in1_input")
        );
    }

    #[test]
    fn reads_scalars() {
        let dir = tempfile::TempDir::new().unwrap();
        let int_path = dir.path().join("int");
        let float_path = dir.path().join("float");
        let name_path = dir.path().join("name");
        std::fs::write(&int_path, "-1250\n").unwrap();
        std::fs::write(&float_path, "1199999\n").unwrap();
        std::fs::write(&name_path, "ina260_u14\n").unwrap();

        assert_eq!(read_int(&int_path).unwrap(), -1250);
        assert_eq!(read_float(&float_path).unwrap(), 1_199_999.0);
        assert_eq!(read_token(&name_path).unwrap(), "ina260_u14");
    }

    #[test]
    fn missing_file_is_io_error_with_os_code() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = read_int(&dir.path().join("absent")).unwrap_err();
        assert!(err.is_fatal_io());
        assert_eq!(err.os_code(), Some(2));
    }

    #[test]
    fn garbage_is_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bad");
        std::fs::write(&path, "n/a\n").unwrap();
        assert!(matches!(read_int(&path), Err(StatsError::Parse { .. })));

        std::fs::write(&path, "\n").unwrap();
        assert!(matches!(read_token(&path), Err(StatsError::Parse { .. })));
    }

    #[test]
    fn skip_lines_lands_on_next_record() {
        let mut cursor = Cursor::new("a\nb\nc\n");
        skip_lines(&mut cursor, 2).unwrap();
        let mut rest = String::new();
        cursor.read_to_string(&mut rest).unwrap();
        assert_eq!(rest, "c\n");
    }

    #[test]
    fn skip_lines_past_end_fails() {
        let mut cursor = Cursor::new("only\n");
        let err = skip_lines(&mut cursor, 3).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }
}
