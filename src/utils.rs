use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use std::io;
use std::path::{Path, PathBuf};

const CACHE_DIR_NAME: &str = "frost_events_cache";

pub fn get_cache_dir() -> Result<PathBuf, io::Error> {
    dirs::cache_dir()
        .map(|p| p.join(CACHE_DIR_NAME))
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine system cache directory",
            )
        })
}

pub async fn ensure_cache_dir_exists(path: &Path) -> Result<(), io::Error> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_dir() => Ok(()),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("Cache path exists but is not a directory: {}", path.display()),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("Creating cache directory: {}", path.display());
            tokio::fs::create_dir_all(path).await
        }
        Err(e) => Err(e),
    }
}

/// Parses the timestamp layouts seen in Frost responses and CSV exports.
///
/// Values without an offset are taken to be UTC; bare dates resolve to midnight.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::<FixedOffset>::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for layout in [
        "%Y-%m-%dT%H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%.f%z",
        "%Y-%m-%d %H:%M:%S%:z",
    ] {
        if let Ok(dt) = DateTime::<FixedOffset>::parse_from_str(value, layout) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for layout in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, layout) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_timestamp_layouts() {
        let midnight = Utc.with_ymd_and_hms(2020, 8, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2020-08-01T00:00:00.000Z"), Some(midnight));
        assert_eq!(parse_timestamp("2020-08-01T02:00:00+02:00"), Some(midnight));
        assert_eq!(parse_timestamp("2020-08-01 00:00:00"), Some(midnight));
        assert_eq!(parse_timestamp("2020-08-01"), Some(midnight));
        assert_eq!(parse_timestamp(" 2020-08-01T00:00 "), Some(midnight));
    }

    #[test]
    fn test_parse_timestamp_compact_offset() {
        let midnight = Utc.with_ymd_and_hms(2020, 8, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_timestamp("2020-08-01T02:00:00+0200"), Some(midnight));
        assert_eq!(parse_timestamp("2020-08-01 02:00:00.000+0200"), Some(midnight));
        assert_eq!(
            parse_timestamp("2020-08-01T00:00:00+0200"),
            Some(Utc.with_ymd_and_hms(2020, 7, 31, 22, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2020-13-01"), None);
        assert_eq!(parse_timestamp(""), None);
    }
}
