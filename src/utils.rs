use std::{error, io::Write, path::Path, path::PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::config::BoardConfig;

const DUE_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Path of the optional config file, `~/.item-board/config.json`
pub fn config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".item-board");
    path.push("config.json");

    Some(path)
}

/// Read the config file from its default location, if there is one
pub fn read_config_file() -> Option<BoardConfig> {
    let path = config_path()?;

    if !path.exists() {
        return None;
    }

    match read_config_from(&path) {
        Ok(config) => Some(config),
        Err(e) => {
            log::warn!("Ignoring unreadable config {}: {}", path.display(), e);
            None
        }
    }
}

pub fn read_config_from(path: &Path) -> Result<BoardConfig, Box<dyn error::Error>> {
    let contents = std::fs::read_to_string(path)?;

    let config: BoardConfig = serde_json::from_str(contents.as_str())?;

    Ok(config)
}

/// Saves the config at `path`, creating the parent directory if needed
pub fn save_config_to(path: &Path, config: &BoardConfig) -> Result<(), Box<dyn error::Error>> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    let data = serde_json::to_string_pretty(config)?;

    file.write_all(data.as_bytes())?;

    Ok(())
}

/// Builds a full api url for `resource`.
/// `base` is either `host:port` or a url carrying its own scheme.
pub fn make_api_url(base: &str, resource: &str) -> String {
    let base = base.trim_end_matches('/');

    if base.starts_with("http://") || base.starts_with("https://") {
        format!("{}/api/{}", base, resource)
    } else {
        format!("http://{}/api/{}", base, resource)
    }
}

/// Parses a user id the way the create form requires it: a positive integer
pub fn parse_user_id(input: &str) -> Option<u64> {
    input.trim().parse::<u64>().ok().filter(|id| *id > 0)
}

/// Formats a due date in the given time zone.
///
/// Full timestamps keep their offset, a bare date is read as UTC midnight and
/// a date-time without offset is read as wall time in `tz`. Anything else is
/// returned unchanged.
pub fn format_due_date<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(tz).format(DUE_DATE_FORMAT).to_string();
    }

    for pattern in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, pattern) {
            if let Some(dt) = tz.from_local_datetime(&naive).earliest() {
                return dt.format(DUE_DATE_FORMAT).to_string();
            }
        }
    }

    if let Some(midnight) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Utc
            .from_utc_datetime(&midnight)
            .with_timezone(tz)
            .format(DUE_DATE_FORMAT)
            .to_string();
    }

    raw.to_string()
}
