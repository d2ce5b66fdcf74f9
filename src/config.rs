//! Directory configuration.
//!
//! Every setting has a default, so a config file is optional. When one is
//! given it is TOML:
//!
//! ```toml
//! min_year = 2007
//! years_ahead = 5
//! max_photo_bytes = 307200
//! ```

use std::fs;
use std::path::Path;

use chrono::Datelike;
use serde::Deserialize;

use crate::error::DirectoryError;

/// Earliest cohort the directory knows about.
pub const DEFAULT_MIN_YEAR: u16 = 2007;
/// How far past the current year the year selects reach.
pub const DEFAULT_YEARS_AHEAD: u16 = 5;
/// 300 KB.
pub const DEFAULT_MAX_PHOTO_BYTES: u64 = 300 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirectoryConfig {
    pub min_year: u16,
    pub years_ahead: u16,
    pub max_photo_bytes: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            min_year: DEFAULT_MIN_YEAR,
            years_ahead: DEFAULT_YEARS_AHEAD,
            max_photo_bytes: DEFAULT_MAX_PHOTO_BYTES,
        }
    }
}

impl DirectoryConfig {
    /// Load the config from `path`, or return the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, DirectoryError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| DirectoryError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse config text.
    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Override `years_ahead` when a value is given, e.g. from a CLI flag.
    pub fn with_years_ahead(mut self, years_ahead: Option<u16>) -> Self {
        if let Some(years_ahead) = years_ahead {
            self.years_ahead = years_ahead;
        }
        self
    }
}

/// Inclusive range of selectable years.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub min: u16,
    pub max: u16,
}

impl YearRange {
    pub fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    /// The range for today: `min_year` up to the current year plus `years_ahead`.
    pub fn current(config: &DirectoryConfig) -> Self {
        let this_year = u16::try_from(chrono::Local::now().year()).unwrap_or(u16::MAX);
        Self::new(config.min_year, this_year.saturating_add(config.years_ahead))
    }

    pub fn contains(&self, year: u16) -> bool {
        (self.min..=self.max).contains(&year)
    }

    /// Years as offered by the form selects, newest first.
    pub fn options(&self) -> Vec<u16> {
        (self.min..=self.max).rev().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DirectoryConfig::default();
        assert_eq!(config.min_year, 2007);
        assert_eq!(config.years_ahead, 5);
        assert_eq!(config.max_photo_bytes, 307_200);
    }

    #[test]
    fn test_parse_partial_file_keeps_defaults() {
        let config = DirectoryConfig::parse("years_ahead = 1\n").unwrap();
        assert_eq!(config.years_ahead, 1);
        assert_eq!(config.min_year, DEFAULT_MIN_YEAR);
    }

    #[test]
    fn test_parse_rejects_unknown_key() {
        assert!(DirectoryConfig::parse("min_yaer = 2000\n").is_err());
    }

    #[test]
    fn test_load_without_path() {
        assert_eq!(
            DirectoryConfig::load(None).unwrap(),
            DirectoryConfig::default()
        );
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_year = 2010").unwrap();
        writeln!(file, "max_photo_bytes = 1024").unwrap();
        let config = DirectoryConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.min_year, 2010);
        assert_eq!(config.max_photo_bytes, 1024);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DirectoryConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(err, DirectoryError::Io { .. }));
    }

    #[test]
    fn test_load_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_year = \"soon\"").unwrap();
        let err = DirectoryConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, DirectoryError::Config { .. }));
    }

    #[test]
    fn test_year_options_newest_first() {
        let range = YearRange::new(2007, 2010);
        assert_eq!(range.options(), vec![2010, 2009, 2008, 2007]);
        assert!(range.contains(2007));
        assert!(range.contains(2010));
        assert!(!range.contains(2006));
        assert!(!range.contains(2011));
    }

    #[test]
    fn test_current_range_reaches_ahead() {
        let config = DirectoryConfig::default();
        let range = YearRange::current(&config);
        let this_year = chrono::Local::now().year() as u16;
        assert_eq!(range.min, 2007);
        assert_eq!(range.max, this_year + 5);
    }

    #[test]
    fn test_years_ahead_override() {
        let this_year = chrono::Local::now().year() as u16;
        let config = DirectoryConfig::parse("years_ahead = 3\n").unwrap();

        let kept = config.clone().with_years_ahead(None);
        assert_eq!(YearRange::current(&kept).max, this_year + 3);

        let overridden = config.with_years_ahead(Some(0));
        assert_eq!(overridden.years_ahead, 0);
        assert_eq!(YearRange::current(&overridden).max, this_year);
        assert_eq!(overridden.min_year, DEFAULT_MIN_YEAR);
    }
}
