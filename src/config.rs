//! Dashboard Configuration
//! Chart limits and the color-scale clip percentile, overridable from disk.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// File checked next to the working directory on startup.
pub const CONFIG_FILE: &str = "homiscope.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Municipalities shown in the rate chart.
    pub rate_chart_limit: usize,
    /// Entries in each top/bottom ranking chart.
    pub ranking_limit: usize,
    /// Percentile used as the upper clip of the rate color scale.
    pub clip_percentile: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            rate_chart_limit: 30,
            ranking_limit: 10,
            clip_percentile: 95.0,
        }
    }
}

impl DashboardConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Config from `homiscope.json` if present and valid, defaults otherwise.
    pub fn load_or_default() -> Self {
        let path = Path::new(CONFIG_FILE);
        if path.is_file() {
            Self::load(path).unwrap_or_default()
        } else {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_dashboard_layout() {
        let config = DashboardConfig::default();
        assert_eq!(config.rate_chart_limit, 30);
        assert_eq!(config.ranking_limit, 10);
        assert_eq!(config.clip_percentile, 95.0);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"ranking_limit\": 15}}").unwrap();
        file.flush().unwrap();

        let config = DashboardConfig::load(file.path()).unwrap();
        assert_eq!(config.ranking_limit, 15);
        assert_eq!(config.rate_chart_limit, 30);
    }

    #[test]
    fn invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        file.flush().unwrap();

        assert!(DashboardConfig::load(file.path()).is_err());
    }
}
