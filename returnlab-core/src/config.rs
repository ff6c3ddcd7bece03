//! Scenario configuration: which symbols, which dates, which chart titles.
//!
//! Stored as TOML. The default scenario is SPY and XOM over July 2012.

use crate::data::{DataError, DEFAULT_REFERENCE};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub symbols: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    #[serde(default = "default_reference")]
    pub reference_symbol: String,
    #[serde(default)]
    pub charts: ChartTitles,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartTitles {
    pub prices_title: String,
    pub daily_title: String,
    pub cumulative_title: String,
}

impl Default for ChartTitles {
    fn default() -> Self {
        Self {
            prices_title: "Filled Stock Prices".into(),
            daily_title: "Daily Returns".into(),
            cumulative_title: "Cumulative Returns".into(),
        }
    }
}

fn default_reference() -> String {
    DEFAULT_REFERENCE.to_string()
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            symbols: vec!["SPY".into(), "XOM".into()],
            start: NaiveDate::from_ymd_opt(2012, 7, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2012, 7, 31).unwrap_or_default(),
            reference_symbol: default_reference(),
            charts: ChartTitles::default(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_file(path: &Path) -> Result<Self, DataError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DataError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, DataError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| DataError::Config(format!("parse scenario TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, DataError> {
        toml::to_string_pretty(self)
            .map_err(|e| DataError::Config(format!("serialize scenario: {e}")))
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if self.symbols.is_empty() {
            return Err(DataError::Config("symbols must not be empty".into()));
        }
        if let Some(blank) = self.symbols.iter().position(|s| s.trim().is_empty()) {
            return Err(DataError::Config(format!("symbol #{} is blank", blank + 1)));
        }
        if self.reference_symbol.trim().is_empty() {
            return Err(DataError::Config("reference_symbol must not be blank".into()));
        }
        if self.start > self.end {
            return Err(DataError::InvalidRange(format!(
                "start {} is after end {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}
