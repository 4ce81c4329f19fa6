use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::projection::{
    DEFAULT_DISCOUNT_RATE, DEFAULT_YEARS, MAX_PROJECTION_YEARS, MIN_PROJECTION_YEARS,
};
use crate::scenario::ScenarioKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub projection: ProjectionConfig,
    #[serde(default)]
    pub assessment: AssessmentConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default = "default_years")]
    pub years: u32,
    #[serde(default = "default_discount_rate")]
    pub discount_rate: f64,
    #[serde(default)]
    pub initial_investment: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentConfig {
    #[serde(default = "default_scenario")]
    pub default_scenario: String,
    #[serde(default)]
    pub apply_guardrail_scaling: bool,
    #[serde(default = "default_true")]
    pub clamp_inputs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub default_scenario: Option<String>,
    pub apply_guardrail_scaling: Option<bool>,
    pub discount_rate: Option<f64>,
    pub years: Option<u32>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/ai-roi/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let mut parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        parsed.bound_projection_years();
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(scenario) = overrides.default_scenario {
            self.assessment.default_scenario = scenario;
        }
        if let Some(scale) = overrides.apply_guardrail_scaling {
            self.assessment.apply_guardrail_scaling = scale;
        }
        if let Some(rate) = overrides.discount_rate {
            self.projection.discount_rate = rate;
        }
        if let Some(years) = overrides.years {
            self.projection.years = years;
        }
        self.bound_projection_years();
    }

    fn bound_projection_years(&mut self) {
        let years = self
            .projection
            .years
            .clamp(MIN_PROJECTION_YEARS, MAX_PROJECTION_YEARS);
        if years != self.projection.years {
            warn!(
                requested = self.projection.years,
                years, "projection years out of range, clamping"
            );
            self.projection.years = years;
        }
    }

    /// Unknown names fall back to the base scenario.
    pub fn default_scenario(&self) -> ScenarioKind {
        match ScenarioKind::from_str(&self.assessment.default_scenario) {
            Ok(kind) => kind,
            Err(err) => {
                warn!("{err}; using base scenario");
                ScenarioKind::Base
            }
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[projection]
years = 3
discount_rate = 0.10
initial_investment = 0.0

[assessment]
# base | conservative | optimistic | custom
default_scenario = "base"
apply_guardrail_scaling = false
clamp_inputs = true

[server]
host = "127.0.0.1"
port = 3001
"#;
        template.to_string()
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            years: default_years(),
            discount_rate: default_discount_rate(),
            initial_investment: 0.0,
        }
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            default_scenario: default_scenario(),
            apply_guardrail_scaling: false,
            clamp_inputs: true,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_years() -> u32 {
    DEFAULT_YEARS
}

fn default_discount_rate() -> f64 {
    DEFAULT_DISCOUNT_RATE
}

fn default_scenario() -> String {
    "base".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3001
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_parses_to_defaults() {
        let parsed: Config = toml::from_str(&Config::default_template()).expect("template parses");
        assert_eq!(parsed.projection.years, 3);
        assert_eq!(parsed.projection.discount_rate, 0.10);
        assert_eq!(parsed.default_scenario(), ScenarioKind::Base);
        assert!(parsed.assessment.clamp_inputs);
        assert!(!parsed.assessment.apply_guardrail_scaling);
        assert_eq!(parsed.server.port, 3001);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let parsed: Config =
            toml::from_str("[assessment]\ndefault_scenario = \"optimistic\"\n").expect("parse");
        assert_eq!(parsed.default_scenario(), ScenarioKind::Optimistic);
        assert!(parsed.assessment.clamp_inputs);
        assert_eq!(parsed.projection.years, 3);
    }

    #[test]
    fn unknown_scenario_falls_back_to_base() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            default_scenario: Some("moonshot".to_string()),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.default_scenario(), ScenarioKind::Base);
    }

    #[test]
    fn overrides_replace_loaded_values() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            default_scenario: Some("conservative".to_string()),
            apply_guardrail_scaling: Some(true),
            discount_rate: Some(0.08),
            years: Some(5),
        });
        assert_eq!(config.default_scenario(), ScenarioKind::Conservative);
        assert!(config.assessment.apply_guardrail_scaling);
        assert_eq!(config.projection.discount_rate, 0.08);
        assert_eq!(config.projection.years, 5);
    }

    #[test]
    fn projection_years_are_clamped_on_override() {
        let mut config = Config::default();
        config.apply_overrides(ConfigOverrides {
            years: Some(4_000_000_000),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.projection.years, MAX_PROJECTION_YEARS);

        config.apply_overrides(ConfigOverrides {
            years: Some(0),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.projection.years, MIN_PROJECTION_YEARS);
    }

    #[test]
    fn oversized_years_in_file_are_clamped() {
        let path = std::env::temp_dir().join("ai-roi-oversized-years-config.toml");
        fs::write(&path, "[projection]\nyears = 4000000000\n").expect("write config");
        let config = Config::load(Some(&path)).expect("load");
        let _ = fs::remove_file(&path);
        assert_eq!(config.projection.years, MAX_PROJECTION_YEARS);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let path = std::env::temp_dir().join("ai-roi-missing-config-for-test.toml");
        let config = Config::load(Some(&path)).expect("defaults");
        assert_eq!(config.projection.years, 3);
    }
}
