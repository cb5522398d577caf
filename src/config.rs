use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::{AcademicPolicy, ScoringWeights, DEFAULT_MERIT_THRESHOLD};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub recommendations: RecommendationSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSettings {
    /// Bundled JSON catalog, also the fallback when the remote fails
    pub local_path: String,
    pub remote: Option<RemoteCatalogSettings>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCatalogSettings {
    pub endpoint: String,
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
}

fn default_timeout_secs() -> u64 { 10 }
fn default_cache_ttl_secs() -> u64 { 300 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default)]
    pub academic: AcademicConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_academic_weight")]
    pub academic: f64,
    #[serde(default = "default_program_weight")]
    pub program: f64,
    #[serde(default = "default_city_weight")]
    pub city: f64,
    #[serde(default = "default_type_weight")]
    pub institution_type: f64,
    #[serde(default = "default_entry_test_weight")]
    pub entry_test: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            academic: default_academic_weight(),
            program: default_program_weight(),
            city: default_city_weight(),
            institution_type: default_type_weight(),
            entry_test: default_entry_test_weight(),
        }
    }
}

fn default_academic_weight() -> f64 { 0.40 }
fn default_program_weight() -> f64 { 0.25 }
fn default_city_weight() -> f64 { 0.15 }
fn default_type_weight() -> f64 { 0.10 }
fn default_entry_test_weight() -> f64 { 0.10 }

impl From<&WeightsConfig> for ScoringWeights {
    fn from(w: &WeightsConfig) -> Self {
        ScoringWeights {
            academic: w.academic,
            program: w.program,
            city: w.city,
            institution_type: w.institution_type,
            entry_test: w.entry_test,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AcademicConfig {
    #[serde(default = "default_comfort_margin")]
    pub comfort_margin: f64,
    #[serde(default = "default_threshold")]
    pub default_threshold: f64,
}

impl Default for AcademicConfig {
    fn default() -> Self {
        Self {
            comfort_margin: default_comfort_margin(),
            default_threshold: default_threshold(),
        }
    }
}

fn default_comfort_margin() -> f64 { 5.0 }
fn default_threshold() -> f64 { DEFAULT_MERIT_THRESHOLD }

impl From<&AcademicConfig> for AcademicPolicy {
    fn from(a: &AcademicConfig) -> Self {
        AcademicPolicy {
            comfort_margin: a.comfort_margin,
            default_threshold: a.default_threshold,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u16 { 50 }
fn default_max_limit() -> u16 { 500 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with UNIMATCH_)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., UNIMATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("UNIMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize::<Settings>()?.validated()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("UNIMATCH")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize::<Settings>()?.validated()
    }

    fn validated(self) -> Result<Self, ConfigError> {
        if !ScoringWeights::from(&self.scoring.weights).is_valid() {
            return Err(ConfigError::Message(
                "scoring weights must be finite, non-negative, with a positive academic weight, \
                 and ordered academic >= program >= city >= institution_type >= entry_test".into(),
            ));
        }
        let academic = &self.scoring.academic;
        if !academic.comfort_margin.is_finite() || academic.comfort_margin < 0.0 {
            return Err(ConfigError::Message("scoring.academic.comfort_margin must be >= 0".into()));
        }
        if !(0.0..=100.0).contains(&academic.default_threshold) {
            return Err(ConfigError::Message(
                "scoring.academic.default_threshold must be within 0..=100".into(),
            ));
        }
        if self.recommendations.default_limit == 0
            || self.recommendations.default_limit > self.recommendations.max_limit {
            return Err(ConfigError::Message(
                "recommendations.default_limit must be within 1..=max_limit".into(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.academic, 0.40);
        assert_eq!(weights.program, 0.25);
        assert_eq!(weights.city, 0.15);
        assert_eq!(weights.institution_type, 0.10);
        assert_eq!(weights.entry_test, 0.10);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_load_bundled_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        let settings = Settings::load_from(path).unwrap();

        assert_eq!(settings.server.port, 8080);
        assert!(settings.catalog.remote.is_none());
        assert_eq!(AcademicPolicy::from(&settings.scoring.academic), AcademicPolicy::default());
    }

    #[test]
    fn test_negative_weight_rejected() {
        let settings = Settings {
            server: ServerSettings { host: "127.0.0.1".into(), port: 8080, workers: None },
            catalog: CatalogSettings { local_path: "data/universities.json".into(), remote: None },
            scoring: ScoringSettings {
                weights: WeightsConfig { city: -1.0, ..Default::default() },
                academic: AcademicConfig::default(),
            },
            recommendations: RecommendationSettings::default(),
            logging: LoggingSettings::default(),
        };
        assert!(settings.validated().is_err());
    }

    #[test]
    fn test_inverted_weights_rejected() {
        let settings = Settings {
            server: ServerSettings { host: "127.0.0.1".into(), port: 8080, workers: None },
            catalog: CatalogSettings { local_path: "data/universities.json".into(), remote: None },
            scoring: ScoringSettings {
                weights: WeightsConfig {
                    academic: 0.05,
                    program: 0.10,
                    city: 0.15,
                    institution_type: 0.20,
                    entry_test: 0.95,
                },
                academic: AcademicConfig::default(),
            },
            recommendations: RecommendationSettings::default(),
            logging: LoggingSettings::default(),
        };
        assert!(settings.validated().is_err());
    }

    #[test]
    fn test_inverted_weights_file_rejected() {
        let path = std::env::temp_dir().join(format!("unimatch-weights-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            r#"
[server]
host = "127.0.0.1"
port = 8080

[catalog]
local_path = "data/universities.json"

[scoring.weights]
academic = 0.05
program = 0.10
city = 0.15
institution_type = 0.20
entry_test = 0.95
"#,
        )
        .unwrap();

        let result = Settings::load_from(&path);
        let _ = std::fs::remove_file(&path);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("scoring weights"), "{}", err);
    }

    #[test]
    fn test_equal_and_zero_weights_accepted() {
        let weights = ScoringWeights {
            academic: 0.5,
            program: 0.5,
            city: 0.0,
            institution_type: 0.0,
            entry_test: 0.0,
        };
        assert!(weights.is_valid());
    }
}
