use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::intake::{DEFAULT_FALLBACK_QUANTITY, DEFAULT_VOCABULARY};
use crate::matching::scorer::default_keyword_weights;
use crate::matching::verify::DEFAULT_CRITICAL_KEYWORDS;
use crate::matching::DEFAULT_TOP_K;
use crate::pricing::DiscountTier;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub pipeline: PipelineConfig,
    pub logging: LoggingConfig,
}

/// Every table the pipeline consults (vocabulary, keyword weights, critical
/// keywords, discount tiers) lives here rather than in module constants, so
/// a deployment can swap them without touching pipeline logic.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    pub fallback_quantity: u32,
    pub top_k: usize,
    pub vocabulary: Vec<String>,
    pub keyword_weights: Vec<(String, f64)>,
    pub critical_keywords: Vec<String>,
    pub discount_tiers: Vec<DiscountTier>,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub fallback_quantity: Option<u32>,
    pub top_k: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    pipeline: Option<PipelinePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct PipelinePatch {
    fallback_quantity: Option<u32>,
    top_k: Option<usize>,
    vocabulary: Option<Vec<String>>,
    keyword_weights: Option<BTreeMap<String, f64>>,
    critical_keywords: Option<Vec<String>>,
    discount_tiers: Option<Vec<DiscountTier>>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig {
                fallback_quantity: DEFAULT_FALLBACK_QUANTITY,
                top_k: DEFAULT_TOP_K,
                vocabulary: DEFAULT_VOCABULARY.iter().map(|term| (*term).to_owned()).collect(),
                keyword_weights: default_keyword_weights(),
                critical_keywords: DEFAULT_CRITICAL_KEYWORDS
                    .iter()
                    .map(|kw| (*kw).to_owned())
                    .collect(),
                discount_tiers: DiscountTier::default_tiers(),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("bidforge.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(pipeline) = patch.pipeline {
            if let Some(fallback_quantity) = pipeline.fallback_quantity {
                self.pipeline.fallback_quantity = fallback_quantity;
            }
            if let Some(top_k) = pipeline.top_k {
                self.pipeline.top_k = top_k;
            }
            if let Some(vocabulary) = pipeline.vocabulary {
                self.pipeline.vocabulary = vocabulary;
            }
            if let Some(keyword_weights) = pipeline.keyword_weights {
                self.pipeline.keyword_weights = keyword_weights.into_iter().collect();
            }
            if let Some(critical_keywords) = pipeline.critical_keywords {
                self.pipeline.critical_keywords = critical_keywords;
            }
            if let Some(discount_tiers) = pipeline.discount_tiers {
                self.pipeline.discount_tiers = discount_tiers;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("BIDFORGE_FALLBACK_QUANTITY") {
            self.pipeline.fallback_quantity = parse_u32("BIDFORGE_FALLBACK_QUANTITY", &value)?;
        }
        if let Some(value) = read_env("BIDFORGE_TOP_K") {
            self.pipeline.top_k = parse_u32("BIDFORGE_TOP_K", &value)? as usize;
        }

        let log_level =
            read_env("BIDFORGE_LOGGING_LEVEL").or_else(|| read_env("BIDFORGE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("BIDFORGE_LOGGING_FORMAT").or_else(|| read_env("BIDFORGE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
        if let Some(fallback_quantity) = overrides.fallback_quantity {
            self.pipeline.fallback_quantity = fallback_quantity;
        }
        if let Some(top_k) = overrides.top_k {
            self.pipeline.top_k = top_k;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pipeline(&self.pipeline)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("bidforge.toml"), PathBuf::from("config/bidforge.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_pipeline(pipeline: &PipelineConfig) -> Result<(), ConfigError> {
    if pipeline.fallback_quantity == 0 {
        return Err(ConfigError::Validation(
            "pipeline.fallback_quantity must be greater than zero".to_string(),
        ));
    }
    if pipeline.top_k == 0 {
        return Err(ConfigError::Validation(
            "pipeline.top_k must be greater than zero".to_string(),
        ));
    }
    if pipeline.vocabulary.is_empty() {
        return Err(ConfigError::Validation(
            "pipeline.vocabulary must not be empty".to_string(),
        ));
    }
    if pipeline.keyword_weights.is_empty() {
        return Err(ConfigError::Validation(
            "pipeline.keyword_weights must not be empty".to_string(),
        ));
    }
    for (keyword, weight) in &pipeline.keyword_weights {
        if !weight.is_finite() || *weight <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "pipeline.keyword_weights entry `{keyword}` must be a positive finite number"
            )));
        }
    }
    if pipeline.critical_keywords.is_empty() {
        return Err(ConfigError::Validation(
            "pipeline.critical_keywords must not be empty".to_string(),
        ));
    }
    for window in pipeline.discount_tiers.windows(2) {
        if window[0].min_quantity <= window[1].min_quantity {
            return Err(ConfigError::Validation(
                "pipeline.discount_tiers must be sorted by strictly descending threshold"
                    .to_string(),
            ));
        }
    }
    for tier in &pipeline.discount_tiers {
        if tier.fraction < Decimal::ZERO || tier.fraction >= Decimal::ONE {
            return Err(ConfigError::Validation(format!(
                "pipeline.discount_tiers fraction {} for threshold {} is outside [0, 1)",
                tier.fraction, tier.min_quantity
            )));
        }
    }
    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Mutex, OnceLock};

    use crate::config::{AppConfig, ConfigError, LoadOptions, LogFormat};

    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }

    #[test]
    fn defaults_load_without_a_config_file() {
        let _guard = env_lock().lock().expect("env lock");
        let config = AppConfig::load(LoadOptions::default()).expect("defaults are valid");

        assert_eq!(config.pipeline.fallback_quantity, 500);
        assert_eq!(config.pipeline.top_k, 3);
        assert_eq!(config.pipeline.discount_tiers.len(), 3);
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn file_patch_overrides_defaults() {
        let _guard = env_lock().lock().expect("env lock");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            r#"
[pipeline]
fallback_quantity = 250
top_k = 5

[pipeline.keyword_weights]
marine = 3.0
coating = 1.5

[[pipeline.discount_tiers]]
min_quantity = 1000
fraction = "0.10"

[logging]
level = "debug"
format = "json"
"#
        )
        .expect("write config");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            ..LoadOptions::default()
        })
        .expect("patched config is valid");

        assert_eq!(config.pipeline.fallback_quantity, 250);
        assert_eq!(config.pipeline.top_k, 5);
        assert_eq!(config.pipeline.keyword_weights.len(), 2);
        assert_eq!(config.pipeline.discount_tiers.len(), 1);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let _guard = env_lock().lock().expect("env lock");
        let error = AppConfig::load(LoadOptions {
            config_path: Some("does-not-exist.toml".into()),
            require_file: true,
            ..LoadOptions::default()
        })
        .expect_err("missing required file");

        assert!(matches!(error, ConfigError::MissingConfigFile(_)));
    }

    #[test]
    fn env_overrides_beat_the_file() {
        let _guard = env_lock().lock().expect("env lock");
        std::env::set_var("BIDFORGE_TOP_K", "7");
        std::env::set_var("BIDFORGE_LOG_FORMAT", "pretty");

        let config = AppConfig::load(LoadOptions::default()).expect("env overrides are valid");

        std::env::remove_var("BIDFORGE_TOP_K");
        std::env::remove_var("BIDFORGE_LOG_FORMAT");

        assert_eq!(config.pipeline.top_k, 7);
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn invalid_env_override_is_rejected() {
        let _guard = env_lock().lock().expect("env lock");
        std::env::set_var("BIDFORGE_FALLBACK_QUANTITY", "lots");

        let error = AppConfig::load(LoadOptions::default()).expect_err("non-numeric quantity");
        std::env::remove_var("BIDFORGE_FALLBACK_QUANTITY");

        assert!(matches!(error, ConfigError::InvalidEnvOverride { .. }));
    }

    #[test]
    fn zero_top_k_fails_validation() {
        let _guard = env_lock().lock().expect("env lock");
        let mut config = AppConfig::default();
        config.pipeline.top_k = 0;

        let error = config.validate().expect_err("top_k = 0 is invalid");
        assert!(error.to_string().contains("top_k"));
    }

    #[test]
    fn unterminated_interpolation_is_rejected() {
        let _guard = env_lock().lock().expect("env lock");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "[logging]\nlevel = \"${{UNTERMINATED").expect("write config");

        let error = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
            require_file: true,
            ..LoadOptions::default()
        })
        .expect_err("unterminated interpolation");

        assert!(matches!(error, ConfigError::UnterminatedInterpolation));
    }
}
