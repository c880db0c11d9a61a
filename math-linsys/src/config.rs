//! Solver configuration loaded from JSON or TOML

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default singularity tolerance: any pivot or determinant below this is zero.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Default upper bound on the number of unknowns.
///
/// Cramer's Rule expands determinants by cofactors, which costs O(n!).
pub const DEFAULT_MAX_SIZE: usize = 8;

/// Default number of decimals for scalars in trace annotations.
pub const DEFAULT_PRECISION: usize = 6;

/// Settings shared by every solver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Singularity tolerance applied uniformly to pivots and determinants
    pub epsilon: f64,
    /// Largest accepted system size
    pub max_size: usize,
    /// Decimals used when rendering scalars in trace text
    pub precision: usize,
    /// Record the first-level cofactor expansion of det(A) in Cramer traces
    pub expand_cofactors: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_size: DEFAULT_MAX_SIZE,
            precision: DEFAULT_PRECISION,
            expand_cofactors: true,
        }
    }
}

impl SolverConfig {
    /// Start a builder from the defaults.
    pub fn builder() -> SolverConfigBuilder {
        SolverConfigBuilder::new()
    }

    /// Check that the values are usable by the solvers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "epsilon",
                reason: format!("must be finite and > 0, got {}", self.epsilon),
            });
        }
        if self.max_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_size",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Fluent builder for [`SolverConfig`].
pub struct SolverConfigBuilder {
    cfg: SolverConfig,
}

impl Default for SolverConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverConfigBuilder {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            cfg: SolverConfig::default(),
        }
    }
    /// Sets the singularity tolerance.
    pub fn epsilon(mut self, v: f64) -> Self {
        self.cfg.epsilon = v;
        self
    }
    /// Sets the largest accepted system size.
    pub fn max_size(mut self, v: usize) -> Self {
        self.cfg.max_size = v;
        self
    }
    /// Sets the number of decimals in trace annotations.
    pub fn precision(mut self, v: usize) -> Self {
        self.cfg.precision = v;
        self
    }
    /// Enables or disables the cofactor expansion step in Cramer traces.
    pub fn expand_cofactors(mut self, v: bool) -> Self {
        self.cfg.expand_cofactors = v;
        self
    }
    /// Validates and returns the configuration.
    pub fn build(self) -> Result<SolverConfig, ConfigError> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}

/// On-disk encoding of a [`SolverConfig`]: tolerance, size bound, display
/// precision and cofactor expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json`, as produced by `serde_json`
    Json,
    /// `.toml`, the usual hand-edited form
    Toml,
}

impl ConfigFormat {
    /// Encoding implied by the extension of `path`, compared case-insensitively.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("toml") {
            Some(Self::Toml)
        } else {
            None
        }
    }

    fn of(path: &Path) -> Result<Self, ConfigError> {
        Self::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))
    }
}

/// Read solver settings from a `.json` or `.toml` file.
///
/// Missing keys take their defaults. The result is validated: a non-positive
/// or non-finite `epsilon`, or a `max_size` of 0, is an error.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SolverConfig, ConfigError> {
    let path = path.as_ref();
    let format = ConfigFormat::of(path)?;
    parse_config(&fs::read_to_string(path)?, format)
}

/// Decode and validate solver settings from `content`.
pub fn parse_config(content: &str, format: ConfigFormat) -> Result<SolverConfig, ConfigError> {
    let decoded: Result<SolverConfig, String> = match format {
        ConfigFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };
    let config = decoded.map_err(ConfigError::ParseError)?;
    config.validate()?;
    Ok(config)
}

/// Write `config` to `path`, choosing the encoding from the extension.
pub fn save_config<P: AsRef<Path>>(config: &SolverConfig, path: P) -> Result<(), ConfigError> {
    let path = path.as_ref();
    let content = serialize_config(config, ConfigFormat::of(path)?)?;
    fs::write(path, content)?;
    log::debug!("solver settings written to {}", path.display());
    Ok(())
}

/// Encode `config` as pretty-printed JSON or TOML.
pub fn serialize_config(config: &SolverConfig, format: ConfigFormat) -> Result<String, ConfigError> {
    let encoded = match format {
        ConfigFormat::Json => serde_json::to_string_pretty(config).map_err(|e| e.to_string()),
        ConfigFormat::Toml => toml::to_string_pretty(config).map_err(|e| e.to_string()),
    };
    encoded.map_err(ConfigError::SerializeError)
}
