use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level knockoff configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KnockoffConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Chain model.
    pub model: ModelToml,

    /// Sampler settings.
    #[serde(default)]
    pub sampler: SamplerToml,
}

/// Chain model: either explicit per-step `transitions`, or one `matrix`
/// repeated to a sequence of `length` positions.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelToml {
    pub init_p: Vec<f64>,
    #[serde(default)]
    pub transitions: Option<Vec<Vec<Vec<f64>>>>,
    #[serde(default)]
    pub matrix: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub length: Option<usize>,
    #[serde(default)]
    pub check_probabilities: bool,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    1e-6
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SamplerToml {
    #[serde(default = "default_min_partition")]
    pub min_partition: f64,
    #[serde(default = "default_on_row_error")]
    pub on_row_error: String,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

impl Default for SamplerToml {
    fn default() -> Self {
        Self {
            min_partition: default_min_partition(),
            on_row_error: default_on_row_error(),
            parallel: false,
            chunk_size: default_chunk_size(),
        }
    }
}

fn default_min_partition() -> f64 {
    f64::MIN_POSITIVE
}
fn default_on_row_error() -> String {
    "abort".to_string()
}
fn default_chunk_size() -> usize {
    256
}

/// Reads and parses a TOML config file.
pub fn load(path: &Path) -> Result<KnockoffConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse config TOML: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg: KnockoffConfig = toml::from_str(
            r#"
            [model]
            init_p = [0.5, 0.5]
            matrix = [[0.9, 0.1], [0.1, 0.9]]
            length = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.model.length, Some(3));
        assert!(cfg.model.transitions.is_none());
        assert!(!cfg.model.check_probabilities);
        assert_eq!(cfg.model.tolerance, 1e-6);
        assert_eq!(cfg.sampler.min_partition, f64::MIN_POSITIVE);
        assert_eq!(cfg.sampler.on_row_error, "abort");
        assert!(!cfg.sampler.parallel);
        assert_eq!(cfg.sampler.chunk_size, 256);
    }

    #[test]
    fn full_config() {
        let cfg: KnockoffConfig = toml::from_str(
            r#"
            seed = 42

            [model]
            init_p = [0.2, 0.8]
            transitions = [
              [[0.9, 0.1], [0.1, 0.9]],
              [[0.5, 0.5], [0.5, 0.5]],
            ]
            check_probabilities = true
            tolerance = 1e-9

            [sampler]
            min_partition = 1e-300
            on_row_error = "skip"
            parallel = true
            chunk_size = 16
            "#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.model.transitions.as_ref().map(Vec::len), Some(2));
        assert!(cfg.model.check_probabilities);
        assert_eq!(cfg.sampler.on_row_error, "skip");
        assert!(cfg.sampler.parallel);
        assert_eq!(cfg.sampler.chunk_size, 16);
    }

    #[test]
    fn unknown_field_rejected() {
        let result: Result<KnockoffConfig, _> = toml::from_str(
            r#"
            [model]
            init_p = [1.0]
            matrix = [[1.0]]
            length = 2
            lenght = 3
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn model_section_required() {
        let result: Result<KnockoffConfig, _> = toml::from_str("seed = 1");
        assert!(result.is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(format!("{err:#}").starts_with("failed to read config"));
    }
}
