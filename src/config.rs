//! Engine configuration
//!
//! Loaded from JSON; every section and field falls back to its default, so
//! an empty object `{}` is a valid configuration.

use crate::algo::PropagationConfig;
use crate::graph::{Graph, GraphKind};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Random sampling settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Fixed seed for reproducible runs (None = seeded from entropy)
    pub seed: Option<u64>,
}

impl SamplingConfig {
    /// Generator for edge thinning and other randomized operations
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Kind given to graphs created through `new_graph`
    pub default_kind: GraphKind,
    /// Propagation engine settings
    pub propagation: PropagationConfig,
    /// Random sampling settings
    pub sampling: SamplingConfig,
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&contents)?;
        info!(
            path = %path.display(),
            kind = %config.default_kind,
            parallel = config.propagation.parallel,
            seeded = config.sampling.seed.is_some(),
            "loaded engine configuration"
        );
        Ok(config)
    }

    /// Empty graph of the configured default kind
    pub fn new_graph(&self, name: impl Into<String>) -> Graph {
        Graph::with_name(self.default_kind, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.default_kind, GraphKind::UndirectedUnweighted);
        assert!(config.propagation.parallel);
        assert_eq!(config.sampling.seed, None);
    }

    #[test]
    fn test_partial_sections() {
        let config = EngineConfig::from_json_str(
            r#"{
                "default_kind": "directed_weighted",
                "propagation": { "parallel_threshold": 16 },
                "sampling": { "seed": 99 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.default_kind, GraphKind::DirectedWeighted);
        assert_eq!(config.propagation.parallel_threshold, 16);
        assert!(config.propagation.parallel);
        assert_eq!(config.sampling.seed, Some(99));

        let graph = config.new_graph("g");
        assert!(graph.is_directed());
        assert!(graph.is_weighted());
        assert_eq!(graph.name(), "g");
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let sampling = SamplingConfig { seed: Some(5) };
        let a: Vec<u32> = sampling.rng().sample_iter(rand::distributions::Standard).take(4).collect();
        let b: Vec<u32> = sampling.rng().sample_iter(rand::distributions::Standard).take(4).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_kind": "undirected_weighted"}}"#).unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        assert_eq!(config.default_kind, GraphKind::UndirectedWeighted);
    }

    #[test]
    fn test_load_errors() {
        let missing = EngineConfig::load("/nonexistent/densegraph.json");
        assert!(matches!(missing, Err(ConfigError::Io(_))));

        let bad = EngineConfig::from_json_str(r#"{"default_kind": "sideways"}"#);
        assert!(matches!(bad, Err(ConfigError::Parse(_))));
    }
}
