use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use sift_ingest::SegmenterConfig;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub ranking: RankingConfig,
    pub embedding: EmbeddingConfig,
    pub segmenter: SegmenterConfig,
    pub filters: Vec<FilterProfile>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Directory holding one subfolder per collection.
    pub base_path: String,
    /// Only subfolders whose name starts with this prefix are collections.
    pub collection_prefix: String,
    /// Subfolder of each collection holding the source documents.
    pub documents_dir: String,
    pub request_file: String,
    pub output_file: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    pub top_n: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// `ollama`, `candle`, or `mock` (feature-gated).
    pub provider: String,
    pub base_url: String,
    pub model: String,
}

/// Title-denylist policy for one collection. Collections without a profile
/// are not filtered.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterProfile {
    pub collection: String,
    pub denylist: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            base_path: "Challenge_1b".into(),
            collection_prefix: "Collection".into(),
            documents_dir: "PDFs".into(),
            request_file: "challenge1b_input.json".into(),
            output_file: "generated_output.json".into(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self { top_n: 15 }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".into(),
            base_url: "http://localhost:11434".into(),
            model: "all-MiniLM-L6-v2".into(),
        }
    }
}

/// Default exclusion profile: vegetarian-only menu planning over a recipe
/// collection. Terms carried over unchanged from the original deployment.
fn default_filters() -> Vec<FilterProfile> {
    let denylist = [
        "chicken",
        "beef",
        "pork",
        "sausage",
        "bacon",
        "lamb",
        "turkey",
        "fish",
        "shrimp",
        "crab",
        "seafood",
        "duck",
        "veal",
        "ham",
        "pancetta",
        "breakfast",
        "lunch",
        "sandwich",
        "burrito",
        "quesadilla",
        "tacos",
        "salmon",
        "cod",
    ];
    vec![FilterProfile {
        collection: "Collection 3".into(),
        denylist: denylist.iter().map(|t| (*t).to_owned()).collect(),
    }]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus: CorpusConfig::default(),
            ranking: RankingConfig::default(),
            embedding: EmbeddingConfig::default(),
            segmenter: SegmenterConfig::default(),
            filters: default_filters(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to full defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            Self::with_defaults()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Built-in defaults, including the default filter profile.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SIFT_BASE_PATH") {
            self.corpus.base_path = v;
        }
        if let Ok(v) = std::env::var("SIFT_EMBED_PROVIDER") {
            self.embedding.provider = v;
        }
        if let Ok(v) = std::env::var("SIFT_EMBED_BASE_URL") {
            self.embedding.base_url = v;
        }
        if let Ok(v) = std::env::var("SIFT_EMBED_MODEL") {
            self.embedding.model = v;
        }
        if let Ok(v) = std::env::var("SIFT_TOP_N")
            && let Ok(n) = v.parse::<usize>()
        {
            self.ranking.top_n = n;
        }
    }

    /// Denylist configured for the named collection, if any.
    #[must_use]
    pub fn denylist_for(&self, collection: &str) -> Option<&[String]> {
        self.filters
            .iter()
            .find(|p| p.collection == collection)
            .map(|p| p.denylist.as_slice())
    }
}
