use crate::model::constants::{
    DECAY_BASE, DEFAULT_API_BASE, DEFAULT_CACHE_DIR, DEFAULT_COMPUTE_CONCURRENCY, DEFAULT_FETCH_CONCURRENCY,
    DEFAULT_MAP_DOWNLOAD_BASE
};
use std::{env, path::PathBuf};

/// Tunables for a recalculation run.
///
/// Everything the pipeline needs beyond the CLI inputs lives here so that no
/// component reaches for process-wide state. Environment variables override
/// the defaults; the decay base is deliberately not overridable since both
/// orderings must share it.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    /// Base URL of the osu! web API (token exchange and JSON resources)
    pub api_base: String,
    /// Base URL for raw `.osu` downloads
    pub map_download_base: String,
    /// Directory holding cached `.osu` files, keyed by map id
    pub cache_dir: PathBuf,
    /// Rank-decay base for the weighted aggregation
    pub decay_base: f64,
    /// Fan-out width of the beatmap fetch stage
    pub fetch_concurrency: usize,
    /// Fan-out width of the per-play compute stage
    pub compute_concurrency: usize
}

impl ProcessorConfig {
    /// Creates a configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            api_base: env::var("OSU_API_BASE").unwrap_or(defaults.api_base),
            map_download_base: env::var("OSU_MAP_DOWNLOAD_BASE").unwrap_or(defaults.map_download_base),
            cache_dir: env::var("PP_RECALC_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            decay_base: defaults.decay_base,
            fetch_concurrency: env::var("PP_RECALC_FETCH_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.fetch_concurrency),
            compute_concurrency: env::var("PP_RECALC_COMPUTE_CONCURRENCY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.compute_concurrency)
        }
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            map_download_base: DEFAULT_MAP_DOWNLOAD_BASE.to_string(),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            decay_base: DECAY_BASE,
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            compute_concurrency: DEFAULT_COMPUTE_CONCURRENCY
        }
    }
}
