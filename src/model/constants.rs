// Pipeline constants
pub const DECAY_BASE: f64 = 0.95;
pub const TOP_PLAY_LIMIT: usize = 100;
// Default endpoints and tunables picked up by `ProcessorConfig`
pub const DEFAULT_API_BASE: &str = "https://osu.ppy.sh";
pub const DEFAULT_MAP_DOWNLOAD_BASE: &str = "https://osu.ppy.sh/osu";
pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_FETCH_CONCURRENCY: usize = 8;
pub const DEFAULT_COMPUTE_CONCURRENCY: usize = 4;
