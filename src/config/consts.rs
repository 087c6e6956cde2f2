// src/config/consts.rs

// Season / source
pub const SEASON: u32 = 50;
pub const WIKI_URL: &str = "https://survivor.fandom.com/wiki/Survivor_50";
pub const EPISODE_CAP: u32 = 26; // typical season length

// Net config
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; FundasFriendsSurvivorPool/1.0)";
pub const TIMEOUT_SECS: u64 = 15;

// Local files
pub const DATA_FILE: &str = "survivor_data.json";
pub const MANUAL_FILE: &str = "survivor_manual.json";
pub const CONFIG_FILE: &str = "survivor_pool.toml";
pub const GUI_LOG_FILE: &str = ".store/debug.log";

// Server
pub const SERVICE_NAME: &str = "Fundas Friends Survivor 50 API";
pub const HOST: &str = "0.0.0.0";
pub const PORT: u16 = 8000;
pub const CACHE_MAX_AGE: u32 = 3600; // scraper runs nightly anyway

// Concurrency
pub const WORKERS: usize = 4;

// Env overrides
pub const ENV_CONFIG: &str = "SURVIVOR_POOL_CONFIG";
pub const ENV_PORT: &str = "PORT";
pub const ENV_DATA_FILE: &str = "SURVIVOR_DATA_FILE";
pub const ENV_WIKI_URL: &str = "SURVIVOR_WIKI_URL";
pub const ENV_MANUAL: &str = "SURVIVOR_MANUAL_OVERRIDE";
