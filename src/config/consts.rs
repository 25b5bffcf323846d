// src/config/consts.rs

// Local store
pub const LOG_FILE: &str = ".store/debug.log";
pub const DEFAULT_LOG_FILTER: &str = "info";

// Pipeline defaults (relative to the working directory)
pub const DEFAULT_INPUT_PATTERN: &str = "data/raw/*.csv";
pub const DEFAULT_OUT_DIR: &str = "data/processed";
pub const DEFAULT_TABLE_FILE: &str = "cleaned_data";
pub const DEFAULT_PLAYERS_SUBDIR: &str = "players";

// Sentinels
pub const UNKNOWN_TEAM: &str = "unknown team";
pub const UNKNOWN_OPPONENT: &str = "Unknown Opponent";

// Chart
pub const HEADROOM_RATIO: f64 = 0.2;
pub const MIN_HEADROOM: u32 = 1;
pub const EMPTY_Y_MAX: u32 = 1;
pub const MAX_LABELLED_BARS: usize = 60;
pub const LABEL_DATE_FMT: &str = "%m/%d/%y";
pub const HOVER_DATE_FMT: &str = "%m/%d/%Y %H:%M";

// Series: games further apart than this never share a series
pub const SERIES_MAX_GAP_HOURS: i64 = 12;

// Form table windows (most recent N games)
pub const FORM_WINDOWS: [usize; 3] = [3, 5, 10];
