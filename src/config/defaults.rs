//! System-wide default constants.
//!
//! Grouped by subsystem for easy discovery.

// ============================================================================
// Server
// ============================================================================

/// Default HTTP bind address.
pub const SERVER_ADDR: &str = "127.0.0.1:5000";

/// Maximum accepted request body (bytes). A `/predict` body is one field.
pub const BODY_LIMIT_BYTES: usize = 16 * 1024;

// ============================================================================
// Config Loading
// ============================================================================

/// Environment variable holding an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "CASTING_CONFIG";

/// Environment variable overriding `server.addr`.
pub const SERVER_ADDR_ENV: &str = "CASTING_SERVER_ADDR";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "casting_config.toml";

/// Maximum edit distance for "did you mean" suggestions on unknown keys.
pub const MAX_SUGGESTION_DISTANCE: usize = 3;
