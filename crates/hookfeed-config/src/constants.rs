use std::time::Duration;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/hookfeed/hookfeed.toml";
pub const DEFAULT_API_HOST: &str = "0.0.0.0";
pub const DEFAULT_API_PORT: u16 = 3000;

/// GitHub caps webhook payloads at 25 MB.
pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);
