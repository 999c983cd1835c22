pub mod config;
pub mod constants;

pub use config::{HookfeedConfig, load_config};
