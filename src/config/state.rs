// Application state module
// Read-only state shared by every connection

use super::root::ServeRoot;
use super::types::Config;

/// Application state
///
/// Built once before the listener starts and never mutated afterwards, so
/// requests share it through an `Arc` without locking.
#[derive(Debug, Clone)]
pub struct AppState {
    pub root: ServeRoot,
    pub access_log: bool,
    pub keep_alive: bool,
}

impl AppState {
    pub fn new(root: ServeRoot, config: &Config) -> Self {
        Self {
            root,
            access_log: config.logging.access_log,
            keep_alive: config.performance.keep_alive,
        }
    }
}
