//! Tracing subscriber setup
//!
//! The subscriber is installed before the configuration is read, so load and
//! validation failures are logged like any other error. Once the
//! configuration is known its `log_level` replaces the startup filter, unless
//! `RUST_LOG` or `--verbose` already fixed the level.

use tracing::warn;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

use crate::config::LogLevel;

/// Handle on the installed log filter
pub struct LogFilter {
    handle: reload::Handle<EnvFilter, Registry>,
    pinned: bool,
}

/// Filter directive used until the configuration is loaded
pub fn startup_directive(verbose: bool) -> &'static str {
    if verbose {
        LogLevel::Debug.as_filter_str()
    } else {
        LogLevel::default().as_filter_str()
    }
}

impl LogFilter {
    /// Install the global subscriber with the startup filter
    pub fn init(verbose: bool) -> Self {
        let from_env = EnvFilter::try_from_default_env().ok();
        let pinned = from_env.is_some() || verbose;
        let initial = from_env.unwrap_or_else(|| EnvFilter::new(startup_directive(verbose)));

        let (filter, handle) = reload::Layer::new(initial);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
        Self { handle, pinned }
    }

    /// Switch to the configured level; returns whether the filter changed
    pub fn apply(&self, level: LogLevel) -> bool {
        if self.pinned {
            return false;
        }
        match self.handle.reload(EnvFilter::new(level.as_filter_str())) {
            Ok(()) => true,
            Err(err) => {
                warn!(%err, "keeping the startup log level");
                false
            }
        }
    }

    /// Current filter directives, if the subscriber is still alive
    pub fn current(&self) -> Option<String> {
        self.handle.with_current(|filter| filter.to_string()).ok()
    }
}
