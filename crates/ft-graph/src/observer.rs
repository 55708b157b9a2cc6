//! Log side channel for graph events.
//!
//! The graph never writes to a global logger directly; it reports through a
//! `GraphObserver`. The default forwards to `tracing`.

use tracing::Level;

/// Receives graph events (creation, linking, duplicate adds).
pub trait GraphObserver: Send + Sync {
    fn emit(&self, level: Level, message: &str);
}

/// Forwards events to the `tracing` macros under the `family_member` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GraphObserver for TracingObserver {
    fn emit(&self, level: Level, message: &str) {
        if level == Level::ERROR {
            tracing::error!(target: "family_member", "{message}");
        } else if level == Level::WARN {
            tracing::warn!(target: "family_member", "{message}");
        } else if level == Level::INFO {
            tracing::info!(target: "family_member", "{message}");
        } else if level == Level::DEBUG {
            tracing::debug!(target: "family_member", "{message}");
        } else {
            tracing::trace!(target: "family_member", "{message}");
        }
    }
}
