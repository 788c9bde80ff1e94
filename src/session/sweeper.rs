// src/session/sweeper.rs
//! Background sweep of idle sessions.
//!
//! Runs on a fixed interval and removes sessions whose last activity
//! predates the store's idle threshold. A pass is idempotent and never
//! errors on an empty store; removal and in-flight updates serialize on the
//! store lock, so the two cannot race destructively.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tracing::{debug, info};

use super::SessionStore;

/// Spawn the background sweep task.
///
/// `interval` is the time between passes (e.g., 5m).
pub fn spawn_session_sweeper(
    store: Arc<SessionStore>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(interval).await;
            let removed = store.sweep(Utc::now()).await;
            if removed > 0 {
                info!("session sweep removed {} idle sessions", removed);
            } else {
                debug!("session sweep found nothing to remove");
            }
        }
    })
}
