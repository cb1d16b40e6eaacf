//! Background sweep task for the response cache.
//!
//! The sweeper is a long-running tokio task that periodically deletes
//! expired entries. It runs independently of reads and writes; stopping
//! it never affects correctness, only memory growth.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::store::TtlCache;

/// Spawn the periodic sweep task.
///
/// Runs until `cancel` fires. The first tick happens one full interval
/// after spawning, not immediately.
pub fn spawn_sweeper(
    cache: Arc<TtlCache>,
    interval: Duration,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // Consume the immediate first tick so the loop waits a full period.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("cache sweeper shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    let result = cache.sweep();
                    if result.entries_removed > 0 {
                        debug!(
                            removed = result.entries_removed,
                            bytes_freed = result.bytes_freed,
                            "cache sweep"
                        );
                    }
                }
            }
        }
    })
}
