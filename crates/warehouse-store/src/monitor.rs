//! # Expiration Monitor
//!
//! Background task that periodically reports expired food records.
//!
//! ## Monitor Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Expiration Monitor Loop                             │
//! │                                                                         │
//! │   spawn ──► tick (immediate) ──► scan ──► notify                       │
//! │               ▲                             │                           │
//! │               └──────── every interval ◄────┘                           │
//! │                                                                         │
//! │   scan:   read lock ──► filter food < today ──► clone matches ──► unlock│
//! │   notify: on_expired(records)  or  on_none_expired()                   │
//! │                                                                         │
//! │   shutdown signal ──► loop exits after the in-flight scan               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The monitor never mutates the collection. Missed ticks are delayed,
//! not bursted.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use tokio::runtime::Handle;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};
use warehouse_core::FoodProduct;

use crate::inventory::{self, Inventory};

// =============================================================================
// Notifier
// =============================================================================

/// Receives the outcome of every scan.
pub trait ExpirationNotifier: Send + Sync {
    /// Called with the expired records, in collection order.
    fn on_expired(&self, expired: &[FoodProduct]);

    /// Called when a scan finds nothing expired.
    fn on_none_expired(&self);
}

/// Writes scan results to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl ExpirationNotifier for TracingNotifier {
    fn on_expired(&self, expired: &[FoodProduct]) {
        warn!(count = expired.len(), "Expired products found");
        for food in expired {
            warn!(id = food.info.id, "  {}", food);
        }
    }

    fn on_none_expired(&self) {
        info!("No expired products");
    }
}

// =============================================================================
// Monitor
// =============================================================================

/// Periodic scanner over a shared [`Inventory`].
pub struct ExpirationMonitor {
    inventory: Inventory,
    notifier: Arc<dyn ExpirationNotifier>,
    interval: Duration,
}

impl ExpirationMonitor {
    /// `interval` must be non-zero.
    pub fn new(
        inventory: Inventory,
        notifier: Arc<dyn ExpirationNotifier>,
        interval: Duration,
    ) -> Self {
        ExpirationMonitor {
            inventory,
            notifier,
            interval,
        }
    }

    /// Spawns the scan loop on `runtime` and returns its handle.
    pub fn spawn(self, runtime: &Handle) -> MonitorHandle {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let task = runtime.spawn(self.run(shutdown_rx));

        MonitorHandle {
            shutdown_tx: Some(shutdown_tx),
            task: Some(task),
        }
    }

    async fn run(self, mut shutdown_rx: oneshot::Receiver<()>) {
        info!(interval_secs = self.interval.as_secs(), "Expiration monitor starting");

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.scan(Local::now().date_naive());
                }

                // Fires on an explicit signal or when the handle is dropped
                _ = &mut shutdown_rx => {
                    info!("Expiration monitor shutting down");
                    break;
                }
            }
        }

        info!("Expiration monitor stopped");
    }

    fn scan(&self, today: NaiveDate) {
        let expired = self
            .inventory
            .with_products(|products| inventory::expired_on(products, today));

        debug!(%today, expired = expired.len(), "Expiration scan finished");

        if expired.is_empty() {
            self.notifier.on_none_expired();
        } else {
            self.notifier.on_expired(&expired);
        }
    }
}

// =============================================================================
// Handle
// =============================================================================

/// Controls a running monitor. Dropping it stops the monitor.
#[derive(Debug)]
pub struct MonitorHandle {
    shutdown_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    /// Stops future scans. Returns false if already stopped.
    pub fn shutdown(&mut self) -> bool {
        match self.shutdown_tx.take() {
            Some(tx) => {
                // Err means the loop already exited
                let _ = tx.send(());
                true
            }
            None => false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some() && self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Waits for the loop to exit. Call [`shutdown`](Self::shutdown) first.
    pub async fn join(mut self) {
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Expiration monitor task failed");
            }
        }
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
