//! Graceful shutdown handling for the application.
//!
//! Provides Ctrl+C handling and the final summary written on exit.

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Manages graceful shutdown of the application.
pub struct ShutdownManager {
    shutdown_requested: Arc<AtomicBool>,
    summary_on_exit: bool,
    exit_code: i32,
}

impl Default for ShutdownManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownManager {
    pub fn new() -> Self {
        Self {
            shutdown_requested: Arc::new(AtomicBool::new(false)),
            summary_on_exit: true,
            exit_code: 0,
        }
    }

    /// Spawns a task that requests shutdown on Ctrl+C. Needs a tokio runtime.
    pub fn listen_for_ctrl_c(&self) {
        let flag = self.shutdown_requested.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Ctrl+C received, initiating graceful shutdown...");
            flag.store(true, Ordering::SeqCst);
        });
    }

    pub fn request_shutdown(&self) {
        self.shutdown_requested.store(true, Ordering::SeqCst);
        tracing::info!("Shutdown requested");
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }

    pub fn set_summary_on_exit(&mut self, summary: bool) {
        self.summary_on_exit = summary;
    }

    pub fn should_summarize_on_exit(&self) -> bool {
        self.summary_on_exit
    }

    pub fn set_exit_code(&mut self, code: i32) {
        self.exit_code = code;
    }

    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Logs the final population summary.
    pub fn cleanup(&self, app: &crate::app::App) -> Result<()> {
        tracing::info!("Performing shutdown cleanup...");
        if self.summary_on_exit {
            let stats = serde_json::to_string(&app.ecosystem.stats())?;
            tracing::info!(ticks = app.tick_count, stats = %stats, "Final population");
        }
        tracing::info!("Cleanup complete");
        Ok(())
    }
}
