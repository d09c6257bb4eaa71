pub mod shutdown;
pub mod state;

pub use shutdown::ShutdownManager;
pub use state::App;

use anyhow::Result;
use std::time::{Duration, Instant};

const STATUS_INTERVAL: Duration = Duration::from_secs(5);
/// Idle wait between checks while paused.
const PAUSE_POLL: Duration = Duration::from_millis(50);

impl App {
    /// Runs until `max_ticks` ticks have been simulated (0 = no limit), the
    /// population dies out, or Ctrl+C is pressed.
    pub async fn run(&mut self, max_ticks: u64) -> Result<()> {
        let shutdown = ShutdownManager::new();
        shutdown.listen_for_ctrl_c();

        let tick_rate = if self.paced {
            Duration::from_secs_f64(1.0 / self.config.target_fps as f64)
        } else {
            Duration::ZERO
        };
        let mut last_status = Instant::now();

        while self.running && !shutdown.is_shutdown_requested() {
            if max_ticks > 0 && self.tick_count >= max_ticks {
                self.running = false;
                break;
            }

            let tick_started = Instant::now();
            if self.step().is_none() {
                tokio::time::sleep(tick_rate.max(PAUSE_POLL)).await;
                continue;
            }

            if self.ecosystem.total_population() == 0 {
                tracing::info!(tick = self.tick_count, "Population extinct");
                self.running = false;
            }
            if max_ticks > 0 && self.tick_count >= max_ticks {
                self.running = false;
            }

            if last_status.elapsed() >= STATUS_INTERVAL {
                tracing::info!("{}", self.status_line());
                last_status = Instant::now();
            }

            match tick_rate.checked_sub(tick_started.elapsed()) {
                Some(remaining) if !remaining.is_zero() => tokio::time::sleep(remaining).await,
                _ => tokio::task::yield_now().await,
            }
        }

        shutdown.cleanup(self)?;
        Ok(())
    }
}
