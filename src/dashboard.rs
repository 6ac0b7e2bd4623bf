use std::future::Future;
use std::time::Duration;

use ratatui::Terminal;
use ratatui::backend::Backend;
use tracing::{debug, info, warn};

use crate::error::CollectorError;
use crate::system::collector::Collector;
use crate::system::source::MetricsSource;
use crate::ticker::Ticker;
use crate::ui;
use crate::ui::statusbar::StatusInfo;
use crate::ui::theme::Theme;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Rendered,
    Skipped(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickStats {
    pub rendered: u64,
    pub skipped: u64,
    pub last_error: Option<String>,
}

pub struct Dashboard<S> {
    collector: Collector<S>,
    theme: Theme,
    refresh_interval: Duration,
    quit_label: String,
    stats: TickStats,
}

impl<S: MetricsSource> Dashboard<S> {
    pub fn new(collector: Collector<S>, theme: Theme, refresh_interval: Duration) -> Self {
        Dashboard {
            collector,
            theme,
            refresh_interval,
            quit_label: "q".to_string(),
            stats: TickStats::default(),
        }
    }

    pub fn with_quit_label(mut self, label: impl Into<String>) -> Self {
        self.quit_label = label.into();
        self
    }

    pub fn stats(&self) -> &TickStats {
        &self.stats
    }

    /// One sample-and-draw pass. A collector failure leaves the previous
    /// frame on screen and is reported as [`TickOutcome::Skipped`]; only
    /// terminal errors are returned as `Err`.
    pub fn tick<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<TickOutcome, B::Error> {
        let snapshot = match self.collector.collect() {
            Ok(snapshot) => snapshot,
            Err(err) => return Ok(self.skip(err)),
        };

        let status = StatusInfo {
            quit_key: &self.quit_label,
            refresh_interval: self.refresh_interval,
            skipped_ticks: self.stats.skipped,
            last_error: self.stats.last_error.as_deref(),
        };
        terminal.draw(|frame| ui::draw(frame, &snapshot, &self.theme, &status))?;

        self.stats.rendered += 1;
        debug!(rendered = self.stats.rendered, "frame drawn");
        Ok(TickOutcome::Rendered)
    }

    /// Renders on every tick until `shutdown` resolves. Collector failures
    /// never end the loop.
    pub async fn run<B, T, F>(
        &mut self,
        terminal: &mut Terminal<B>,
        ticker: &mut T,
        shutdown: F,
    ) -> Result<TickStats, B::Error>
    where
        B: Backend,
        T: Ticker,
        F: Future<Output = ()>,
    {
        info!(
            interval_ms = self.refresh_interval.as_millis() as u64,
            disk = %self.collector.disk_path().display(),
            "dashboard started"
        );
        terminal.clear()?;

        let mut shutdown = std::pin::pin!(shutdown);
        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.next_tick() => {
                    self.tick(terminal)?;
                }
            }
        }

        info!(
            rendered = self.stats.rendered,
            skipped = self.stats.skipped,
            "dashboard stopped"
        );
        Ok(self.stats.clone())
    }

    fn skip(&mut self, err: CollectorError) -> TickOutcome {
        warn!(error = %err, "skipping tick");
        let message = err.to_string();
        self.stats.skipped += 1;
        self.stats.last_error = Some(message.clone());
        TickOutcome::Skipped(message)
    }
}
