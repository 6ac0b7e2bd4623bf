use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Source of render ticks. `next_tick` resolves when the next tick is due.
pub trait Ticker {
    fn next_tick(&mut self) -> impl Future<Output = ()>;
}

/// Fixed-period ticker on the tokio clock. The first tick fires immediately.
pub struct IntervalTicker {
    interval: Interval,
}

impl IntervalTicker {
    pub fn new(period: Duration) -> Self {
        Self::starting_after(Duration::ZERO, period)
    }

    /// Like [`IntervalTicker::new`], but the first tick waits `delay`.
    pub fn starting_after(delay: Duration, period: Duration) -> Self {
        let mut interval = tokio::time::interval_at(Instant::now() + delay, period);
        // A slow tick pushes the schedule back instead of bursting.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        IntervalTicker { interval }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }
}

impl Ticker for IntervalTicker {
    async fn next_tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Ticker advanced by hand through a [`TickHandle`]. Once every handle is
/// dropped it never fires again.
pub struct ManualTicker {
    rx: mpsc::UnboundedReceiver<()>,
}

#[derive(Clone)]
pub struct TickHandle {
    tx: mpsc::UnboundedSender<()>,
}

impl ManualTicker {
    pub fn new() -> (Self, TickHandle) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ManualTicker { rx }, TickHandle { tx })
    }
}

impl TickHandle {
    /// Queues `n` ticks. Returns false if the ticker is gone.
    pub fn advance(&self, n: usize) -> bool {
        (0..n).all(|_| self.tx.send(()).is_ok())
    }
}

impl Ticker for ManualTicker {
    async fn next_tick(&mut self) {
        if self.rx.recv().await.is_none() {
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn interval_ticker_fires_once_per_period() {
        let mut ticker = IntervalTicker::new(Duration::from_secs(1));
        let start = tokio::time::Instant::now();

        ticker.next_tick().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        ticker.next_tick().await;
        ticker.next_tick().await;
        assert_eq!(start.elapsed(), Duration::from_secs(2));
        assert_eq!(ticker.period(), Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_ticker_holds_back_the_first_tick() {
        let mut ticker =
            IntervalTicker::starting_after(Duration::from_millis(200), Duration::from_secs(1));
        let start = tokio::time::Instant::now();

        ticker.next_tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(200));

        ticker.next_tick().await;
        assert_eq!(start.elapsed(), Duration::from_millis(1_200));
    }

    #[tokio::test]
    async fn manual_ticker_only_fires_when_advanced() {
        let (mut ticker, handle) = ManualTicker::new();
        assert!(handle.advance(2));

        ticker.next_tick().await;
        ticker.next_tick().await;

        let pending = tokio::time::timeout(Duration::from_millis(20), ticker.next_tick()).await;
        assert!(pending.is_err());
    }

    #[tokio::test]
    async fn manual_ticker_stalls_after_handle_dropped() {
        let (mut ticker, handle) = ManualTicker::new();
        drop(handle);
        let stalled = tokio::time::timeout(Duration::from_millis(20), ticker.next_tick()).await;
        assert!(stalled.is_err());
    }
}
