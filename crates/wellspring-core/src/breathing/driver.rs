//! Async driver for the breathing engine.
//!
//! Owns the recurring one-second tick as an abortable tokio task and
//! publishes a snapshot per tick over a watch channel. `stop()` aborts the
//! tick task before resetting the engine, so no tick can land after a stop.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::engine::BreathingEngine;
use crate::events::Event;

/// Drives a [`BreathingEngine`] with a real one-second interval.
///
/// Ticks for a given driver are strictly sequential: the engine sits behind
/// a mutex and only the single spawned task calls `tick()`.
pub struct BreathingDriver {
    engine: Arc<Mutex<BreathingEngine>>,
    snapshots: watch::Sender<Event>,
    ticker: Option<JoinHandle<()>>,
}

impl BreathingDriver {
    pub fn new(engine: BreathingEngine) -> Self {
        let (snapshots, _) = watch::channel(engine.snapshot());
        Self {
            engine: Arc::new(Mutex::new(engine)),
            snapshots,
            ticker: None,
        }
    }

    /// Subscribe to per-tick snapshots.
    pub fn subscribe(&self) -> watch::Receiver<Event> {
        self.snapshots.subscribe()
    }

    /// Current snapshot without waiting for a tick.
    pub fn snapshot(&self) -> Event {
        self.engine.lock().unwrap().snapshot()
    }

    /// Start the engine and schedule the recurring tick.
    ///
    /// Must be called within a tokio runtime. No-op while already started.
    pub fn start(&mut self) {
        if self.ticker.is_some() {
            return;
        }
        {
            let mut engine = self.engine.lock().unwrap();
            engine.start();
            let _ = self.snapshots.send(engine.snapshot());
        }
        let engine = Arc::clone(&self.engine);
        let snapshots = self.snapshots.clone();
        self.ticker = Some(tokio::spawn(async move {
            let start = tokio::time::Instant::now() + Duration::from_secs(1);
            let mut interval = tokio::time::interval_at(start, Duration::from_secs(1));
            loop {
                interval.tick().await;
                let mut engine = engine.lock().unwrap();
                engine.tick();
                let _ = snapshots.send(engine.snapshot());
            }
        }));
    }

    /// Cancel the recurring tick and reset the engine. Idempotent.
    pub fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        let mut engine = self.engine.lock().unwrap();
        engine.stop();
        let _ = self.snapshots.send(engine.snapshot());
    }

    /// Tear down the driver and hand back the engine state.
    pub fn into_inner(mut self) -> BreathingEngine {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        self.engine.lock().unwrap().clone()
    }
}

impl Drop for BreathingDriver {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breathing::Phase;

    fn snapshot_phase(event: &Event) -> (Phase, u64, bool) {
        match event {
            Event::BreathSnapshot {
                phase,
                elapsed_secs,
                running,
                ..
            } => (*phase, *elapsed_secs, *running),
            _ => panic!("Expected BreathSnapshot"),
        }
    }

    async fn advance_secs(n: u64) {
        for _ in 0..n {
            tokio::time::advance(Duration::from_secs(1)).await;
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_advance_phases() {
        let mut driver = BreathingDriver::new(BreathingEngine::new());
        driver.start();
        tokio::task::yield_now().await;

        advance_secs(4).await;
        let (phase, elapsed, running) = snapshot_phase(&driver.snapshot());
        assert_eq!(phase, Phase::Hold1);
        assert_eq!(elapsed, 0);
        assert!(running);

        advance_secs(12).await;
        let (phase, elapsed, _) = snapshot_phase(&driver.snapshot());
        assert_eq!(phase, Phase::Inhale);
        assert_eq!(elapsed, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_pending_ticks() {
        let mut driver = BreathingDriver::new(BreathingEngine::new());
        driver.start();
        tokio::task::yield_now().await;

        advance_secs(3).await;
        driver.stop();
        let (phase, elapsed, running) = snapshot_phase(&driver.snapshot());
        assert_eq!(phase, Phase::Paused);
        assert_eq!(elapsed, 0);
        assert!(!running);

        // Time passing after a stop must not move the engine.
        advance_secs(10).await;
        let (phase, elapsed, running) = snapshot_phase(&driver.snapshot());
        assert_eq!(phase, Phase::Paused);
        assert_eq!(elapsed, 0);
        assert!(!running);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_observe_snapshots() {
        let mut driver = BreathingDriver::new(BreathingEngine::new());
        let mut rx = driver.subscribe();
        driver.start();
        tokio::task::yield_now().await;

        rx.changed().await.unwrap();
        let (phase, _, running) = snapshot_phase(&rx.borrow_and_update());
        assert_eq!(phase, Phase::Inhale);
        assert!(running);

        advance_secs(1).await;
        let (phase, elapsed, _) = snapshot_phase(&rx.borrow_and_update());
        assert_eq!(phase, Phase::Inhale);
        assert_eq!(elapsed, 1);
    }
}
