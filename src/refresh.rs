// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Periodic re-computation of the phase.
//!
//! A [`Refresher`] owns the reading currently on display and replaces it only
//! with fresh results from [`read_phase`]. [`Refresher::run`] delivers one
//! reading immediately and then one per [`RefreshConfig::interval`], waiting on
//! a cancellation channel so that teardown is observed without waiting for
//! the next tick. [`Refresher::spawn`] runs the same loop on its own thread
//! and hands back a [`RefreshHandle`]; dropping the handle stops the loop.

use chrono::{DateTime, Utc};
use std::ops::ControlFlow;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::calculator::{read_phase, PhaseReading};
use crate::error::{Error, Result};

/// One day, the default spacing between refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(86_400);

// ═══════════════════════════════════════════════════════════════════════════
// Clocks
// ═══════════════════════════════════════════════════════════════════════════

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    #[inline]
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Configuration
// ═══════════════════════════════════════════════════════════════════════════

/// Refresh settings.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RefreshConfig {
    interval: Duration,
}

impl RefreshConfig {
    /// Refresh every `interval`. A zero interval is rejected.
    pub fn new(interval: Duration) -> Result<Self> {
        if interval.is_zero() {
            return Err(Error::ZeroInterval);
        }
        Ok(Self { interval })
    }

    /// Time between two deliveries.
    #[inline]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REFRESH_INTERVAL,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Refresher
// ═══════════════════════════════════════════════════════════════════════════

/// Holds the displayed reading and recomputes it on demand or on a timer.
#[derive(Debug)]
pub struct Refresher<C: Clock> {
    clock: C,
    config: RefreshConfig,
    current: Option<PhaseReading>,
}

impl<C: Clock> Refresher<C> {
    pub fn new(clock: C, config: RefreshConfig) -> Self {
        Self {
            clock,
            config,
            current: None,
        }
    }

    /// The last reading, `None` before the first refresh.
    #[inline]
    pub fn current(&self) -> Option<&PhaseReading> {
        self.current.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    /// Recompute from the clock and replace the current reading.
    pub fn refresh(&mut self) -> &PhaseReading {
        let reading = read_phase(self.clock.now());
        match self.current.map(|previous| previous.phase) {
            Some(previous) if previous == reading.phase => {
                debug!(phase = %reading.phase, fraction = reading.fraction.value(), "phase unchanged");
            }
            previous => {
                info!(
                    phase = %reading.phase,
                    previous = ?previous,
                    fraction = reading.fraction.value(),
                    "phase updated"
                );
            }
        }
        self.current.insert(reading)
    }

    /// Deliver a reading now and then once per interval.
    ///
    /// Returns when `cancel` receives a message or its sender is dropped, or
    /// when `sink` asks to stop.
    pub fn run<F>(&mut self, cancel: &Receiver<()>, mut sink: F)
    where
        F: FnMut(&PhaseReading) -> ControlFlow<()>,
    {
        loop {
            if sink(self.refresh()).is_break() {
                debug!("refresh sink closed");
                return;
            }
            match cancel.recv_timeout(self.config.interval) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    debug!("refresh cancelled");
                    return;
                }
            }
        }
    }
}

impl<C: Clock + Send + 'static> Refresher<C> {
    /// Run on a dedicated thread, sending every reading through `tx`.
    ///
    /// The thread exits when the handle is cancelled or dropped, or when the
    /// receiving end of `tx` goes away.
    pub fn spawn(mut self, tx: Sender<PhaseReading>) -> RefreshHandle {
        let (cancel_tx, cancel_rx) = mpsc::channel();
        let interval = self.config.interval;
        let thread = thread::spawn(move || {
            self.run(&cancel_rx, |reading| match tx.send(*reading) {
                Ok(()) => ControlFlow::Continue(()),
                Err(_) => ControlFlow::Break(()),
            });
        });
        debug!(interval_secs = interval.as_secs_f64(), "refresh thread started");
        RefreshHandle {
            cancel: Some(cancel_tx),
            thread: Some(thread),
        }
    }
}

/// Owner of a spawned refresh loop.
#[derive(Debug)]
pub struct RefreshHandle {
    cancel: Option<Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    /// Stop the loop and wait for its thread.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    /// `true` once the refresh thread has exited on its own.
    pub fn is_finished(&self) -> bool {
        self.thread.as_ref().map_or(true, JoinHandle::is_finished)
    }

    fn shutdown(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // the loop may already have stopped
            let _ = cancel.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!("refresh thread panicked");
            }
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epoch::reference_new_moon;
    use crate::phase::LunarPhase;
    use std::cell::Cell;
    use std::time::Instant;

    /// Advances by `step` on every call.
    struct SteppingClock {
        next: Cell<DateTime<Utc>>,
        step: chrono::Duration,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let now = self.next.get();
            self.next.set(now + self.step);
            now
        }
    }

    fn fast() -> RefreshConfig {
        RefreshConfig::new(Duration::from_millis(1)).unwrap()
    }

    #[test]
    fn default_interval_is_one_day() {
        assert_eq!(RefreshConfig::default().interval(), Duration::from_secs(86_400));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert_eq!(RefreshConfig::new(Duration::ZERO), Err(Error::ZeroInterval));
    }

    #[test]
    fn refresh_replaces_current_reading() {
        let mut refresher = Refresher::new(FixedClock(reference_new_moon()), fast());
        assert!(refresher.current().is_none());
        let phase = refresher.refresh().phase;
        assert_eq!(phase, LunarPhase::NewMoon);
        assert_eq!(refresher.current().map(|r| r.instant), Some(reference_new_moon()));
    }

    #[test]
    fn run_delivers_until_sink_stops() {
        let clock = SteppingClock {
            next: Cell::new(reference_new_moon()),
            step: chrono::Duration::days(4),
        };
        let mut refresher = Refresher::new(clock, fast());
        let (_cancel_tx, cancel_rx) = mpsc::channel();
        let mut seen = Vec::new();
        refresher.run(&cancel_rx, |reading| {
            seen.push(reading.phase);
            if seen.len() == 8 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(seen.len(), 8);
        assert_eq!(seen[0], LunarPhase::NewMoon);
        // day 16 ≈ 0.54 of the cycle
        assert_eq!(seen[4], LunarPhase::FullMoon);
        assert_eq!(refresher.current().map(|r| r.phase), seen.last().copied());
    }

    #[test]
    fn pending_cancel_stops_after_first_delivery() {
        let mut refresher = Refresher::new(FixedClock(reference_new_moon()), fast());
        let (cancel_tx, cancel_rx) = mpsc::channel();
        cancel_tx.send(()).unwrap();
        let mut count = 0;
        refresher.run(&cancel_rx, |_| {
            count += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn dropped_cancel_sender_stops_the_loop() {
        let mut refresher = Refresher::new(FixedClock(reference_new_moon()), fast());
        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        drop(cancel_tx);
        let mut count = 0;
        refresher.run(&cancel_rx, |_| {
            count += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(count, 1);
    }

    #[test]
    fn spawned_refresher_delivers_immediately_and_cancels() {
        let config = RefreshConfig::new(Duration::from_secs(3_600)).unwrap();
        let refresher = Refresher::new(FixedClock(reference_new_moon()), config);
        let (tx, rx) = mpsc::channel();
        let handle = refresher.spawn(tx);

        let first = rx.recv_timeout(Duration::from_secs(5)).expect("first reading");
        assert_eq!(first.phase, LunarPhase::NewMoon);

        handle.cancel();
        assert!(rx.try_iter().next().is_none());
        assert!(rx.recv().is_err(), "sender should be gone after cancel");
    }

    #[test]
    fn spawned_refresher_stops_when_receiver_is_dropped() {
        let refresher = Refresher::new(FixedClock(reference_new_moon()), fast());
        let (tx, rx) = mpsc::channel();
        let handle = refresher.spawn(tx);
        drop(rx);

        let deadline = Instant::now() + Duration::from_secs(5);
        while !handle.is_finished() && Instant::now() < deadline {
            thread::sleep(Duration::from_millis(1));
        }
        assert!(handle.is_finished());
    }

    #[test]
    fn dropping_the_handle_stops_the_thread() {
        let config = RefreshConfig::new(Duration::from_secs(3_600)).unwrap();
        let refresher = Refresher::new(FixedClock(reference_new_moon()), config);
        let (tx, rx) = mpsc::channel();
        drop(refresher.spawn(tx));
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
        assert!(rx.recv().is_err());
    }
}
