//! # Periodic Ticker
//!
//! Drives the live elapsed-time display: a callback fires once per period on a
//! background thread until the [`Ticker`] is stopped or dropped.
//!
//! The guard owns the thread. Dropping it closes the stop channel and joins the
//! thread, so no callback can fire after teardown.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//! use calc_core::ticker::Ticker;
//!
//! let ticks = Arc::new(AtomicUsize::new(0));
//! let counter = Arc::clone(&ticks);
//! let ticker = Ticker::start(Duration::from_millis(5), move || {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//! std::thread::sleep(Duration::from_millis(30));
//! drop(ticker);
//! let after_drop = ticks.load(Ordering::SeqCst);
//! std::thread::sleep(Duration::from_millis(20));
//! assert_eq!(ticks.load(Ordering::SeqCst), after_drop);
//! ```

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Display refresh period for the elapsed-time calculator
pub const ONE_SECOND: Duration = Duration::from_secs(1);

/// Handle to a running periodic callback.
///
/// Stops and joins its thread when dropped.
#[derive(Debug)]
pub struct Ticker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Start calling `on_tick` every `period`.
    ///
    /// The first call happens one period after start.
    pub fn start<F>(period: Duration, mut on_tick: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let handle = thread::spawn(move || {
            tracing::debug!(?period, "ticker started");
            loop {
                match stopped.recv_timeout(period) {
                    Err(RecvTimeoutError::Timeout) => on_tick(),
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::debug!("ticker stopped");
        });

        Ticker {
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// Stop the ticker and wait for its thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    /// True while the timer thread is alive
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn shutdown(&mut self) {
        // Closing the channel wakes the thread immediately
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("ticker callback panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_ticks_until_stopped() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let ticker = Ticker::start(Duration::from_millis(2), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert!(ticker.is_running());

        thread::sleep(Duration::from_millis(50));
        ticker.stop();

        let stopped_at = ticks.load(Ordering::SeqCst);
        assert!(stopped_at > 0);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(ticks.load(Ordering::SeqCst), stopped_at);
    }

    #[test]
    fn test_drop_before_first_tick() {
        let ticks = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&ticks);
        let ticker = Ticker::start(Duration::from_secs(60), move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        // Returns promptly rather than waiting out the period
        drop(ticker);
        assert_eq!(ticks.load(Ordering::SeqCst), 0);
    }
}
