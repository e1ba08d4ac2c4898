//! Periodic tick source
//!
//! A background thread emits a tick on a fixed interval until the [`Ticker`]
//! is cancelled or dropped. Ticks that the receiver has not consumed are not
//! replayed: a slow consumer sees one tick per interval at most.

use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

/// Default interval between due-date checks
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(60);

/// Emits [`Instant`]s on a fixed interval from a background thread
pub struct Ticker {
    stop: Option<mpsc::Sender<()>>,
    ticks: mpsc::Receiver<Instant>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Ticker {
    /// Start ticking every `interval`; the first tick arrives after one interval
    pub fn start(interval: Duration) -> Self {
        let (stop, stop_rx) = mpsc::channel::<()>();
        let (tick_tx, ticks) = mpsc::sync_channel::<Instant>(1);

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(interval) {
                Err(RecvTimeoutError::Timeout) => {
                    // A full buffer means the last tick is still pending; skip this one
                    if let Err(mpsc::TrySendError::Disconnected(_)) = tick_tx.try_send(Instant::now()) {
                        return;
                    }
                }
                Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
            }
        });

        Self {
            stop: Some(stop),
            ticks,
            handle: Some(handle),
        }
    }

    /// Block until the next tick; `None` once the ticker has stopped
    pub fn next_tick(&self) -> Option<Instant> {
        self.ticks.recv().ok()
    }

    /// A pending tick, if one has fired
    pub fn try_tick(&self) -> Option<Instant> {
        match self.ticks.try_recv() {
            Ok(at) => Some(at),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.stop.is_some()
    }

    /// Stop the background thread and wait for it to exit
    pub fn cancel(&mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                debug!("ticker thread panicked");
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_arrive() {
        let ticker = Ticker::start(Duration::from_millis(10));
        let first = ticker.next_tick().unwrap();
        let second = ticker.next_tick().unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let mut ticker = Ticker::start(Duration::from_millis(5));
        ticker.cancel();
        assert!(!ticker.is_running());
        // Drain anything buffered before the stop, then the channel is closed
        while ticker.try_tick().is_some() {}
        assert!(ticker.next_tick().is_none());
    }

    #[test]
    fn test_drop_joins_thread() {
        let ticker = Ticker::start(Duration::from_secs(3600));
        let started = Instant::now();
        drop(ticker);
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
