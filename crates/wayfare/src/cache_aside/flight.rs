//! In-flight computation table.
//!
//! One broadcast channel per key being computed. The leader owns a
//! [`FlightGuard`]; followers hold receivers. Dropping the guard without
//! completing it (the leader was cancelled) closes the channel, which tells
//! followers to retry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use wayfare_core::cache::CacheAsideError;

/// What every participant of one flight receives.
pub(crate) type FlightResult = Result<Arc<[u8]>, CacheAsideError>;

/// The outcome of trying to claim a key.
pub(crate) enum Claim<'a> {
    /// This caller must compute and then call [`FlightGuard::complete`].
    Leader(FlightGuard<'a>),
    /// Another caller is computing; wait on the receiver.
    Follower(broadcast::Receiver<FlightResult>),
}

#[derive(Debug, Default)]
pub(crate) struct InFlight {
    calls: Mutex<HashMap<String, broadcast::Sender<FlightResult>>>,
}

impl InFlight {
    /// Claims `key`, or joins the flight already running for it.
    pub(crate) fn claim(&self, key: &str) -> Claim<'_> {
        let mut calls = self.lock();

        if let Some(sender) = calls.get(key) {
            return Claim::Follower(sender.subscribe());
        }

        let (sender, _) = broadcast::channel(1);
        calls.insert(key.to_string(), sender);
        Claim::Leader(FlightGuard {
            flights: self,
            key: key.to_string(),
            completed: false,
        })
    }

    /// Number of keys currently being computed.
    pub(crate) fn len(&self) -> usize {
        self.lock().len()
    }

    // The map is only touched in short, non-panicking sections, so a poisoned
    // lock still holds a consistent map.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, broadcast::Sender<FlightResult>>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Leadership of one key. Released on every exit path.
pub(crate) struct FlightGuard<'a> {
    flights: &'a InFlight,
    key: String,
    completed: bool,
}

impl FlightGuard<'_> {
    /// Releases the key and hands `result` to every follower.
    pub(crate) fn complete(mut self, result: FlightResult) {
        let sender = self.flights.lock().remove(&self.key);
        self.completed = true;

        if let Some(sender) = sender {
            // No receivers just means nobody joined this flight.
            let _ = sender.send(result);
        }
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        if !self.completed {
            tracing::debug!(key = %self.key, "Cache computation abandoned by its leader");
            self.flights.lock().remove(&self.key);
        }
    }
}
