//! Timed delivery of blind increases.
//!
//! Each increment becomes its own tokio task that sleeps until its offset and
//! then fires through a shared [`CancelGate`]. Cancelling closes the gate and
//! aborts whatever is still sleeping, so later increments never depend on an
//! earlier one finishing its sleep.

use log::{debug, info};
use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};
use tokio::{
    runtime::Handle,
    task::JoinHandle,
    time::{Instant, sleep, sleep_until},
};

use super::blinds::BlindIncrement;

/// Text shown to players when the blind goes up.
pub fn blind_message(amount: u64) -> String {
    format!("Blind is now {amount}")
}

/// Rendering target for fired blind increases.
///
/// May be called concurrently from several delivery tasks. Implementations
/// must not call back into the owning session, and should return quickly:
/// cancelling waits for a delivery that is already running, so a sink that
/// blocks also blocks `finish`.
pub trait AlertSink: Send + Sync {
    fn alert(&self, amount: u64, at: Duration);
}

/// One blind increase as seen by a sink
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ScheduledAlert {
    pub amount: u64,
    pub at: Duration,
}

impl fmt::Display for ScheduledAlert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} chips at {:?}", self.amount, self.at)
    }
}

impl From<BlindIncrement> for ScheduledAlert {
    fn from(increment: BlindIncrement) -> Self {
        Self {
            amount: increment.amount,
            at: increment.at,
        }
    }
}

/// Sink that keeps every alert it receives, in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    alerts: Mutex<Vec<ScheduledAlert>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the alerts received so far
    pub fn alerts(&self) -> Vec<ScheduledAlert> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ScheduledAlert>> {
        self.alerts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AlertSink for RecordingSink {
    fn alert(&self, amount: u64, at: Duration) {
        self.lock().push(ScheduledAlert { amount, at });
    }
}

/// Sink that writes every alert to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl AlertSink for LogSink {
    fn alert(&self, amount: u64, at: Duration) {
        info!("{} (after {:?})", blind_message(amount), at);
    }
}

/// Open/closed flag shared by all deliveries of one schedule.
///
/// The lock is held across the check and the delivery, so once
/// [`close`](CancelGate::close) returns no delivery can start.
#[derive(Clone, Debug, Default)]
pub struct CancelGate {
    closed: Arc<Mutex<bool>>,
}

impl CancelGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `deliver` if the gate is still open. Returns whether it ran.
    pub fn pass(&self, deliver: impl FnOnce()) -> bool {
        let closed = self.lock();
        if *closed {
            return false;
        }
        deliver();
        true
    }

    pub fn close(&self) {
        *self.lock() = true;
    }

    pub fn is_closed(&self) -> bool {
        *self.lock()
    }

    // A sink that panicked mid-delivery poisons the lock; the flag is still valid.
    fn lock(&self) -> MutexGuard<'_, bool> {
        self.closed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cancellation handle for one scheduled ladder of alerts.
#[derive(Debug, Default)]
pub struct AlertHandle {
    gate: CancelGate,
    tasks: Vec<JoinHandle<()>>,
}

impl AlertHandle {
    pub fn new(gate: CancelGate, tasks: Vec<JoinHandle<()>>) -> Self {
        Self { gate, tasks }
    }

    /// Stop every delivery that has not fired yet
    pub fn cancel(&mut self) {
        self.gate.close();
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.gate.is_closed()
    }

    /// Number of deliveries still owned by this handle
    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|task| !task.is_finished()).count()
    }
}

/// Arranges delivery of a blind ladder to a sink without blocking the caller.
pub trait BlindAlerter: Send + Sync {
    fn schedule(&self, increments: &[BlindIncrement], sink: Arc<dyn AlertSink>) -> AlertHandle;
}

/// [`BlindAlerter`] backed by tokio timers, one task per increment.
#[derive(Clone, Debug)]
pub struct TokioBlindAlerter {
    runtime: Handle,
}

impl TokioBlindAlerter {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Alerter bound to the runtime of the calling task
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self::new(Handle::current())
    }
}

impl BlindAlerter for TokioBlindAlerter {
    fn schedule(&self, increments: &[BlindIncrement], sink: Arc<dyn AlertSink>) -> AlertHandle {
        // Entering the runtime makes `Instant::now` follow its clock (paused in tests).
        let _guard = self.runtime.enter();
        let started = Instant::now();
        let gate = CancelGate::new();

        let tasks = increments
            .iter()
            .copied()
            .map(|increment| {
                let gate = gate.clone();
                let sink = Arc::clone(&sink);
                self.runtime.spawn(async move {
                    // Offsets past the end of the clock wait as long as tokio allows.
                    match started.checked_add(increment.at) {
                        Some(deadline) => sleep_until(deadline).await,
                        None => sleep(increment.at).await,
                    }
                    let fired = gate.pass(|| sink.alert(increment.amount, increment.at));
                    if fired {
                        debug!("Blind raised to {} at {:?}", increment.amount, increment.at);
                    }
                })
            })
            .collect();

        AlertHandle::new(gate, tasks)
    }
}
