//! Background solver thread.
//!
//! A full solve takes tens of milliseconds, too long for a thread that also
//! handles input or rendering. The worker owns a dedicated thread fed through a
//! single request slot: submitting while a request is still waiting replaces it,
//! so only the newest input is ever solved. Results go out on an unbounded
//! `mpsc` channel; the consumer polls it at its own cadence and keeps only the
//! newest result.
//!
//! An in-flight solve is never interrupted. Requests and results carry immutable
//! snapshots (the config travels as an `Arc`), so no solver state is shared.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::thread::JoinHandle;
use std::time::Duration;

use archer_core::LaunchConfig;

use crate::{solve, LaunchSolution, TargetDirection, TargetSpec, VehicleMotion};

/// Poll cadence of an interactive consumer.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(30);

/// Everything one solve needs.
#[derive(Clone, Debug, PartialEq)]
pub struct SolveRequest {
    pub target: TargetSpec,
    pub vehicle: VehicleMotion,
    pub direction: TargetDirection,
    pub config: Arc<LaunchConfig>,
}

/// A finished solve together with the inputs it answers.
#[derive(Clone, Debug)]
pub struct SolveResult {
    pub request: SolveRequest,
    pub solution: Option<LaunchSolution>,
}

/* ----------------------------- request slot ----------------------------- */

#[derive(Default)]
struct SlotState {
    pending: Option<SolveRequest>,
    closed: bool,
}

/// Capacity-one channel whose `put` overwrites instead of queueing.
#[derive(Default)]
struct RequestSlot {
    state: Mutex<SlotState>,
    ready: Condvar,
}

impl RequestSlot {
    /// Store `request`; `true` if it displaced one that had not started yet.
    fn put(&self, request: SolveRequest) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let replaced = state.pending.replace(request).is_some();
        self.ready.notify_one();
        replaced
    }

    /// Block until a request is available; `None` once closed.
    fn take(&self) -> Option<SolveRequest> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if state.closed {
                return None;
            }
            if let Some(request) = state.pending.take() {
                return Some(request);
            }
            state = self.ready.wait(state).unwrap_or_else(PoisonError::into_inner);
        }
    }

    fn close(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.closed = true;
        state.pending = None;
        self.ready.notify_all();
    }
}

/* -------------------------------- worker -------------------------------- */

pub struct SolverWorker {
    slot: Arc<RequestSlot>,
    results: mpsc::Receiver<SolveResult>,
    handle: Option<JoinHandle<()>>,
}

impl SolverWorker {
    /// Start the solver thread.
    pub fn spawn() -> io::Result<Self> {
        let slot = Arc::new(RequestSlot::default());
        let (result_tx, results) = mpsc::channel::<SolveResult>();

        let thread_slot = Arc::clone(&slot);
        let handle = std::thread::Builder::new()
            .name("archer-solver".into())
            .spawn(move || run_worker(&thread_slot, &result_tx))?;

        Ok(Self { slot, results, handle: Some(handle) })
    }

    /// Queue `request` for solving, replacing any request not yet started.
    /// Returns `true` if a pending request was dropped.
    pub fn submit(&self, request: SolveRequest) -> bool {
        self.slot.put(request)
    }

    /// Drain the result channel without blocking and return the newest result.
    pub fn latest(&self) -> Option<SolveResult> {
        self.results.try_iter().last()
    }

    /// Wait up to `timeout` for the next result.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<SolveResult> {
        self.results.recv_timeout(timeout).ok()
    }
}

impl Drop for SolverWorker {
    fn drop(&mut self) {
        self.slot.close();
        if let Some(handle) = self.handle.take() {
            // A panicking solve already lost its result; nothing left to report.
            let _ = handle.join();
        }
    }
}

fn run_worker(slot: &RequestSlot, results: &mpsc::Sender<SolveResult>) {
    while let Some(request) = slot.take() {
        let solution = solve(&request.target, &request.vehicle, &request.direction, &request.config);
        if results.send(SolveResult { request, solution }).is_err() {
            // Receiver gone: the worker handle was dropped.
            return;
        }
    }
}
