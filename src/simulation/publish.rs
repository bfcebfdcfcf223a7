use super::{RunState, Simulation};
use crate::Universe;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// One published generation, as seen by a renderer.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub universe: Arc<Universe>,
    pub generation: u64,
    pub state: RunState,
    /// Steps skipped by the catch-up cap so far.
    pub dropped: u64,
}

/// Hands the latest generation from the update thread to reader threads.
///
/// The lock is held only to swap or clone the [`Arc`], never while a
/// generation is being computed, so readers never wait on a step.
#[derive(Debug, Clone, Default)]
pub struct SnapshotHandle {
    latest: Arc<Mutex<Frame>>,
}

impl SnapshotHandle {
    pub fn new(simulation: &Simulation) -> Self {
        Self {
            latest: Arc::new(Mutex::new(simulation.frame())),
        }
    }

    pub fn publish(&self, simulation: &Simulation) {
        let frame = simulation.frame();
        *self.lock() = frame;
    }

    pub fn latest(&self) -> Frame {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Frame> {
        // a frame is replaced in a single assignment, so a poisoned lock
        // still guards a complete one
        self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
