use std::sync::atomic::{AtomicU64, Ordering};

/// Edge-triggered "configuration changed" flag.
///
/// Every change bumps a generation number. A pass records the generation it
/// was dispatched for and, once the pass completes, marks that generation
/// done. Changes made while the pass runs therefore keep the trigger dirty.
/// The trigger starts dirty so the first frame is always computed.
#[derive(Debug)]
pub struct RecomputeTrigger {
    requested: AtomicU64,
    completed: AtomicU64,
}

impl Default for RecomputeTrigger {
    fn default() -> Self {
        Self::new()
    }
}

impl RecomputeTrigger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            requested: AtomicU64::new(1),
            completed: AtomicU64::new(0),
        }
    }

    /// Records a configuration change, returning its generation.
    pub fn mark_dirty(&self) -> u64 {
        self.requested.fetch_add(1, Ordering::AcqRel) + 1
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.requested.load(Ordering::Acquire) > self.completed.load(Ordering::Acquire)
    }

    /// Generation a pass dispatched now would satisfy, or `None` when the
    /// last completed pass is already current.
    #[must_use]
    pub fn pending(&self) -> Option<u64> {
        let requested = self.requested.load(Ordering::Acquire);

        (requested > self.completed.load(Ordering::Acquire)).then_some(requested)
    }

    /// Marks the pass for `generation` complete. Older completions never move
    /// the trigger backwards.
    pub fn complete(&self, generation: u64) {
        self.completed.fetch_max(generation, Ordering::AcqRel);
    }

    #[must_use]
    pub fn last_completed_generation(&self) -> u64 {
        self.completed.load(Ordering::Acquire)
    }
}
