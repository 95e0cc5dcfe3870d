// ============================================================================
// Interrupt Interface
// Cooperative cancellation for long-running numeric operations
// ============================================================================

use crate::numeric::{NumericError, NumericResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Polled at the head of every potentially long loop in the engine.
///
/// When `is_interrupted` returns true the running operation stops, drops its
/// temporaries and reports [`NumericError::Interrupted`].
pub trait Interrupt: Send + Sync {
    /// Whether an interrupt has been signalled.
    fn is_interrupted(&self) -> bool;

    /// Checkpoint helper used by the numeric algorithms.
    #[inline]
    fn check(&self) -> NumericResult<()> {
        if self.is_interrupted() {
            Err(NumericError::Interrupted)
        } else {
            Ok(())
        }
    }
}

/// Interrupt source that never fires.
#[derive(Debug, Default, Clone, Copy)]
pub struct NeverInterrupt;

impl Interrupt for NeverInterrupt {
    #[inline]
    fn is_interrupted(&self) -> bool {
        false
    }
}

/// Shared flag that a signal handler or another thread can raise.
#[derive(Debug, Default, Clone)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the running operation.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    /// Clear the flag once the interpreter has reported the interrupt.
    pub fn reset(&self) {
        self.raised.store(false, Ordering::Release);
    }
}

impl Interrupt for InterruptFlag {
    #[inline]
    fn is_interrupted(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}
