// ============================================================================
// Interfaces Module
// Contains all trait definitions and contracts
// ============================================================================

mod char_sink;
mod interrupt;
mod random;

pub use char_sink::{CharSink, FnSink, LoggingSink, NoOpSink};
pub use interrupt::{Interrupt, InterruptFlag, NeverInterrupt};
pub use random::RandomSource;
