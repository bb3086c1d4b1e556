pub mod difference;
pub mod lock_decision;

pub use difference::compute_difference;
pub use lock_decision::{
    LockEngine, LockOutcome, LockPolicy, LockResolution, LockState, ONE_WEEK_MS, next_reset_at,
};
