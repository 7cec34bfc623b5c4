pub mod admin;
pub mod airdrop;
pub mod core;
pub mod forging;
pub mod mining;
pub mod runtime;


// Re-export the primary types so callers can use `crate::kernel::*` paths.
pub use self::core::{state_from_json, AirdropState, DefaultKernel, Kernel, SystemState};
pub use self::runtime::{BurnedGem, NewGem, PlanContext, Receipt, StateDelta};
