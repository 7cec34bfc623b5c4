//!
//! Domain events emitted by committed operations.
//!
//! Events are the externally observable outcome of a successful command and
//! form an ordered, append-only log for indexers.

pub mod event;

pub use event::Event;
