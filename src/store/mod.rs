//! Process-wide stores mutated only through kernel operations.

pub mod allocator;
pub mod gems;

pub use allocator::IdAllocator;
pub use gems::GemStore;
