//! Domain-level building blocks: commands, attribute rules and trait generators.

pub mod attributes;
pub mod command;
pub mod generator;

pub use attributes::*;
pub use command::*;
pub use generator::*;
