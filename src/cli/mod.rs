//! Command-line interface module.

mod args;
pub mod gather;
pub mod normalize;

pub use args::{Cli, Commands, GatherArgs, NormalizeArgs};
