pub mod args;
pub mod commands;

pub use args::{BatchArgs, Cli, Commands};
pub use commands::run;
