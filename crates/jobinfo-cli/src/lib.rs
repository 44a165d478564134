mod args;
mod commands;
pub mod logging;
pub mod output;
pub mod types;

pub use args::Cli;
pub use commands::run;
