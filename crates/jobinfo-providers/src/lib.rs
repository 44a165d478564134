// Error types
pub mod error;

// Command execution seam
pub mod traits;
pub mod runner;

// Scheduler data sources
pub mod sacct;
pub mod sinfo;
pub mod squeue;
pub mod sstat;

// Bundled adapter
pub mod scheduler;

pub use error::{Error, Result};
pub use runner::SystemRunner;
pub use sacct::query_sacct;
pub use scheduler::{Programs, Scheduler};
pub use sinfo::query_version;
pub use squeue::query_squeue;
pub use sstat::query_sstat;
pub use traits::{CommandOutput, CommandRunner};
