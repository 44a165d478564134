pub mod error;
pub mod job_id;
pub mod value;
pub mod version;

pub use error::{Error, Result};
pub use job_id::JobId;
pub use value::{ByteCount, JobDate, TimeSpan, Value, ValueKind};
pub use version::SchedulerVersion;
