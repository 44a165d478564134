use crate::types::{LogLevel, OutputFormat};
use clap::Parser;
use jobinfo_types::JobId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jobinfo")]
#[command(about = "Show a readable report for one Slurm job", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Job to report on, e.g. 4711, 4711_3 or 4711+1
    #[arg(value_name = "JOB_ID")]
    pub job_id: JobId,

    /// Also show account, node count, submit time, working directory and comment
    #[arg(short, long)]
    pub verbose: bool,

    #[arg(long, default_value = "plain")]
    pub format: OutputFormat,

    /// Configuration file [default: $JOBINFO_CONFIG or the user config dir]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log verbosity on stderr; RUST_LOG is used when not given [default: warn]
    #[arg(long)]
    pub log_level: Option<LogLevel>,
}
