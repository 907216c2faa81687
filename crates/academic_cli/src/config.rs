//! Command-line configuration.

use clap::Parser;
use std::path::PathBuf;

/// Academic records manager: students, teachers, courses and enrollments.
#[derive(Debug, Parser)]
#[command(name = "academic", version, long_about = None)]
pub struct Cli {
    /// SQLite store file; created with the schema on first run.
    #[arg(long, env = "ACADEMIC_DB_PATH", default_value = "academicDB.db")]
    pub db: PathBuf,

    /// Absolute directory for rolling log files. File logging is off when unset.
    #[arg(long, env = "ACADEMIC_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (defaults to debug in debug builds, info otherwise).
    #[arg(long, env = "ACADEMIC_LOG_LEVEL")]
    pub log_level: Option<String>,
}
