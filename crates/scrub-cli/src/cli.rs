use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "scrub")]
#[command(about = "Redact sensitive content from captured HTTP messages", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Redact JSON fields in a request body
    Request {
        /// Captured request file, or - for stdin
        input: String,

        /// JSON member to redact (repeatable, overrides config)
        #[arg(long)]
        field: Vec<String>,
    },

    /// Redact JSON fields in a response body
    Response {
        /// Captured response file, or - for stdin
        input: String,

        /// JSON member to redact (repeatable, overrides config)
        #[arg(long)]
        field: Vec<String>,
    },

    /// Replace image parts of a multipart request
    Multipart {
        /// Captured request file, or - for stdin
        input: String,
    },

    /// Parse a captured message and print a summary
    Inspect {
        /// Captured message file, or - for stdin
        input: String,

        /// Input holds a response instead of a request
        #[arg(long)]
        response: bool,
    },
}
