use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;
use crate::output::ReportArg;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a single request or a chain from a JSON or YAML file.
    Run {
        path: PathBuf,
        /// Record into this session instead of a generated one.
        #[arg(long)]
        session_id: Option<String>,
        /// Print the session report after the run.
        #[arg(long, value_enum)]
        report: Option<ReportArg>,
        #[command(flatten)]
        http: HttpArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// List the registered tools.
    Tools {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Invoke one tool with a JSON or YAML input document.
    Call {
        tool: String,
        #[arg(long)]
        input: Option<PathBuf>,
        #[command(flatten)]
        http: HttpArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
}
