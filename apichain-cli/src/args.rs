use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct HttpArgs {
    /// Per-request timeout in milliseconds.
    #[arg(long, env = "APICHAIN_TIMEOUT_MS", default_value_t = 30000)]
    pub timeout_ms: u64,
    #[arg(long, env = "APICHAIN_USER_AGENT")]
    pub user_agent: Option<String>,
}
