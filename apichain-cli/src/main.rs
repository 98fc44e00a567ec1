use clap::Parser;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod logging;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "apichain", version, about = "Chained API test runner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    logging::init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Run {
            path,
            session_id,
            report,
            http,
            output,
        } => cmd::run::run_cmd(&path, session_id.as_deref(), report, http, output).await,
        Command::Tools { output } => cmd::tools::tools_cmd(output).await,
        Command::Call {
            tool,
            input,
            http,
            output,
        } => cmd::call::call_cmd(&tool, input.as_deref(), http, output).await,
    }
}
