mod cli;
mod config;
mod convert;
mod init;
mod input;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

pub fn run(args: Vec<String>) -> anyhow::Result<()> {
    init_tracing();

    let cmd = cli::parse_args(&args)?;
    match cmd {
        cli::Command::Help(topic) => {
            cli::print_help(topic);
            Ok(())
        }
        cli::Command::Init(args) => init::run(args),
        cli::Command::Convert(args) => convert::run(args),
    }
}

fn init_tracing() {
    // Logs go to stderr; stdout carries only SQL.
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "map2sql=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
