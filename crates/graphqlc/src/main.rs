#![forbid(unsafe_code)]

use graphqlc::{report, Args, CompilerConfig, CompilerError};
use std::process;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

fn main() {
    let args = Args::parse_with_plugin_flags(std::env::args_os());
    report::init_colors();

    let exit_code = match try_main(&args) {
        Ok(()) => 0,
        Err(error) => {
            report::error(&error);
            1
        }
    };

    process::exit(exit_code);
}

fn try_main(args: &Args) -> Result<(), CompilerError> {
    let filter = {
        let builder = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());
        match args.log_filter.as_deref() {
            Some(argument_filter) => builder.parse_lossy(argument_filter),
            None => builder.from_env_lossy(),
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = CompilerConfig::from_args(args)?;
    tracing::debug!(
        files = config.files.len(),
        plugins = config.plugins.len(),
        "configuration resolved"
    );

    graphqlc::run(&config)
}
