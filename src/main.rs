pub(crate) mod config;
pub(crate) mod core;
pub(crate) mod utils;

use crate::core::{inbound, manager};
use std::{fmt::Arguments, path::PathBuf};

use clap::Parser;
use config::Config;
use fern::colors::{Color, ColoredLevelConfig};
use log::{info, warn};
use miette::IntoDiagnostic;

#[derive(Debug, Parser)]
#[command(version, about = "Apply field transforms to a record stream under a dirty-data limit")]
struct Args {
    /// Job config file, `.toml` or `.json`
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Input file, stdin when omitted
    #[arg(short, long)]
    input: Option<PathBuf>,
}

fn setup_logger() -> std::result::Result<(), fern::InitError> {
    let colors = ColoredLevelConfig::new()
        .debug(Color::Cyan)
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::White)
        .trace(Color::Magenta);

    let make_formatter = |use_color: bool| {
        move |out: fern::FormatCallback, message: &Arguments, record: &log::Record| {
            let now = jiff::Zoned::now();
            let now = now.strftime("%Y-%m-%d %H:%M:%S");

            let target = record.target();
            let mut target = target.replacen("sieve", "app", 1);
            if let Some(line) = record.line() {
                target = format!("{}:{}", target, line);
            }
            let target = target;

            if use_color {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    now,
                    colors.color(record.level()),
                    target,
                    message
                ))
            } else {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    now,
                    record.level(),
                    target,
                    message
                ))
            }
        }
    };

    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(log::LevelFilter::Info);

    let file_dispatch = fern::Dispatch::new()
        .format(make_formatter(false))
        .level(log_level)
        .chain(fern::log_file("output.log")?);

    // records go to stdout, so logs go to stderr
    let console_dispatch = fern::Dispatch::new()
        .format(make_formatter(true))
        .level(log_level)
        .chain(std::io::stderr());

    fern::Dispatch::new()
        .chain(console_dispatch)
        .chain(file_dispatch)
        .apply()?;

    Ok(())
}

async fn run(args: Args) -> miette::Result<()> {
    info!("Starting the application");
    let config = Config::load_from_file(&args.config)?;
    info!("Loaded config from {}", args.config.display());

    let ctx = tokio_util::sync::CancellationToken::new();
    let child_token = ctx.child_token();

    ctrlc::set_handler(move || {
        warn!("Received Ctrl+C, shutting down...");
        ctx.cancel();
    })
    .into_diagnostic()?;

    let mgr = manager::try_create_from_config(config)?;
    let input = inbound::open(args.input.as_deref()).await?;
    let summary = timeit! { "Running job", {
        mgr.run(input, child_token).await?
    }};

    info!("Job finished, {}", summary);
    Ok(())
}

pub fn main() -> miette::Result<()> {
    let args = Args::parse();

    setup_logger().into_diagnostic()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()?;

    let result = runtime.block_on(run(args));

    // a blocked stdin read can not be cancelled, so do not wait for it
    runtime.shutdown_background();

    info!("Application has exited");
    result
}
