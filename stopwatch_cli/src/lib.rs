use std::{env, io};

use clap::Parser;
use commands::Commands;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, EnvFilter, Registry};

mod commands;
mod domains;
mod output;
mod session;
mod stimulus;
mod styles;

pub use domains::{Fast, ZynqMini};
pub use output::Color;
pub use session::Session;
pub use stimulus::{Action, Event, Script, Stimulus};

const LOG_ENV_VAR: &str = "STOPWATCH_LOG";

pub struct Env {
    color: Color,
}

#[derive(Parser)]
#[command(name = "stopwatch")]
#[command(version, about, long_about = None)]
#[command(styles = styles::get_styles())]
struct Cli {
    /// Use colors
    #[arg(long, global = true, value_enum, default_value_t = Color::Auto)]
    color: Color,
    #[command(subcommand)]
    command: Commands,
}

/// Warnings are shown unless `directives` say otherwise.
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}

fn init_logger(color: Color) -> anyhow::Result<()> {
    let filter = log_filter(&env::var(LOG_ENV_VAR).unwrap_or_default());
    let subscriber = Registry::default().with(filter);
    let subscriber = subscriber.with(
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_ansi(color.use_colors(&io::stderr()))
            .with_target(true),
    );

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger(cli.color)?;

    let env = Env { color: cli.color };
    cli.command.run(&env)
}
