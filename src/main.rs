#![deny(unsafe_code)]
pub mod commands;

use anyhow::Result;
use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

/// Custom styles for CLI help output
const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());
use commands::command::Command;
use commands::generate::Generate;
use commands::transform::Transform;
use enum_dispatch::enum_dispatch;
use env_logger::Env;
use log::{info, warn};
use mxdft_lib::errors::MxdftError;

/// Exit status for a run stopped by SIGINT or SIGTERM (128 + SIGINT).
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser, Debug)]
#[command(styles = STYLES)]
struct Args {
    #[clap(subcommand)]
    subcommand: Subcommand,
}

#[enum_dispatch(Command)]
#[derive(Parser, Debug)]
#[command(version)]
enum Subcommand {
    #[command(display_order = 1)]
    Transform(Transform),
    #[command(display_order = 2)]
    Generate(Generate),
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let command_line = std::env::args().collect::<Vec<_>>().join(" ");
    let args = Args::parse();

    info!("Running mxdft version {}", env!("CARGO_PKG_VERSION"));
    match args.subcommand.execute(&command_line) {
        Err(e) if matches!(e.downcast_ref::<MxdftError>(), Some(MxdftError::Interrupted)) => {
            warn!("{e}");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
        result => result,
    }
}
