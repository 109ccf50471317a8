//! `rolo`: interactive contact directory
//!
//! Configuration precedence: command-line flags, then `--config` TOML file,
//! then built-in defaults.

mod command;
mod input;
mod pager;
mod session;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use rolo_core::{Directory, DirectoryConfig};
use session::Session;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("rolo")
        .version(rolo_core::VERSION)
        .about("Contact directory with prefix search and atomic file persistence")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("data-file")
                .long("data-file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Primary data file [default: address_book.dat]"),
        )
        .arg(
            Arg::new("tmp-file")
                .long("tmp-file")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Staging file for atomic saves [default: <data-file>.tmp]"),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Contacts per page [default: 10]"),
        )
        .arg(
            Arg::new("no-autosave")
                .long("no-autosave")
                .action(ArgAction::SetTrue)
                .help("Only save on SAVE and EXIT"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log filter, overrides RUST_LOG [default: warn]"),
        )
}

fn init_tracing(level: Option<&String>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn resolve_config(matches: &ArgMatches) -> Result<DirectoryConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => DirectoryConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => DirectoryConfig::default(),
    };

    if let Some(path) = matches.get_one::<PathBuf>("data-file") {
        config = config.with_data_path(path);
    }
    if let Some(path) = matches.get_one::<PathBuf>("tmp-file") {
        config = config.with_tmp_path(path);
    }
    if let Some(&page_size) = matches.get_one::<usize>("page-size") {
        config = config.with_page_size(page_size);
    }
    if matches.get_flag("no-autosave") {
        config = config.with_autosave(false);
    }
    Ok(config)
}

fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_one::<String>("log-level"));

    let config = resolve_config(&matches)?;
    tracing::info!(
        data = %config.data_path.display(),
        tmp = %config.tmp_path().display(),
        autosave = config.autosave,
        "opening directory"
    );

    let mut directory = Directory::from_config(&config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    Session::new(&mut directory, stdin.lock(), stdout.lock(), config.page_size)
        .run()
        .context("terminal i/o failed")?;
    Ok(())
}
