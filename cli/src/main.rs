use crate::cli::Args;
use crate::error::CliResult;
use crate::watch::{watch, WatchOptions};
use globalcursor_core::{CursorPositionProvider, ProviderConfig};
use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

mod cli;
mod error;
mod logger;
mod watch;

fn load_config(args: &Args) -> CliResult<ProviderConfig> {
    let mut config = if args.use_defaults {
        ProviderConfig::default()
    } else {
        ProviderConfig::load(args.config_path.as_deref())?
    };

    if let Some(interval_ms) = args.interval_ms {
        config.poll_interval_ms = interval_ms;
    }
    if let Some(display) = &args.display {
        config.x11_display = Some(display.clone());
    }

    config.validate()?;
    Ok(config)
}

fn main() -> CliResult<()> {
    let args = cli::parse_args();
    logger::init_logger(args.quiet, args.verbose)?;

    let config = load_config(&args)?;
    match &config.config_path {
        Some(path) => debug!("Using config file {}", path.display()),
        None => debug!("Using default configuration"),
    }

    if args.dry_run {
        info!("Configuration is valid");
        return Ok(());
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();
    ctrlc::set_handler(move || {
        shutdown_clone.store(true, Ordering::SeqCst);
    })?;

    let mut provider = CursorPositionProvider::with_config(&config);
    let options = WatchOptions {
        interval: config.poll_interval(),
        count: args.count,
        changes_only: args.changes_only,
    };

    watch(&mut provider, &options, &shutdown, |position| {
        println!("{position}");
    });

    Ok(())
}
