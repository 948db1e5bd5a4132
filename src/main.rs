//! fm-storage - Entry Point
//!
//! Resolves one relative path against the configured storage root, runs the
//! access checks and prints the item metadata as JSON.
//!
//! Usage: `fm-storage [--config FILE] [--write] <relative-path>`

use std::path::PathBuf;
use std::process::ExitCode;

use log::{error, info};

use fm_storage::auth::AllowAll;
use fm_storage::error::handlers::{error_to_status_code, handle_error};
use fm_storage::utils::logging::setup_logging;
use fm_storage::{AccessError, Item, LocalBackend, StorageConfig};

struct Args {
    config: Option<PathBuf>,
    write: bool,
    path: String,
}

fn parse_args() -> Result<Args, String> {
    let mut config = None;
    let mut write = false;
    let mut path = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            let file = args.next().ok_or("--config needs a file")?;
            config = Some(PathBuf::from(file));
        } else if arg == "--write" {
            write = true;
        } else if path.is_none() {
            path = Some(arg);
        } else {
            return Err(format!("unexpected argument: {arg}"));
        }
    }

    let path = path.ok_or("usage: fm-storage [--config FILE] [--write] <relative-path>")?;
    Ok(Args {
        config,
        write,
        path,
    })
}

fn run_checks(item: &Item<'_>, write: bool) -> Result<(), AccessError> {
    if write {
        item.check_restrictions()?;
        item.check_write_permission()?;
    } else {
        item.check_path()?;
        item.check_restrictions()?;
        item.check_read_permission()?;
    }
    Ok(())
}

fn main() -> ExitCode {
    setup_logging();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    let config = match &args.config {
        Some(file) => StorageConfig::from_file(file),
        None => StorageConfig::load(),
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::from(2);
        }
    };

    let backend = match LocalBackend::new(config, Box::new(AllowAll)) {
        Ok(backend) => backend,
        Err(e) => {
            error!("Failed to open storage: {}", e);
            return ExitCode::from(2);
        }
    };

    let item = Item::new(&backend, args.path);
    info!("Inspecting {:?}", item);

    if let Err(e) = run_checks(&item, args.write) {
        handle_error(&e);
        println!("{} {} {:?}", error_to_status_code(&e), e.key(), e.args());
        return ExitCode::FAILURE;
    }

    match serde_json::to_string_pretty(&item.info()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize item info: {}", e);
            ExitCode::FAILURE
        }
    }
}
