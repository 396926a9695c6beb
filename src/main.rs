mod calendar;
mod cli;
mod config;
mod model;
mod store;

use std::process;

use config::Config;
use store::Store;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            process::exit(1);
        }
    };

    let root = match config.state_dir.clone().or_else(Store::default_root) {
        Some(root) => root,
        None => {
            eprintln!("Could not determine home directory.");
            process::exit(1);
        }
    };

    let store = match Store::new(root) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&config, &store) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
