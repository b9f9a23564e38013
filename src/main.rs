// SPDX-License-Identifier: MPL-2.0
use iced_preview::app::{self, Flags};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    init_tracing();

    let mut args = pico_args::Arguments::from_env();
    let config_dir: Option<PathBuf> = match args.opt_value_from_str("--config-dir") {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("iced_preview: {err}");
            eprintln!("usage: iced_preview [--config-dir DIR] IMAGE...");
            std::process::exit(2);
        }
    };

    let images = args
        .finish()
        .into_iter()
        .filter_map(|arg| arg.into_string().ok())
        .collect();

    app::run(Flags { config_dir, images })
}

/// Console logging, overridable through `RUST_LOG`.
fn init_tracing() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();
}
