// purify/src/logger.rs
//! Logger initialization for the purify binary.
//!
//! The library crates only use the `log` facade; this is the single place an
//! `env_logger` backend is installed.

use log::LevelFilter;
use std::io::Write;

/// Initializes `env_logger`.
///
/// `RUST_LOG` is honoured when set. An explicit `level` overrides it for the
/// `purify` and `purify_core` targets, which is how `--debug` and `--quiet`
/// take effect. Calling this more than once is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));

    if let Some(level) = level {
        builder.filter_module("purify", level);
        builder.filter_module("purify_core", level);
    }

    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {}] {}",
            record.level(),
            record.target(),
            record.args()
        )
    });

    let _ = builder.try_init();
}
