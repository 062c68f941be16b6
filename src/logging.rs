//! Log output setup

use std::io::Write;

use env_logger::{Builder, Env};
use log::Level;

const MODULE: &str = "SLI";

/// Four-letter level tag: `INFO`, `WARN`, `DEBU`, ...
fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERRO",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBU",
        Level::Trace => "TRAC",
    }
}

/// Initialise the global logger. `RUST_LOG` overrides the level chosen here.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };

    let _ = Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "{:<23}|{}|{}|{}: {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                level_tag(record.level()),
                MODULE,
                record.target(),
                record.args()
            )
        })
        .try_init();
}
