//! Sets up `env_logger` from the process `Config`. The library itself only
//! talks to the `log` facade.
use anyhow::{Context, Result};
use env_logger::{Builder, WriteStyle};

use crate::args::Config;

fn builder(config: &Config) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(config.log_level)
        .format_timestamp(None)
        .format_target(false)
        .write_style(WriteStyle::Auto);
    builder
}

/// Installs the global logger. Call it once, before doing any work.
pub fn init(config: &Config) -> Result<()> {
    builder(config).try_init().context("Can't install the logger")
}
