//! Greets someone using configuration layered from `hello_tier.toml`,
//! `HELLO_*` environment variables and command-line flags.
//!
//! ```text
//! HELLO_RECIPIENT=Ferris cargo run -p hello_tier -- --repeat=2 --debug-conf
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use chrono::{DateTime, FixedOffset};
use tierconf::{Loader, TierConfig};
use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*, reload};

#[derive(Debug, TierConfig)]
struct Style {
    shout: bool,
    punctuation: String,
}

#[derive(Debug, TierConfig)]
struct HelloConfig {
    #[tierconf(help = "who to greet")]
    recipient: String,
    #[tierconf(help = "how many times to greet")]
    repeat: u8,
    #[tierconf(name = "log_level", help = "trace, debug, info, warn or error")]
    verbosity: Level,
    #[tierconf(help = "when the greeting was scheduled")]
    scheduled_at: DateTime<FixedOffset>,
    #[tierconf(nested)]
    style: Style,
}

impl Default for HelloConfig {
    fn default() -> Self {
        Self {
            recipient: "world".to_owned(),
            repeat: 1,
            verbosity: Level::INFO,
            scheduled_at: DateTime::default(),
            style: Style {
                shout: false,
                punctuation: "!".to_owned(),
            },
        }
    }
}

fn greet(config: &HelloConfig, out: &mut impl Write) -> io::Result<()> {
    let greeting = format!("Hello, {}{}", config.recipient, config.style.punctuation);
    let line = if config.style.shout {
        greeting.to_uppercase()
    } else {
        greeting
    };
    for _ in 0..config.repeat {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn log_filter(default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .from_env_lossy()
}

fn main() -> ExitCode {
    // Loading logs at `RUST_LOG` or warn; the configured level is the default afterwards.
    let (filter, filter_handle) = reload::Layer::new(log_filter(LevelFilter::WARN));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();

    let mut config = HelloConfig::default();
    Loader::new(
        &mut config,
        "hello",
        "Greets someone, configurably.",
        ["hello_tier.toml", "hello_tier.json"],
    )
    .must_load();

    if let Err(err) = filter_handle.reload(log_filter(LevelFilter::from_level(config.verbosity))) {
        tracing::warn!(%err, "failed to apply the configured log level");
    }
    tracing::debug!(?config, "configuration loaded");

    match greet(&config, &mut io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "failed to write greeting");
            ExitCode::FAILURE
        }
    }
}
