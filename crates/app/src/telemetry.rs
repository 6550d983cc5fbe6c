use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, Settings};
use crate::error::CliError;

/// Install a global tracing subscriber writing to stderr.
pub fn init(settings: &Settings) -> Result<(), CliError> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(settings.log_level.into())
        .from_env_lossy();

    let fmt_layer = match settings.log_format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|err| CliError::Telemetry(err.to_string()))
}
