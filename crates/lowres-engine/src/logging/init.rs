use std::sync::Once;

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info",
/// "lowres_engine=debug,wgpu_core=warn"). When unset, `RUST_LOG` is consulted,
/// then `DEFAULT_FILTER`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

/// wgpu is chatty at info level.
const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

static INIT: Once = Once::new();

/// Installs the global logger. Later calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        match config.env_filter {
            Some(filter) => builder.parse_filters(&filter),
            None => match std::env::var("RUST_LOG") {
                Ok(filter) => builder.parse_filters(&filter),
                Err(_) => builder.parse_filters(DEFAULT_FILTER),
            },
        };

        builder.write_style(config.write_style);
        builder.init();

        log::debug!("logging initialized");
    });
}
