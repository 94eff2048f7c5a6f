use anyhow::Result;
use tasklist_config::domains::logging::LogFormat;
use tasklist_config::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Build the env filter for a configuration
///
/// `RUST_LOG` is only consulted when the configured directives fail to parse.
pub fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_new(config.filter_directives())
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize logging from configuration
pub fn init_logging_from_config(config: &LoggingConfig) -> Result<()> {
    let env_filter = build_env_filter(config);

    // try_init so a second initialisation (tests, embedding apps) is not fatal
    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .try_init()
            .is_ok(),
        LogFormat::Compact => tracing_subscriber::fmt()
            .compact()
            .with_env_filter(env_filter)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .try_init()
            .is_ok(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .try_init()
            .is_ok(),
    };

    if !installed {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}

/// Initialize simple tracing for basic console output
pub fn init_simple_tracing(log_level: &str) -> Result<()> {
    let env_filter = EnvFilter::try_new(log_level)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .is_err()
    {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_config::domains::logging::LogLevel;

    #[test]
    fn test_env_filter_uses_configured_level() {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            directives: vec!["tasklist_client=trace".to_string()],
            ..LoggingConfig::default()
        };

        let filter = build_env_filter(&config).to_string();
        assert!(filter.contains("debug"));
        assert!(filter.contains("tasklist_client=trace"));
    }
}
