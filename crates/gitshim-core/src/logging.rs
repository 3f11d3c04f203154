use crate::settings::LoggingConfig;

/// Initialize console logging (env_logger).
/// Respects `RUST_LOG` for filtering; otherwise uses the configured level.
/// Later calls are no-ops once a logger is installed.
pub fn init(cfg: &LoggingConfig) {
    let mut builder = env_logger::Builder::from_default_env();
    builder.format_timestamp_millis();
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(cfg.level.into());
    }
    if builder.try_init().is_err() {
        log::trace!("gitshim-core: logger already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::LogLevel;

    #[test]
    fn init_twice_is_harmless() {
        init(&LoggingConfig { level: LogLevel::Debug });
        init(&LoggingConfig::default());
        log::debug!("still logging");
    }
}
