use env_logger::{Builder, Env};

/// Progress lines go through `log`; `RUST_LOG` overrides the given default filter.
pub fn init_logging(default_filter: &str) {
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(false)
        .format_target(false)
        .init();
}
