use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset. Diagnostics stay quiet so they
/// do not mix with command output.
const DEFAULT_FILTER: &str = "warn";

/// Builds the log filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialises structured logging on stderr. Level is overridden by `RUST_LOG`.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_can_run_twice() {
        init();
        init();
        tracing::debug!("logging initialised");
    }
}
