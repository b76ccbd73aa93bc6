use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the `tracing` filter directives.
pub const LOG_ENV: &str = "MINSIZE_LOG";

const DEFAULT_DIRECTIVES: &str = "minsize=info";

/// Install a stderr `fmt` subscriber filtered by `MINSIZE_LOG`.
///
/// For host executables only; the library itself never installs one.  A
/// second call, or a host that already installed a subscriber, is ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_logging_twice_does_not_panic() {
        init_logging();
        init_logging();
    }
}
