use tracing_subscriber::EnvFilter;

use crate::ResultExt;

/// Installs the stderr subscriber shared by the binaries.
///
/// `RUST_LOG` wins when it is set; otherwise `verbose` selects between `debug` and `warn`.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .staticalize()
}
