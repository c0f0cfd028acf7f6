//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Install a compact stderr subscriber.
///
/// `RUST_LOG` is honoured; `verbose` forces debug output for pkgmeta crates.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("pkg_core=debug,pkg_fs=debug,pkg_meta=debug,pkgmeta=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .compact()
        .try_init();
    if installed.is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}
