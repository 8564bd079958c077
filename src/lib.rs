pub mod conditional_paralell;
pub mod config;
pub mod error;
pub mod file_helpers;
pub mod helpers;
pub mod nl_means;
pub mod pixels;
pub mod similarity;

pub use config::{DenoiseConfig, PatchLayout, Settings};
pub use error::{DenoiseError, Error};
pub use nl_means::{denoise, denoise_into};

/// Installs the `tracing` subscriber used by the binaries. `RUST_LOG`
/// overrides the `info` default.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .try_init();
}
