//! Logging setup and the windowed entry point.

use std::path::Path;

use crate::{Options, Result, Scene, TitleOverlayHost};

/// Initializes `env_logger` once. Later calls do nothing.
///
/// The log level comes from `RUST_LOG`, e.g. `RUST_LOG=flythrough=debug`.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Loads and validates options from a JSON file.
///
/// # Example
///
/// ```no_run
/// use flythrough::*;
///
/// fn main() -> Result<()> {
///     let options = load_options("flythrough.json")?;
///     show(options)
/// }
/// ```
pub fn load_options(path: impl AsRef<Path>) -> Result<Options> {
    Options::load(path)
}

/// Opens the flythrough window and blocks until it is closed.
///
/// The popup is shown in the window title. Click it (the configured popup
/// rectangle) or press Escape to dismiss it.
///
/// # Errors
///
/// Returns a configuration error if `options` cannot build a scene, or an
/// event loop error if the window cannot be created.
pub fn show(options: Options) -> Result<()> {
    init_logging();
    let scene = Scene::new(options, TitleOverlayHost::new("flythrough"))?;
    crate::app::run_app(scene)
}
