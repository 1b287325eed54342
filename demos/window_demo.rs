//! Opens the flythrough in a window.
//!
//! Pass a JSON options file as the first argument to override the defaults.
//! Click a marker to stop the camera; click the popup area or press Escape
//! to resume.

use flythrough::*;

fn main() -> Result<()> {
    init_logging();

    let options = match std::env::args().nth(1) {
        Some(path) => load_options(path)?,
        None => Options::default(),
    };

    show(options)
}
