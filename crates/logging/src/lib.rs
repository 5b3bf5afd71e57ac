// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! # Atom builder's logging setup
//!
//! Everything logs through the [`log`] facade. This crate installs the backend: `env_logger`
//! on desktop, so the configuration can come from the environment, and `console_log` in the
//! browser, which sends records to the Javascript console.
//!
//! By default, the logging level is set to [`Info`](log::Level::Info) for debug builds, and
//! [`Warn`](log::Level::Warn) for release builds. This can be overridden by setting the `RUST_LOG`
//! environment variable, like so:
//!
//! ```sh
//! $> RUST_LOG=atom_builder=debug cargo run -- preset He
//! ```

mod platform_impl;

/// The level used when `RUST_LOG` does not say otherwise.
pub fn default_level() -> log::LevelFilter {
    if cfg!(debug_assertions) {
        log::LevelFilter::Info
    } else {
        log::LevelFilter::Warn
    }
}

/// Captures logs from the listed crates at [`default_level`].
///
/// Calling this more than once is harmless; only the first call installs a logger.
pub fn init(crates: &[&str]) {
    init_with_level(crates, default_level());
}

/// Captures logs from the listed crates with a minimum level of `log_level`.
pub fn init_with_level(crates: &[&str], log_level: log::LevelFilter) {
    platform_impl::init_with_level(crates, log_level);
}

// End of File
