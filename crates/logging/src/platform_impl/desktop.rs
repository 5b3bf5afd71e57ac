// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

/// Builds the filter string that would otherwise be set in `RUST_LOG`, e.g.
/// `atom_builder=info,atom_builder_common=info`.
pub(crate) fn filter_string(crates: &[&str], log_level: log::LevelFilter) -> String {
    let level = log_level.as_str().to_ascii_lowercase();
    crates
        .iter()
        .map(|pkg_name| format!("{}={}", pkg_name.replace('-', "_"), level))
        .collect::<Vec<_>>()
        .join(",")
}

pub(crate) fn init_with_level(crates: &[&str], log_level: log::LevelFilter) {
    let env = env_logger::Env::default().default_filter_or(filter_string(crates, log_level));
    // A logger may already be installed (tests, embedding hosts); keep that one.
    if env_logger::Builder::from_env(env).try_init().is_err() {
        log::debug!("logger already initialized, keeping the existing one");
    }
}


// End of File
