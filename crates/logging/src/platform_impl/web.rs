// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

pub(crate) fn init_with_level(crates: &[&str], log_level: log::LevelFilter) {
    let _ = crates;
    // console_log does not have an "off" level, so just don't configure it.
    let Some(log_level) = log_level.to_level() else {
        return;
    };
    if console_log::init_with_level(log_level).is_err() {
        log::debug!("logger already initialized, keeping the existing one");
    }
}

// End of File
