// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file,
// You can obtain one at <https://mozilla.org/MPL/2.0/>.

//! Keyboard shortcuts of the atom builder.
//!
//! The host forwards key presses as a [`Key`] plus the [`ModifierKeys`] held at the time;
//! [`KeyCommand::from_key`] turns the chord into the editing command it is bound to.

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct ModifierKeys: u8 {
        const CAPSLOCK = 1 << 0;
        const SHIFT    = 1 << 1;
        const CONTROL  = 1 << 2;
        const OPTION   = 1 << 3;
        const COMMAND  = 1 << 4;
    }
}

impl ModifierKeys {
    /// Control on Windows/Linux, Command on macOS. Either one counts as the shortcut key.
    pub fn shortcut(self) -> bool {
        self.intersects(ModifierKeys::CONTROL | ModifierKeys::COMMAND)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Character(char),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyCommand {
    DeleteSelected,
    Undo,
    Redo,
    DuplicateSelected,
    DeselectAll,
}

impl KeyCommand {
    /// Maps a key press to its command, if it has one.
    ///
    /// Deleting is suppressed while a text input has focus, so that Backspace edits the text
    /// instead of the scene.
    pub fn from_key(key: Key, modifiers: ModifierKeys, text_input_focused: bool) -> Option<Self> {
        match key {
            Key::Delete | Key::Backspace if text_input_focused => None,
            Key::Delete | Key::Backspace => Some(KeyCommand::DeleteSelected),
            Key::Escape => Some(KeyCommand::DeselectAll),
            Key::Character(c) if modifiers.shortcut() => match c.to_ascii_lowercase() {
                'z' if modifiers.contains(ModifierKeys::SHIFT) => Some(KeyCommand::Redo),
                'z' => Some(KeyCommand::Undo),
                'd' => Some(KeyCommand::DuplicateSelected),
                _ => None,
            },
            Key::Character(_) => None,
        }
    }
}


// End of File
