/// Keyboard key identifier, resolved from the logical (layout-aware) key.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// Printable key, lowercased so `N` and `n` compare equal.
    Char(char),

    /// Key not represented here.
    Unknown,
}

impl Key {
    /// Builds a `Char` key from typed text; `None` for empty strings.
    pub fn from_text(text: &str) -> Option<Key> {
        let ch = text.chars().next()?;
        Some(Key::Char(ch.to_lowercase().next().unwrap_or(ch)))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Focused(bool),
    Key { key: Key, state: KeyState, repeat: bool },
}
