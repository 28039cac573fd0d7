/// Day/night selector over two immutable values.
///
/// Both variants are built once; switching only changes which one [`active`]
/// returns, so flipping back restores the original value exactly.
///
/// [`active`]: ModeSwitch::active
#[derive(Debug, Clone, PartialEq)]
pub struct ModeSwitch<T> {
    day: T,
    night: T,
    night_mode: bool,
}

impl<T> ModeSwitch<T> {
    /// Starts in day mode.
    pub fn new(day: T, night: T) -> Self {
        Self { day, night, night_mode: false }
    }

    /// Stores the flag. Never triggers a redraw by itself.
    #[inline]
    pub fn set_night_mode(&mut self, enabled: bool) {
        self.night_mode = enabled;
    }

    #[inline]
    pub fn is_night(&self) -> bool {
        self.night_mode
    }

    #[inline]
    pub fn active(&self) -> &T {
        if self.night_mode { &self.night } else { &self.day }
    }
}
