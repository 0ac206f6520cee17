//! Arrow key interpretation under reading direction and orientation.
//!
//! Strategies reason in logical terms: `Right` opens, `Left` closes, `Down`
//! moves to the next item and `Up` to the previous one. These helpers turn
//! physical keys into those logical keys.

use navkit::Key;

use crate::config::ReadingDirection;

/// Swap Left and Right under right-to-left reading order.
pub fn mirror(key: Key, direction: ReadingDirection) -> Key {
    if !direction.is_rtl() {
        return key;
    }
    match key {
        Key::Left => Key::Right,
        Key::Right => Key::Left,
        other => other,
    }
}

/// Reinterpret arrows for a horizontal toolbar: Left/Right walk the items
/// (as Up/Down do in a vertical list) and Up/Down take the Left/Right role.
pub fn rotate_horizontal(key: Key) -> Key {
    match key {
        Key::Left => Key::Up,
        Key::Right => Key::Down,
        Key::Up => Key::Left,
        Key::Down => Key::Right,
        other => other,
    }
}

/// Linear movement requested by a logical key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Previous,
    Next,
    First,
    Last,
}

impl Step {
    pub fn from_logical(key: Key) -> Option<Self> {
        match key {
            Key::Up => Some(Step::Previous),
            Key::Down => Some(Step::Next),
            Key::Home => Some(Step::First),
            Key::End => Some(Step::Last),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_only_touches_horizontal_arrows() {
        let rtl = ReadingDirection::Rtl;
        assert_eq!(mirror(Key::Left, rtl), Key::Right);
        assert_eq!(mirror(Key::Up, rtl), Key::Up);
        assert_eq!(mirror(Key::Left, ReadingDirection::Ltr), Key::Left);
    }

    #[test]
    fn rotation_composes_with_mirroring() {
        // Visual Left in RTL is "next" on a toolbar.
        let key = rotate_horizontal(mirror(Key::Left, ReadingDirection::Rtl));
        assert_eq!(Step::from_logical(key), Some(Step::Next));
        let key = rotate_horizontal(mirror(Key::Right, ReadingDirection::Ltr));
        assert_eq!(Step::from_logical(key), Some(Step::Next));
    }
}
