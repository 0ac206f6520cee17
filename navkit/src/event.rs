use crate::element::ElementId;

/// Host input events, targeted at elements.
///
/// Hosts translate their native input into these and feed them to whoever
/// listens (for instance a focus registry). Focus and blur are reported for
/// every focus change, including programmatic ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Key press, targeted at the focused element
    Key {
        target: Option<ElementId>,
        key: Key,
        modifiers: Modifiers,
    },
    /// Pointer activation of an element
    Click { target: ElementId },
    /// Element gained focus
    Focus { target: ElementId },
    /// Element lost focus
    Blur { target: ElementId },
}

impl Event {
    /// The element the event is targeted at, if any.
    pub fn target(&self) -> Option<&ElementId> {
        match self {
            Event::Key { target, .. } => target.as_ref(),
            Event::Click { target } | Event::Focus { target } | Event::Blur { target } => {
                Some(target)
            }
        }
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

impl Key {
    /// Enter and Space both activate the item under the cursor.
    pub fn is_activation(self) -> bool {
        matches!(self, Key::Enter | Key::Char(' '))
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }
}

/// A key together with the modifiers held while pressing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A key pressed without modifiers.
    pub fn plain(key: Key) -> Self {
        Self::new(key, Modifiers::default())
    }
}

impl From<Key> for KeyCombo {
    fn from(key: Key) -> Self {
        Self::plain(key)
    }
}

/// Keys without a counterpart (media keys, bare modifiers, ...) are handed
/// back unchanged.
impl TryFrom<crossterm::event::KeyCode> for Key {
    type Error = crossterm::event::KeyCode;

    fn try_from(code: crossterm::event::KeyCode) -> Result<Self, Self::Error> {
        use crossterm::event::KeyCode as Code;
        let key = match code {
            Code::Char(c) => Key::Char(c),
            Code::F(n) => Key::F(n),
            Code::Enter => Key::Enter,
            Code::Esc => Key::Escape,
            Code::Tab => Key::Tab,
            Code::BackTab => Key::BackTab,
            Code::Backspace => Key::Backspace,
            Code::Delete => Key::Delete,
            Code::Insert => Key::Insert,
            Code::Up => Key::Up,
            Code::Down => Key::Down,
            Code::Left => Key::Left,
            Code::Right => Key::Right,
            Code::Home => Key::Home,
            Code::End => Key::End,
            Code::PageUp => Key::PageUp,
            Code::PageDown => Key::PageDown,
            other => return Err(other),
        };
        Ok(key)
    }
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl TryFrom<crossterm::event::KeyEvent> for KeyCombo {
    type Error = crossterm::event::KeyCode;

    fn try_from(event: crossterm::event::KeyEvent) -> Result<Self, Self::Error> {
        Ok(Self::new(event.code.try_into()?, event.modifiers.into()))
    }
}
