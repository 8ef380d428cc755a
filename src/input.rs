use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// An edit to the text entry surface
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    Insert(char),
    Paste(String),
    Backspace,
}

impl Edit {
    /// Map a key press to an edit. Keys carrying only one of Ctrl or Alt are
    /// commands, not text. Both together is AltGr.
    pub fn from_key(key: &KeyEvent) -> Option<Self> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        if ctrl != alt {
            return None;
        }

        match key.code {
            KeyCode::Char(c) => Some(Edit::Insert(c)),
            KeyCode::Enter => Some(Edit::Insert('\n')),
            KeyCode::Backspace => Some(Edit::Backspace),
            _ => None,
        }
    }

    /// The full value of the surface after applying this edit to `current`.
    /// The session always consumes whole values, never deltas.
    pub fn apply(&self, current: &str) -> String {
        let mut value = current.to_owned();
        match self {
            Edit::Insert(c) => value.push(*c),
            Edit::Paste(text) => value.push_str(&normalize_paste(text)),
            Edit::Backspace => {
                value.pop();
            }
        }
        value
    }
}

// terminals deliver pasted line breaks as \r or \r\n
fn normalize_paste(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
