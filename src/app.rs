use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;

use crate::input::Edit;
use crate::runtime::AppEvent;
use crate::session::{InputOutcome, Phase, TypingSession};

/// Which part of the screen receives plain keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Controls,
}

/// Buttons offered below the verse. The set depends on the session phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Control {
    #[strum(to_string = "Skip to Next Verse")]
    SkipToNext,
    #[strum(to_string = "Reset")]
    Reset,
    #[strum(to_string = "Next Verse")]
    NextVerse,
    #[strum(to_string = "Try Again")]
    TryAgain,
}

impl Control {
    pub fn for_phase(phase: Phase) -> [Control; 2] {
        match phase {
            Phase::InProgress => [Control::SkipToNext, Control::Reset],
            Phase::Complete => [Control::NextVerse, Control::TryAgain],
        }
    }
}

/// Whether the event loop should keep running after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

#[derive(Debug, Clone)]
pub struct App {
    pub session: TypingSession,
    pub focus: Focus,
    pub selected_control: usize,
}

impl Default for App {
    fn default() -> Self {
        Self::new(TypingSession::default())
    }
}

impl App {
    pub fn new(session: TypingSession) -> Self {
        Self {
            session,
            focus: Focus::Input,
            selected_control: 0,
        }
    }

    pub fn controls(&self) -> [Control; 2] {
        Control::for_phase(self.session.phase())
    }

    pub fn selected(&self) -> Control {
        self.controls()[self.selected_control]
    }

    /// The text surface turns read-only once the verse is complete
    pub fn input_enabled(&self) -> bool {
        !self.session.is_complete()
    }

    pub fn edit(&mut self, edit: &Edit, now: Instant) -> InputOutcome {
        if !self.input_enabled() {
            return InputOutcome::Ignored;
        }

        let value = edit.apply(self.session.typed());
        let outcome = self.session.handle_input(&value, now);
        if outcome == InputOutcome::Completed {
            self.focus = Focus::Controls;
            self.selected_control = 0;
        }
        outcome
    }

    pub fn advance(&mut self) {
        self.session.advance();
        self.focus_input();
    }

    pub fn reset(&mut self) {
        self.session.reset();
        self.focus_input();
    }

    pub fn activate(&mut self, control: Control) {
        debug!("activated {control}");
        match control {
            Control::SkipToNext | Control::NextVerse => self.advance(),
            Control::Reset | Control::TryAgain => self.reset(),
        }
    }

    fn focus_input(&mut self) {
        self.focus = Focus::Input;
        self.selected_control = 0;
    }

    fn toggle_focus(&mut self) {
        // nothing to type into once complete
        if self.session.is_complete() {
            return;
        }
        self.focus = match self.focus {
            Focus::Input => Focus::Controls,
            Focus::Controls => Focus::Input,
        };
    }

    fn select_next(&mut self) {
        self.selected_control = (self.selected_control + 1) % self.controls().len();
    }

    fn select_prev(&mut self) {
        let len = self.controls().len();
        self.selected_control = (self.selected_control + len - 1) % len;
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Flow {
        if is_command(&key) {
            match key.code {
                KeyCode::Char('c') => return Flow::Quit,
                KeyCode::Char('n') => self.advance(),
                KeyCode::Char('r') => self.reset(),
                _ => {}
            }
            return Flow::Continue;
        }

        match key.code {
            KeyCode::Esc => return Flow::Quit,
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            _ => match self.focus {
                Focus::Input => {
                    if let Some(edit) = Edit::from_key(&key) {
                        self.edit(&edit, now);
                    }
                }
                Focus::Controls => self.handle_controls_key(key),
            },
        }

        Flow::Continue
    }

    fn handle_controls_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Up => self.select_prev(),
            KeyCode::Right | KeyCode::Down => self.select_next(),
            KeyCode::Enter | KeyCode::Char(' ') => self.activate(self.selected()),
            KeyCode::Char('n') if self.session.is_complete() => self.activate(Control::NextVerse),
            KeyCode::Char('r') if self.session.is_complete() => self.activate(Control::TryAgain),
            _ => {}
        }
    }

    pub fn handle_paste(&mut self, text: &str, now: Instant) -> Flow {
        if self.focus == Focus::Input {
            self.edit(&Edit::Paste(text.to_owned()), now);
        }
        Flow::Continue
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) -> Flow {
        match event {
            AppEvent::Key(key) => self.handle_key(key, now),
            AppEvent::Paste(text) => self.handle_paste(&text, now),
            AppEvent::Resize => Flow::Continue,
        }
    }
}

// Ctrl+Alt is how AltGr chars arrive on some platforms, so those are text
fn is_command(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && !key.modifiers.contains(KeyModifiers::ALT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verses::VerseEntry;
    use std::time::Duration;

    fn app(texts: &[&'static str]) -> App {
        let entries = texts.iter().map(|t| VerseEntry::new(*t, "ref")).collect();
        App::new(TypingSession::new(entries).unwrap())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)), now);
        }
    }

    #[test]
    fn test_new_app() {
        let app = App::default();
        assert_eq!(app.focus, Focus::Input);
        assert_eq!(app.controls(), [Control::SkipToNext, Control::Reset]);
        assert!(app.input_enabled());
    }

    #[test]
    fn test_control_labels() {
        assert_eq!(Control::SkipToNext.to_string(), "Skip to Next Verse");
        assert_eq!(Control::Reset.to_string(), "Reset");
        assert_eq!(Control::NextVerse.to_string(), "Next Verse");
        assert_eq!(Control::TryAgain.to_string(), "Try Again");
    }

    #[test]
    fn test_typing_reaches_session() {
        let mut app = app(&["hello"]);
        type_str(&mut app, "hel", Instant::now());
        assert_eq!(app.session.typed(), "hel");
        assert!(app.session.started_at().is_some());

        app.handle_key(key(KeyCode::Backspace), Instant::now());
        assert_eq!(app.session.typed(), "he");
    }

    #[test]
    fn test_enter_inserts_newline() {
        let mut app = app(&["a\nb"]);
        type_str(&mut app, "a", Instant::now());
        app.handle_key(key(KeyCode::Enter), Instant::now());
        type_str(&mut app, "b", Instant::now());
        assert!(app.session.is_complete());
    }

    #[test]
    fn test_completion_moves_focus_to_controls() {
        let mut app = app(&["hi", "yo"]);
        type_str(&mut app, "hi", Instant::now());

        assert!(app.session.is_complete());
        assert!(!app.input_enabled());
        assert_eq!(app.focus, Focus::Controls);
        assert_eq!(app.controls(), [Control::NextVerse, Control::TryAgain]);
        assert_eq!(app.selected(), Control::NextVerse);
    }

    #[test]
    fn test_input_ignored_when_complete() {
        let mut app = app(&["hi"]);
        let now = Instant::now();
        type_str(&mut app, "hi", now);

        assert_eq!(app.edit(&Edit::Insert('!'), now), InputOutcome::Ignored);
        app.handle_paste("more", now);
        assert_eq!(app.session.typed(), "hi");
    }

    #[test]
    fn test_enter_on_next_verse_advances() {
        let mut app = app(&["hi", "yo"]);
        type_str(&mut app, "hi", Instant::now());

        app.handle_key(key(KeyCode::Enter), Instant::now());
        assert_eq!(app.session.current_index(), 1);
        assert_eq!(app.focus, Focus::Input);
        assert!(!app.session.is_complete());
    }

    #[test]
    fn test_try_again_keeps_index() {
        let mut app = app(&["hi", "yo"]);
        type_str(&mut app, "hi", Instant::now());

        app.handle_key(key(KeyCode::Right), Instant::now());
        assert_eq!(app.selected(), Control::TryAgain);
        app.handle_key(key(KeyCode::Enter), Instant::now());

        assert_eq!(app.session.current_index(), 0);
        assert_eq!(app.session.typed(), "");
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_letter_shortcuts_when_complete() {
        let mut app = app(&["hi", "yo"]);
        type_str(&mut app, "hi", Instant::now());
        app.handle_key(key(KeyCode::Char('r')), Instant::now());
        assert_eq!(app.session.current_index(), 0);
        assert!(!app.session.is_complete());

        type_str(&mut app, "hi", Instant::now());
        app.handle_key(key(KeyCode::Char('n')), Instant::now());
        assert_eq!(app.session.current_index(), 1);
    }

    #[test]
    fn test_ctrl_shortcuts_in_progress() {
        let mut app = app(&["hello", "world"]);
        type_str(&mut app, "he", Instant::now());

        app.handle_key(ctrl('r'), Instant::now());
        assert_eq!(app.session.typed(), "");
        assert_eq!(app.session.current_index(), 0);

        type_str(&mut app, "he", Instant::now());
        app.handle_key(ctrl('n'), Instant::now());
        assert_eq!(app.session.typed(), "");
        assert_eq!(app.session.current_index(), 1);

        app.handle_key(ctrl('n'), Instant::now());
        assert_eq!(app.session.current_index(), 0);
    }

    #[test]
    fn test_tab_toggles_focus() {
        let mut app = app(&["hello", "world"]);
        app.handle_key(key(KeyCode::Tab), Instant::now());
        assert_eq!(app.focus, Focus::Controls);

        // typing while on the buttons does not reach the session
        type_str(&mut app, "h", Instant::now());
        assert_eq!(app.session.typed(), "");

        app.handle_key(key(KeyCode::Enter), Instant::now());
        assert_eq!(app.session.current_index(), 1);
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_altgr_chars_are_typed() {
        let mut app = app(&["a@b{"]);
        let altgr = KeyModifiers::CONTROL | KeyModifiers::ALT;
        let now = Instant::now();

        type_str(&mut app, "a", now);
        assert_eq!(
            app.handle_key(KeyEvent::new(KeyCode::Char('@'), altgr), now),
            Flow::Continue
        );
        assert_eq!(app.session.typed(), "a@");

        type_str(&mut app, "b", now);
        app.handle_key(KeyEvent::new(KeyCode::Char('{'), altgr), now);
        assert!(app.session.is_complete());

        // AltGr+c is a char, not Ctrl+C
        let mut other = self::app(&["c"]);
        assert_eq!(
            other.handle_key(KeyEvent::new(KeyCode::Char('c'), altgr), now),
            Flow::Continue
        );
        assert_eq!(other.session.typed(), "c");
    }

    #[test]
    fn test_tab_ignored_when_complete() {
        let mut app = app(&["hi"]);
        type_str(&mut app, "hi", Instant::now());
        app.handle_key(key(KeyCode::Tab), Instant::now());
        assert_eq!(app.focus, Focus::Controls);
    }

    #[test]
    fn test_selection_wraps() {
        let mut app = app(&["hi"]);
        app.focus = Focus::Controls;
        app.handle_key(key(KeyCode::Left), Instant::now());
        assert_eq!(app.selected(), Control::Reset);
        app.handle_key(key(KeyCode::Right), Instant::now());
        assert_eq!(app.selected(), Control::SkipToNext);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app(&["hi"]);
        assert_eq!(app.handle_key(key(KeyCode::Esc), Instant::now()), Flow::Quit);
        assert_eq!(app.handle_key(ctrl('c'), Instant::now()), Flow::Quit);
        assert_eq!(
            app.handle_key(key(KeyCode::Char('q')), Instant::now()),
            Flow::Continue
        );
    }

    #[test]
    fn test_handle_event_dispatch() {
        let mut app = app(&["hello"]);
        let now = Instant::now();
        assert_eq!(
            app.handle_event(AppEvent::Key(key(KeyCode::Char('h'))), now),
            Flow::Continue
        );
        assert_eq!(app.handle_event(AppEvent::Paste("el".into()), now), Flow::Continue);
        assert_eq!(app.handle_event(AppEvent::Resize, now), Flow::Continue);
        assert_eq!(app.session.typed(), "hel");
        assert_eq!(
            app.handle_event(AppEvent::Key(key(KeyCode::Esc)), now),
            Flow::Quit
        );
    }

    #[test]
    fn test_paste_as_first_input_leaves_clock_stopped() {
        let mut app = app(&["hello world"]);
        let now = Instant::now();
        app.handle_paste("hello world", now + Duration::from_secs(3));

        assert!(app.session.is_complete());
        assert!(app.session.started_at().is_none());
        assert_eq!(app.session.wpm(), 0);
    }
}
