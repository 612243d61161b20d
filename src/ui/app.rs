//! Main TUI application state and logic

use crate::parser::profile::Profile;
use crate::session::{analyze, History, Transcript};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::{debug, info};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Tokens,
    Tree,
    Transcript,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: tokens -> tree -> transcript)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Tokens => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Transcript,
            FocusedPane::Transcript => FocusedPane::Tokens,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Tokens => FocusedPane::Transcript,
            FocusedPane::Tree => FocusedPane::Tokens,
            FocusedPane::Transcript => FocusedPane::Tree,
        }
    }
}

/// The main application state
pub struct App {
    /// Language profile new input is analyzed with
    pub profile: Profile,

    /// The line being edited
    pub input: String,

    /// Cursor position in `input`, in chars
    pub cursor: usize,

    /// Analyses shown so far; the latest feeds the tokens and tree panes
    pub history: History,

    /// Report lines of every analysis
    pub transcript: Transcript,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub tokens_scroll: usize,
    pub tree_scroll: usize,
    pub transcript_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Total number of lines analyzed, including evicted ones
    pub analyzed: usize,
}

impl App {
    /// Create a new app analyzing input with `profile`
    pub fn new(profile: Profile) -> Self {
        App {
            profile,
            input: String::new(),
            cursor: 0,
            history: History::default(),
            transcript: Transcript::new(),
            focused_pane: FocusedPane::Transcript,
            tokens_scroll: 0,
            tree_scroll: 0,
            transcript_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready! Type a line and press Enter."),
            analyzed: 0,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        info!(profile = %self.profile, "shell started");

        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        info!(analyzed = self.analyzed, "shell stopped");
        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, then the input line and the status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(size);

        // Left column: Tokens | Right column: Tree (top) and Output (bottom)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(main_chunks[0]);

        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(columns[1]);

        let latest = self.history.latest();

        super::panes::render_tokens_pane(
            frame,
            columns[0],
            latest,
            self.focused_pane == FocusedPane::Tokens,
            &mut self.tokens_scroll,
        );

        super::panes::render_tree_pane(
            frame,
            right_rows[0],
            latest,
            self.focused_pane == FocusedPane::Tree,
            &mut self.tree_scroll,
        );

        super::panes::render_transcript_pane(
            frame,
            right_rows[1],
            &self.transcript,
            self.focused_pane == FocusedPane::Transcript,
            &mut self.transcript_scroll,
        );

        super::panes::render_input_line(frame, main_chunks[1], &self.input, self.cursor);

        super::panes::render_status_bar(
            frame,
            main_chunks[2],
            &self.status_message,
            self.profile,
            self.analyzed,
            latest.map(|a| a.is_ok()),
        );
    }

    /// Handle keyboard events
    pub(crate) fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if ctrl => {
                self.should_quit = true;
            }
            KeyCode::Char('l') if ctrl => {
                self.transcript.clear();
                self.transcript_scroll = 0;
                self.status_message = "Output cleared".to_string();
            }
            KeyCode::Char(c) if !ctrl => {
                let at = self.byte_index();
                self.input.insert(at, c);
                self.cursor += 1;
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let at = self.byte_index();
                    self.input.remove(at);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.input.chars().count() {
                    let at = self.byte_index();
                    self.input.remove(at);
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.input.chars().count());
            }
            KeyCode::Home => {
                self.cursor = 0;
            }
            KeyCode::End => {
                self.cursor = self.input.chars().count();
            }
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
            }
            KeyCode::F(2) => {
                self.profile = self.profile.next();
                self.status_message = format!("Profile: {}", self.profile);
                debug!(profile = %self.profile, "profile changed");
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    /// Analyze the current input line
    fn submit(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.cursor = 0;

        let trimmed = line.trim();
        if trimmed.is_empty() {
            return;
        }
        if trimmed.eq_ignore_ascii_case("exit") {
            self.should_quit = true;
            return;
        }

        let analysis = analyze(&line, self.profile);
        self.status_message = match &analysis.outcome {
            Ok(program) => format!("Parsed {} statement(s)", program.statements.len()),
            Err(err) => err.to_string(),
        };

        self.transcript.record(&analysis);
        self.history.push(analysis);
        self.analyzed += 1;

        self.tokens_scroll = 0;
        self.tree_scroll = 0;
        // Auto-scroll output to bottom
        self.transcript_scroll = usize::MAX;
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Tokens => &mut self.tokens_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
            FocusedPane::Transcript => &mut self.transcript_scroll,
        }
    }

    /// Byte offset of the cursor in `input`
    fn byte_index(&self) -> usize {
        self.input
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_line(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_enter_analyzes_line() {
        let mut app = App::new(Profile::Full);
        type_line(&mut app, "let a = [1, 2];");

        assert!(app.input.is_empty());
        assert_eq!(app.cursor, 0);
        assert_eq!(app.analyzed, 1);
        assert_eq!(app.status_message, "Parsed 1 statement(s)");
        assert!(app.history.latest().is_some_and(|a| a.is_ok()));
        assert_eq!(app.transcript.lines()[0], "[full] > let a = [1, 2];");
    }

    #[test]
    fn test_exit_and_escape_quit() {
        let mut app = App::new(Profile::Full);
        type_line(&mut app, "  EXIT ");
        assert!(app.should_quit);
        assert_eq!(app.analyzed, 0);

        let mut app = App::new(Profile::Full);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_blank_line_is_ignored() {
        let mut app = App::new(Profile::Full);
        type_line(&mut app, "   ");
        assert!(app.history.is_empty());
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn test_line_editing() {
        let mut app = App::new(Profile::Full);
        for c in "ac".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Char('é'));
        press(&mut app, KeyCode::Char('b'));
        assert_eq!(app.input, "aébc");
        assert_eq!(app.cursor, 3);

        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Home);
        press(&mut app, KeyCode::Delete);
        assert_eq!(app.input, "éc");
        assert_eq!(app.cursor, 0);
    }

    #[test]
    fn test_f2_cycles_profile() {
        let mut app = App::new(Profile::While);
        press(&mut app, KeyCode::F(2));
        assert_eq!(app.profile, Profile::Full);

        press(&mut app, KeyCode::F(2));
        type_line(&mut app, "const t = true;");
        let analysis = app.history.latest().unwrap();
        assert_eq!(analysis.profile, Profile::Declarations);
        assert!(analysis.is_ok());
    }

    #[test]
    fn test_focus_and_scroll() {
        let mut app = App::new(Profile::Full);
        assert_eq!(app.focused_pane, FocusedPane::Transcript);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Tokens);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.tokens_scroll, 1);
        assert_eq!(app.transcript_scroll, 0);
    }

    #[test]
    fn test_ctrl_l_clears_output() {
        let mut app = App::new(Profile::Full);
        type_line(&mut app, "x;");
        assert!(!app.transcript.is_empty());

        app.handle_key_event(KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL));
        assert!(app.transcript.is_empty());
        assert_eq!(app.history.len(), 1);
        assert!(app.input.is_empty());
    }
}
