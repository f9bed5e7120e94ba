//! TUI application state and logic

use crate::commands::DictionaryLoader;
use crate::config::HISTORY_DAYS;
use crate::core::GameDate;
use crate::game::SubmitOutcome;
use crate::output::share_text;
use crate::session::Session;
use crate::storage::{History, KeyValueStore};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;
use std::time::Duration;

/// How long to wait for a key before checking for a delivered word list
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Messages kept on screen
const MAX_MESSAGES: usize = 5;

/// Application state
pub struct App<S> {
    pub session: Session<S>,
    pub screen: Screen,
    pub messages: Vec<Message>,
    pub history: History,
    pub share_url: Option<String>,
    pub show_share: bool,
    pub should_quit: bool,
    today: GameDate,
    dictionary: Option<DictionaryLoader>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// How to play, shown before the first guess
    Explanation,
    Playing,
    Results,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl<S: KeyValueStore> App<S> {
    /// Wrap a started session. A finished round opens straight on the results.
    #[must_use]
    pub fn new(
        session: Session<S>,
        dictionary: Option<DictionaryLoader>,
        today: GameDate,
        share_url: Option<String>,
    ) -> Self {
        let screen = if session.is_finished() {
            Screen::Results
        } else {
            Screen::Explanation
        };

        let mut app = Self {
            session,
            screen,
            messages: Vec::new(),
            history: History::default(),
            share_url,
            show_share: false,
            should_quit: false,
            today,
            dictionary,
        };

        if screen == Screen::Results {
            app.refresh_history();
            app.add_message("You already played this day.", MessageStyle::Info);
        }
        app
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only process key press events (fixes Windows double-input bug)
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::Explanation => match key.code {
                KeyCode::Esc => self.should_quit = true,
                _ => {
                    self.screen = Screen::Playing;
                    self.add_message(
                        &format!("Guess the {}-letter word.", self.session.game().word_length()),
                        MessageStyle::Info,
                    );
                }
            },
            Screen::Playing => match key.code {
                KeyCode::Esc => self.should_quit = true,
                KeyCode::Enter => self.submit(),
                KeyCode::Backspace => {
                    self.session.backspace();
                }
                KeyCode::Char(c) => {
                    self.session.type_char(c);
                }
                _ => {}
            },
            Screen::Results => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                KeyCode::Char('s') => self.show_share = !self.show_share,
                _ => {}
            },
        }
    }

    /// Attach the word list once the background load delivers it
    pub fn poll_dictionary(&mut self) {
        if let Some(loader) = self.dictionary.as_mut() {
            loader.drain(&mut self.session);
        }
    }

    /// Whether a word list is still on its way
    #[must_use]
    pub fn dictionary_pending(&self) -> bool {
        self.dictionary
            .as_ref()
            .is_some_and(DictionaryLoader::is_pending)
    }

    /// Whether guesses are checked against a loaded word list
    #[must_use]
    pub fn dictionary_loaded(&self) -> bool {
        self.dictionary
            .as_ref()
            .is_some_and(DictionaryLoader::is_loaded)
    }

    fn submit(&mut self) {
        self.poll_dictionary();
        if self.dictionary.as_mut().is_some_and(DictionaryLoader::retry) {
            self.add_message(
                "Word list unavailable, loading it again.",
                MessageStyle::Error,
            );
        }

        let submission = self.session.submit();
        if submission.save_failed {
            self.add_message(
                "Progress could not be saved; playing on without saving.",
                MessageStyle::Error,
            );
        }

        match &submission.outcome {
            SubmitOutcome::Rejected(reason) => {
                self.add_message(&capitalize(&reason.to_string()), MessageStyle::Error);
            }
            SubmitOutcome::BonusUnlocked { hint, .. } => {
                let text = match hint {
                    Some(hint) => format!("🍀 One bonus attempt! Hint: {hint}."),
                    None => "🍀 One bonus attempt!".to_string(),
                };
                self.add_message(&text, MessageStyle::Success);
            }
            SubmitOutcome::Scored { .. } => {}
            SubmitOutcome::Finished { won, .. } => {
                let text = if *won {
                    let count = self.session.game().guesses().len();
                    celebration(count).to_string()
                } else {
                    "Out of attempts. Better luck tomorrow!".to_string()
                };
                let style = if *won {
                    MessageStyle::Success
                } else {
                    MessageStyle::Info
                };
                self.add_message(&text, style);
                self.add_message("Press 's' for share text or 'q' to quit.", MessageStyle::Info);
            }
        }

        if self.session.is_finished() {
            self.refresh_history();
            self.screen = Screen::Results;
        }
    }

    fn refresh_history(&mut self) {
        self.history = self
            .session
            .repository()
            .history(self.today, HISTORY_DAYS);
    }

    /// Share text for the current round
    #[must_use]
    pub fn share_text(&self) -> String {
        share_text(self.session.game(), self.share_url.as_deref())
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        if self.messages.len() > MAX_MESSAGES {
            self.messages.remove(0);
        }
    }
}

fn celebration(guess_count: usize) -> &'static str {
    match guess_count {
        1 => "🎯 HOLE IN ONE! Extraordinary! 🌟",
        2 => "🔥 MAGNIFICENT! Two guesses! 🔥",
        3 => "✨ SPLENDID! Three guesses! ✨",
        4 => "👏 GREAT JOB! Four guesses! 👏",
        5 => "🎉 NICE WORK! Five guesses! 🎉",
        6 => "😅 PHEW! Got it in six! 😅",
        _ => "🍀 Saved by the bonus attempt! 🍀",
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui<S: KeyValueStore>(app: App<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: ratatui::backend::Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    mut app: App<S>,
) -> Result<()> {
    loop {
        app.poll_dictionary();
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
        {
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
