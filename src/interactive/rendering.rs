//! TUI rendering with ratatui

use super::app::{App, MessageStyle, Screen};
use crate::core::{Verdict, glyph_count};
use crate::game::{Game, Round};
use crate::output::formatters::{KEYBOARD_ROWS, display_letter, display_word, guess_count_label};
use crate::storage::KeyValueStore;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui<S: KeyValueStore>(f: &mut Frame, app: &App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(5), // Keyboard
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    match app.screen {
        Screen::Explanation => render_explanation(f, app, chunks[1]),
        Screen::Playing => {
            render_board(f, app.session.game(), main_chunks[0]);
            render_messages(f, app, main_chunks[1]);
        }
        Screen::Results => {
            render_board(f, app.session.game(), main_chunks[0]);
            render_results(f, app, main_chunks[1]);
        }
    }

    render_keyboard(f, app.session.game(), chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let game = app.session.game();
    let title = format!(
        "🐦 CROWdle · {} · {} letters",
        game.date().short_label(),
        game.word_length()
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

const fn verdict_style(verdict: Option<Verdict>) -> Style {
    match verdict {
        Some(Verdict::Correct) => Style::new().fg(Color::Black).bg(Color::Green),
        Some(Verdict::Present) => Style::new().fg(Color::Black).bg(Color::Yellow),
        Some(Verdict::Absent) => Style::new().fg(Color::White).bg(Color::DarkGray),
        None => Style::new(),
    }
}

fn tile(c: char, verdict: Option<Verdict>) -> Span<'static> {
    Span::styled(
        format!(" {} ", display_letter(c)),
        verdict_style(verdict).add_modifier(Modifier::BOLD),
    )
}

fn blank_tiles(count: usize) -> Span<'static> {
    Span::styled(" · ".repeat(count), Style::default().fg(Color::DarkGray))
}

fn render_board(f: &mut Frame, game: &Game, area: Rect) {
    let length = game.word_length();
    let mut lines: Vec<Line> = vec![Line::from("")];

    for (guess, verdicts) in game.scored_guesses() {
        let spans: Vec<Span> = guess
            .chars()
            .iter()
            .zip(&verdicts)
            .map(|(c, v)| tile(*c, Some(*v)))
            .collect();
        lines.push(Line::from(spans));
    }

    let mut remaining = game.allowed_attempts().saturating_sub(game.guesses().len());
    if !game.is_finished() && remaining > 0 {
        let typed = game.input().as_str();
        let mut spans: Vec<Span> = typed
            .chars()
            .map(|c| {
                Span::styled(
                    format!(" {} ", display_letter(c)),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            })
            .collect();
        spans.push(blank_tiles(length.saturating_sub(glyph_count(typed))));
        lines.push(Line::from(spans));
        remaining -= 1;
    }

    for _ in 0..remaining {
        lines.push(Line::from(blank_tiles(length)));
    }

    let title = if game.bonus_granted() {
        " Guesses · bonus attempt "
    } else {
        " Guesses "
    };

    let board = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_keyboard(f: &mut Frame, game: &Game, area: Rect) {
    let states = game.letter_states();
    let lines: Vec<Line> = KEYBOARD_ROWS
        .iter()
        .map(|row| Line::from(row.chars().map(|c| tile(c, states.get(c))).collect::<Vec<_>>()))
        .collect();

    let keyboard = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP));
    f.render_widget(keyboard, area);
}

fn render_explanation<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let length = app.session.game().word_length();
    let example = |word: &str, verdicts: [Option<Verdict>; 5]| -> Line<'static> {
        Line::from(
            word.chars()
                .zip(verdicts)
                .map(|(c, v)| tile(c, v))
                .collect::<Vec<_>>(),
        )
    };

    let lines = vec![
        Line::from(Span::styled(
            "How to play",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Guess today's {length}-letter word from the thesaurus in 6 attempts."
        )),
        Line::from("Miss all six and you get one bonus attempt, with a hint if there is one."),
        Line::from("Type \"ij\" to enter the Ĳ, which counts as a single letter."),
        Line::from(""),
        example(
            "appel",
            [Some(Verdict::Correct), None, None, None, None],
        ),
        Line::from("A is in the word and in the right spot."),
        Line::from(""),
        example(
            "peper",
            [None, Some(Verdict::Present), None, None, None],
        ),
        Line::from("E is in the word but in another spot."),
        Line::from(""),
        example(
            "tafel",
            [None, None, None, None, Some(Verdict::Absent)],
        ),
        Line::from("L is not in the word in any spot."),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to start, Esc to quit.",
            Style::default().fg(Color::Cyan),
        )),
    ];

    let explanation = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Welcome ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
    f.render_widget(explanation, area);
}

fn render_messages<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_results<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(7),    // Outcome and word
            Constraint::Length(3), // Win rate
            Constraint::Min(6),    // History or share text
        ])
        .split(area);

    render_outcome(f, app, chunks[0]);
    render_win_rate(f, app, chunks[1]);
    if app.show_share {
        render_share(f, app, chunks[2]);
    } else {
        render_history(f, app, chunks[2]);
    }
}

fn render_outcome<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let game = app.session.game();
    let word = app.session.word();

    let headline = if game.is_won() {
        Span::styled(
            format!("🎉 Solved in {}!", guess_count_label(game.guesses().len())),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            "Game over",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    };

    let definition = word.definition().map_or_else(
        || {
            Span::styled(
                "No definition is available for this word.",
                Style::default().fg(Color::DarkGray),
            )
        },
        |d| Span::styled(d.to_string(), Style::default().add_modifier(Modifier::ITALIC)),
    );

    let lines = vec![
        Line::from(headline),
        Line::from(""),
        Line::from(vec![
            Span::raw("The word was "),
            Span::styled(
                display_word(game.target().text()),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(definition),
        Line::from(Span::styled(
            word.term_id.clone(),
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(""),
        Line::from(format!(
            "Played: {}   Won: {}",
            app.session.stats().games_played,
            app.session.stats().games_won
        )),
    ];

    let outcome = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(" Result ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(outcome, area);
}

fn render_win_rate<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let rate = app.session.stats().win_rate().min(100);

    let gauge = Gauge::default()
        .block(Block::default().title(" Win rate ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(u16::try_from(rate).unwrap_or(100))
        .label(format!("{rate}%"));
    f.render_widget(gauge, area);
}

fn history_item(round: &Round) -> ListItem<'static> {
    let (outcome, color) = if !round.finished {
        ("in progress".to_string(), Color::Yellow)
    } else if round.won {
        (guess_count_label(round.guesses.len()), Color::Green)
    } else {
        ("not solved".to_string(), Color::Red)
    };

    ListItem::new(Line::from(vec![
        Span::raw(format!("{:<12}", round.date.short_label())),
        Span::styled(outcome, Style::default().fg(color)),
    ]))
}

fn render_history<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let mut items: Vec<ListItem> = app.history.recent.iter().map(history_item).collect();

    if !app.history.missed.is_empty() {
        let labels: Vec<String> = app.history.missed.iter().map(|d| d.short_label()).collect();
        items.push(ListItem::new(""));
        items.push(
            ListItem::new(format!("Missed: {}", labels.join(", ")))
                .style(Style::default().fg(Color::Magenta)),
        );
        if let Some(oldest) = app.history.missed.last() {
            items.push(
                ListItem::new(format!("Catch up with: crowdle --date {oldest}"))
                    .style(Style::default().fg(Color::DarkGray)),
            );
        }
    }

    let history = List::new(items).block(
        Block::default()
            .title(" Last 7 days ")
            .borders(Borders::ALL),
    );
    f.render_widget(history, area);
}

fn render_share<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let share = Paragraph::new(app.share_text())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Share ")
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(share, area);
}

fn render_status<S: KeyValueStore>(f: &mut Frame, app: &App<S>, area: Rect) {
    let help_text = match app.screen {
        Screen::Explanation => "Any key: Start | Esc: Quit".to_string(),
        Screen::Playing => {
            let validation = if app.dictionary_loaded() {
                "word list loaded"
            } else if app.dictionary_pending() {
                "loading word list..."
            } else if app.session.game().has_dictionary() {
                "word list unavailable"
            } else {
                "no word list"
            };
            format!("Enter: Submit | Backspace: Delete | Esc: Quit | {validation}")
        }
        Screen::Results => "s: Share text | q: Quit".to_string(),
    };

    let help = Paragraph::new(help_text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, area);
}
