use crate::bidding::Trump;
use crate::transport::Transport;
use crate::tui::app::{AppState, InputAction, Scene};
use crate::tui::ui;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

pub fn run<T: Transport>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut AppState<T>,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) {
                    break;
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.agents_on_turn();
            last_tick = Instant::now();
        }
    }
    Ok(())
}

/// Map a key to an app action. Returns true when the user asked to quit.
pub fn handle_key<T: Transport>(app: &mut AppState<T>, code: KeyCode) -> bool {
    if app.bid_entry_active() {
        handle_bid_entry_key(app, code);
        return false;
    }
    match code {
        KeyCode::Char('?') => {
            let _ = app.handle_input(InputAction::ToggleHelp);
            return false;
        }
        KeyCode::Char('h') | KeyCode::Char('H') => {
            let _ = app.handle_input(InputAction::ToggleHistory);
            return false;
        }
        _ => {}
    }
    if app.help_open() {
        if matches!(code, KeyCode::Esc) {
            let _ = app.handle_input(InputAction::ToggleHelp);
        }
        return false;
    }
    if app.history_open() {
        match code {
            KeyCode::Up => {
                let _ = app.handle_input(InputAction::HistoryUp);
            }
            KeyCode::Down => {
                let _ = app.handle_input(InputAction::HistoryDown);
            }
            KeyCode::Esc => {
                let _ = app.handle_input(InputAction::ToggleHistory);
            }
            _ => {}
        }
        return false;
    }

    match app.scene {
        Scene::Lobby => match code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                let _ = app.handle_input(InputAction::Deal);
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return true,
            _ => {}
        },
        Scene::Table => match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Char(' ') => {
                let _ = app.handle_input(InputAction::Deal);
            }
            KeyCode::Char('b') | KeyCode::Char('B') => {
                let _ = app.handle_input(InputAction::BidOpen);
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if app.handle_input(InputAction::Pass) {
                    app.agents_on_turn();
                }
            }
            KeyCode::Char('k') | KeyCode::Char('K') => {
                if app.handle_input(InputAction::RevealKitty) {
                    app.agents_on_turn();
                }
            }
            KeyCode::Left => {
                let _ = app.handle_input(InputAction::SelectPrev);
            }
            KeyCode::Right => {
                let _ = app.handle_input(InputAction::SelectNext);
            }
            KeyCode::Enter => {
                if app.handle_input(InputAction::PlaySelected) {
                    app.agents_on_turn();
                }
            }
            _ => {}
        },
    }
    false
}

fn handle_bid_entry_key<T: Transport>(app: &mut AppState<T>, code: KeyCode) {
    match code {
        KeyCode::Esc => {
            let _ = app.handle_input(InputAction::BidCancel);
        }
        KeyCode::Enter => {
            if app.handle_input(InputAction::BidSubmit) {
                app.agents_on_turn();
            }
        }
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let _ = app.handle_input(InputAction::BidDigit(c as u8 - b'0'));
        }
        KeyCode::Char(c) => {
            if let Some(trump) = trump_key(c) {
                let _ = app.handle_input(InputAction::BidTrump(trump));
            }
        }
        _ => {}
    }
}

fn trump_key(c: char) -> Option<Trump> {
    match c.to_ascii_lowercase() {
        's' => Some(Trump::Spades),
        'c' => Some(Trump::Clubs),
        'd' => Some(Trump::Diamonds),
        'h' => Some(Trump::Hearts),
        'n' => Some(Trump::NoTrumps),
        _ => None,
    }
}
