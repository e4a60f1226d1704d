use crate::api::{team_of, Phase, SessionSnapshot, HUMAN_SEAT, SEATS};
use crate::bidding::Seat;
use crate::cards::{Card, Suit, SuitColor};
use crate::engine::TableEngine;
use crate::transport::Transport;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, columns, inner};

pub(super) fn draw_table<T: Transport>(f: &mut Frame, app: &AppState<T>) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(6), // opponents and partner
            Constraint::Min(5),    // trick
            Constraint::Length(5), // hand
            Constraint::Length(4), // status
        ])
        .split(size);

    draw_header(f, chunks[0], app);
    draw_seats(f, chunks[1], app);
    draw_trick(f, chunks[2], app);
    draw_hand(f, chunks[3], app);
    draw_status(f, chunks[4], app);

    if app.help_open() {
        draw_help(f);
    } else if app.history_open() {
        draw_history(f, app);
    } else if app.bid_entry_active() {
        draw_bid_entry(f, app);
    }
}

fn seat_label(seat: Seat) -> String {
    if seat == HUMAN_SEAT {
        "You".to_string()
    } else {
        format!("P{}", seat + 1)
    }
}

fn draw_header<T: Transport>(f: &mut Frame, area: Rect, app: &AppState<T>) {
    let snap = app.snapshot();
    let phase = snap.map(|s| s.phase.label()).unwrap_or("-");
    let contract = snap
        .and_then(|s| s.contract())
        .map(|c| format!("{c} by {}", seat_label(c.seat)))
        .unwrap_or_else(|| "none".to_string());
    let (tricks, scores) = match snap.and_then(|s| s.play.as_ref()) {
        Some(p) => (p.tricks_won, p.scores),
        None => ([0, 0], [0, 0]),
    };
    let lines = vec![
        Line::from(format!("Phase: {phase}   Contract: {contract}")),
        Line::from(format!(
            "Us: {} tricks, {} pts   Them: {} tricks, {} pts",
            tricks[0], scores[0], tricks[1], scores[1]
        )),
    ];
    let title = match app.session.session_id() {
        Some(id) => format!("five-hundred [{id}]"),
        None => "five-hundred".to_string(),
    };
    let header = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_seats<T: Transport>(f: &mut Frame, area: Rect, app: &AppState<T>) {
    let others: Vec<Seat> = (0..SEATS).filter(|s| *s != HUMAN_SEAT).collect();
    let cols = columns(area, others.len());
    let snap = app.snapshot();
    let current = app.session.current_seat();
    for (seat, col) in others.into_iter().zip(cols) {
        let mut title = seat_label(seat);
        title.push_str(if team_of(seat) == team_of(HUMAN_SEAT) { " [Partner]" } else { " [Opp]" });
        if app.is_bot(seat) {
            title.push_str(" [BOT]");
        }
        let mut block = Block::default().title(title).borders(Borders::ALL);
        if current == Some(seat) {
            block = block.border_style(Style::default().fg(Color::Yellow));
        }
        let cards = snap.and_then(|s| s.hand(seat)).map(|h| h.len()).unwrap_or(0);
        let last_bid = snap.and_then(|s| last_bid_of(s, seat)).unwrap_or_else(|| "--".to_string());
        let lines = vec![
            Line::from(format!("Cards: {cards}")),
            Line::from(format!("Bid: {last_bid}")),
            Line::from(if current == Some(seat) { "To act" } else { "" }),
        ];
        f.render_widget(Paragraph::new(lines).block(block), col);
    }
}

fn last_bid_of(snap: &SessionSnapshot, seat: Seat) -> Option<String> {
    let bidding = snap.bidding.as_ref()?;
    bidding.history.iter().rev().find(|a| a.seat() == seat).map(|a| a.label())
}

fn draw_trick<T: Transport>(f: &mut Frame, area: Rect, app: &AppState<T>) {
    let snap = app.snapshot();
    let title = match snap.map(|s| s.phase) {
        Some(Phase::Kitty) => "Kitty".to_string(),
        Some(Phase::Playing) | Some(Phase::Completed) => {
            let done = snap.and_then(|s| s.play.as_ref()).map(|p| p.completed_tricks.len());
            format!("Trick {}", done.unwrap_or(0) + 1)
        }
        _ => "Table".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);
    f.render_widget(block, area);
    let body = inner(area);

    let Some(snap) = snap else {
        return;
    };
    let slots: Vec<(String, Option<Card>)> = match snap.phase {
        Phase::Kitty => snap.kitty.iter().map(|c| ("Kitty".to_string(), Some(*c))).collect(),
        _ => {
            let trick = snap.play.as_ref().map(|p| p.current_trick.as_slice()).unwrap_or(&[]);
            (0..SEATS)
                .map(|seat| {
                    let card = trick.iter().find(|p| p.seat == seat).map(|p| p.card);
                    (seat_label(seat), card)
                })
                .collect()
        }
    };
    let cols = columns(body, slots.len());
    for ((label, card), col) in slots.into_iter().zip(cols) {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(3)])
            .split(col);
        f.render_widget(Paragraph::new(label).alignment(Alignment::Center), split[0]);
        render_card_widget(f, split[1], card, None);
    }
}

fn draw_hand<T: Transport>(f: &mut Frame, area: Rect, app: &AppState<T>) {
    let hand = app.human_hand();
    let block = Block::default().title(format!("Your hand ({})", hand.len())).borders(Borders::ALL);
    f.render_widget(block, area);
    let cols = columns(inner(area), hand.len());
    let playing = app.snapshot().is_some_and(|s| s.phase == Phase::Playing);
    for (i, (card, col)) in hand.iter().zip(cols).enumerate() {
        let border = (playing && i == app.selected).then_some(Color::Cyan);
        render_card_widget(f, col, Some(*card), border);
    }
}

fn draw_status<T: Transport>(f: &mut Frame, area: Rect, app: &AppState<T>) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(inner(area));

    let mut left = vec![Line::from(app.session.status().to_string())];
    if let Some(err) = app.session.last_error() {
        left.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
    } else if let Some(notice) = app.notice() {
        left.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Yellow),
        )));
    }
    let right = vec![
        Line::from("B bid • P pass • K kitty"),
        Line::from("←/→ Enter play • ? help • H history"),
    ];
    f.render_widget(Paragraph::new(left).wrap(Wrap { trim: true }), cols[0]);
    f.render_widget(
        Paragraph::new(right).wrap(Wrap { trim: true }).alignment(Alignment::Right),
        cols[1],
    );
}

fn draw_history<T: Transport>(f: &mut Frame, app: &AppState<T>) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("History").borders(Borders::ALL);
    let mut lines: Vec<Line> = Vec::new();
    let entries =
        app.session.events_recent_offset(AppState::<T>::HISTORY_PAGE_SIZE, app.history_offset());
    if entries.is_empty() {
        lines.push(Line::from("No history yet."));
    } else {
        for entry in entries {
            let line = match entry.seat {
                Some(seat) => format!("{}: {}", seat_label(seat), entry.text),
                None => entry.text,
            };
            lines.push(Line::from(line));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Up/Down scroll • Close: H or Esc",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(70, 80, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Table:", bold)),
        Line::from("- Space: deal a new hand"),
        Line::from("- B: open bid entry"),
        Line::from("- P: pass"),
        Line::from("- K: take the kitty (contract winner)"),
        Line::from("- Left / Right: select a card"),
        Line::from("- Enter: play the selected card"),
        Line::from("- H: history"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from(Span::styled("Bid Entry:", bold)),
        Line::from("- 6-9: tricks, 0 for ten"),
        Line::from("- S C D H N: spades, clubs, diamonds, hearts, no trumps"),
        Line::from("- Enter: submit"),
        Line::from("- Esc: cancel"),
        Line::from(""),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn draw_bid_entry<T: Transport>(f: &mut Frame, app: &AppState<T>) {
    let Some(entry) = app.bid_entry() else {
        return;
    };
    let area = centered_rect(50, 30, f.area());
    let to_beat = app
        .snapshot()
        .and_then(|s| s.high_bid())
        .map(|b| format!("{b} ({} points)", b.value()))
        .unwrap_or_else(|| "nothing yet".to_string());
    let lines = vec![
        Line::from(format!("Bid: {}", entry.text())),
        Line::from(format!("To beat: {to_beat}")),
        Line::from("6-9 or 0 for tricks, s/c/d/h/n for trump"),
        Line::from("Enter submit, Esc cancel"),
    ];
    let block = Block::default().title("Bid").borders(Borders::ALL);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner(area));
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);
    let error = entry.error().unwrap_or("");
    let error_line = Line::from(Span::styled(error, Style::default().fg(Color::Red)));
    f.render_widget(Paragraph::new(error_line).alignment(Alignment::Center), chunks[1]);
}

fn suit_glyph_and_style(s: Suit) -> (char, Style) {
    let glyph = match s {
        Suit::Spades => '♠',
        Suit::Clubs => '♣',
        Suit::Diamonds => '♦',
        Suit::Hearts => '♥',
    };
    let color = match s.color() {
        SuitColor::Red => Color::Red,
        SuitColor::Black => Color::White,
    };
    (glyph, Style::default().fg(color))
}

fn card_span(card: Card) -> Span<'static> {
    match card {
        Card::Suited { rank, suit } => {
            let (glyph, style) = suit_glyph_and_style(suit);
            Span::styled(format!("{}{glyph}", rank.label()), style)
        }
        Card::Joker => Span::styled("JKR", Style::default().fg(Color::Magenta)),
    }
}

fn render_card_widget(f: &mut Frame, area: Rect, card: Option<Card>, border: Option<Color>) {
    let mut block = Block::default().borders(Borders::ALL);
    if let Some(color) = border {
        block = block.border_style(Style::default().fg(color));
    }
    let content = match card {
        Some(c) => Line::from(card_span(c)),
        None => Line::from("[  ]"),
    };
    f.render_widget(Paragraph::new(content).alignment(Alignment::Center).block(block), area);
}
