use crate::transport::Transport;
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner};

pub(super) fn draw_lobby<T: Transport>(f: &mut Frame, app: &AppState<T>) {
    let area = centered_rect(70, 70, f.area());
    let block = Block::default().title("five-hundred").borders(Borders::ALL);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let logo = r#"
 ███████  ██████   ██████
 ██      ██  ████ ██  ████
 ███████ ██ ██ ██ ██ ██ ██
      ██ ████  ██ ████  ██
 ███████  ██████   ██████
"#;
    let mut lines: Vec<Line> = logo
        .lines()
        .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(Color::Red))))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(format!("Server: {}", app.server_label)));
    lines.push(Line::from("You sit at seat 1 with a bot partner across; two bots oppose."));
    lines.push(Line::from(""));
    if let Some(err) = app.session.last_error() {
        lines.push(Line::from(Span::styled(
            format!("Error: {err}"),
            Style::default().fg(Color::Red),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "[Space] Deal  [Q] Quit",
        Style::default().add_modifier(Modifier::DIM),
    )));
    let para = Paragraph::new(lines).wrap(Wrap { trim: false }).alignment(Alignment::Center);
    f.render_widget(para, inner(area));
}
