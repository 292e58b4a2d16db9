use crate::app::App;
use crate::config::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, List, ListItem, Paragraph},
    Frame,
};
use termodoro_core::{format_clock, Action, Snapshot};

pub fn draw(f: &mut Frame, app: &App) {
    let snapshot = app.snapshot();
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, chunks[0], &snapshot, &app.theme);
    draw_timer(f, chunks[1], &snapshot, &app.theme);
    draw_rounds(f, chunks[2], &snapshot, &app.theme);
    draw_commands(f, chunks[3], &app.theme);
    draw_status_bar(f, chunks[4], &snapshot, app.pending(), &app.theme);

    if let Some(action) = app.pending() {
        draw_confirm_overlay(f, action, &app.theme);
    }
}

fn draw_header(f: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let text = Line::from(vec![
        Span::raw("⟪ "),
        Span::styled(
            "TERMODORO",
            Style::default()
                .fg(theme.phase_color(snapshot.phase))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ⟫"),
    ]);
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.black)),
        ),
        area,
    );
}

fn draw_timer(f: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let accent = theme.phase_color(snapshot.phase);
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", snapshot.phase.label()),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(accent));
    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)])
        .split(inner_area);

    let time_style = if snapshot.paused {
        Style::default()
            .fg(theme.paused)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    } else {
        Style::default().fg(accent).add_modifier(Modifier::BOLD)
    };
    f.render_widget(
        Paragraph::new(snapshot.time_text.clone())
            .style(time_style)
            .alignment(Alignment::Center),
        v_chunks[0],
    );
    f.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(accent).bg(theme.black))
            .ratio(snapshot.progress.clamp(0.0, 1.0))
            .label(format!(
                "{} / {}",
                snapshot.time_text,
                format_clock(snapshot.target_seconds)
            )),
        v_chunks[2],
    );
}

fn draw_rounds(f: &mut Frame, area: Rect, snapshot: &Snapshot, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("Round ", Style::default().fg(theme.gray)),
        Span::styled(
            format!(
                "{}/{}",
                snapshot.rounds_in_cycle,
                snapshot.rounds_per_cycle.saturating_add(1)
            ),
            Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  Total ", Style::default().fg(theme.gray)),
        Span::styled(
            snapshot.total_rounds.to_string(),
            Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  │  Remaining ", Style::default().fg(theme.gray)),
        Span::styled(
            format_clock(snapshot.remaining_seconds),
            Style::default().fg(theme.foreground),
        ),
    ]);
    f.render_widget(
        Paragraph::new(line).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(theme.black)),
        ),
        area,
    );
}

fn draw_commands(f: &mut Frame, area: Rect, theme: &Theme) {
    let items: Vec<ListItem> = Action::ALL
        .iter()
        .map(|action| {
            ListItem::new(Line::from(vec![
                Span::styled(" • ", Style::default().fg(theme.gray)),
                Span::styled(
                    action.key().to_string(),
                    Style::default().fg(theme.foreground).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" - {}", action.description()),
                    Style::default().fg(theme.gray),
                ),
            ]))
        })
        .collect();
    f.render_widget(
        List::new(items).block(
            Block::default()
                .title(Span::styled(" commands ", Style::default().fg(theme.gray)))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(theme.black)),
        ),
        area,
    );
}

fn draw_status_bar(
    f: &mut Frame,
    area: Rect,
    snapshot: &Snapshot,
    pending: Option<Action>,
    theme: &Theme,
) {
    let (mode_text, mode_color) = match (pending, snapshot.paused) {
        (Some(_), _) => ("CONFIRM", theme.confirm),
        (None, true) => ("PAUSED", theme.paused),
        (None, false) => ("RUNNING", theme.phase_color(snapshot.phase)),
    };
    let help = if pending.is_some() {
        "y/enter:confirm │ n/esc:cancel"
    } else {
        "p:pause │ r:reset │ s:skip │ q:quit"
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", mode_text),
                Style::default()
                    .bg(mode_color)
                    .fg(theme.background)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(help),
        ]))
        .block(Block::default().style(Style::default().bg(theme.black).fg(theme.gray))),
        area,
    );
}

fn draw_confirm_overlay(f: &mut Frame, action: Action, theme: &Theme) {
    let area = centered_rect(50, 30, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(format!(" {} ", action.description()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.confirm))
        .border_type(BorderType::Double)
        .style(Style::default().bg(theme.background));
    let inner_area = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                format!("You pressed {}. Are you sure?", action.key()),
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled("y", Style::default().fg(Color::Green)),
                Span::styled(" yes  ", Style::default().fg(theme.gray)),
                Span::styled("n", Style::default().fg(Color::Red)),
                Span::styled(" no", Style::default().fg(theme.gray)),
            ]),
        ])
        .alignment(Alignment::Center),
        inner_area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
