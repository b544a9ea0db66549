use crate::app::{App, Pane};
use crate::vim::VimMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Top bar
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_top_bar(frame, chunks[0], app);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(chunks[1]);

    app.database_browser.render(frame, content_chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(content_chunks[1]);

    app.query_editor.render(frame, main_chunks[0]);
    app.results_viewer.render(frame, main_chunks[1]);

    render_status_bar(frame, chunks[2], app);

    // Popups last so they draw over the panes
    app.connection_manager.render(frame, size);
    if let Some(ref notification) = app.notification {
        notification.render(frame, size);
    }
}

fn render_top_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut title = vec![
        Span::styled("DBDESK", Style::default().fg(Color::Cyan)),
        Span::raw(" - Terminal Database Client"),
    ];

    if let Some(info) = app
        .database_browser
        .selected_connection_name()
        .and_then(|name| app.registry.describe(name))
    {
        title.push(Span::raw("  "));
        title.push(Span::styled(
            format!("{} ({}: {})", info.name, info.kind, info.target),
            Style::default().fg(Color::Green),
        ));
    }

    let paragraph = Paragraph::new(Line::from(title)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode_color = match app.vim_state.mode {
        VimMode::Normal => Color::Blue,
        VimMode::Insert => Color::Green,
        VimMode::Command => Color::Yellow,
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", app.vim_state.mode.as_str()),
            Style::default().fg(Color::Black).bg(mode_color),
        ),
        Span::raw("  "),
    ];

    let active_pane = match app.active_pane {
        Pane::DatabaseBrowser => "Connections",
        Pane::QueryEditor => "Query Editor",
        Pane::Results => "Results",
    };
    spans.push(Span::styled(format!("[{}]", active_pane), Style::default().fg(Color::Cyan)));

    if app.vim_state.mode == VimMode::Command {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(":{}", app.vim_state.get_command()),
            Style::default().fg(Color::Yellow),
        ));
    } else if let Some(ref status) = app.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(status.as_str(), Style::default().fg(Color::White)));
    } else {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            "C: connect  Enter: open  ':' commands  q: quit",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}
