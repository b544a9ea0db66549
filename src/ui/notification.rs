use super::connection_manager::centered_rect;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Warning,
    Error,
}

impl NotificationKind {
    fn color(&self) -> Color {
        match self {
            NotificationKind::Info => Color::Green,
            NotificationKind::Warning => Color::Yellow,
            NotificationKind::Error => Color::Red,
        }
    }
}

/// Modal message box. While one is shown every key except Enter and Esc is
/// ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationKind::Info)
    }

    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationKind::Warning)
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(title, message, NotificationKind::Error)
    }

    fn new(title: impl Into<String>, message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(50, 30, area);
        frame.render_widget(Clear, popup_area);

        let color = self.kind.color();
        let mut lines: Vec<Line> = self.message.lines().map(Line::from).collect();
        lines.push(Line::from(""));
        lines.push(Line::styled("Enter/Esc: Close", Style::default().fg(Color::DarkGray)));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" {} ", self.title))
                    .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
                    .border_style(Style::default().fg(color)),
            );
        frame.render_widget(paragraph, popup_area);
    }
}
