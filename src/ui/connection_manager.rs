use crate::db::{ConnectionTarget, DatabaseKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Type,
    Path, // SQLite file
    Host,
    Port,
    Database,
    Username,
    Password,
}

const SQLITE_FIELDS: &[FormField] = &[FormField::Name, FormField::Type, FormField::Path];
const POSTGRES_FIELDS: &[FormField] = &[
    FormField::Name,
    FormField::Type,
    FormField::Host,
    FormField::Port,
    FormField::Database,
    FormField::Username,
    FormField::Password,
];

#[derive(Debug, Clone)]
pub struct ConnectionForm {
    pub name: String,
    pub kind: DatabaseKind,
    pub path: String,
    pub host: String,
    pub port: String,
    pub database: String,
    pub username: String,
    pub password: String,
    pub active_field: FormField,
}

impl ConnectionForm {
    pub fn new(default_host: &str, default_port: u16) -> Self {
        Self {
            name: String::new(),
            kind: DatabaseKind::Sqlite,
            path: String::new(),
            host: default_host.to_string(),
            port: default_port.to_string(),
            database: String::new(),
            username: String::new(),
            password: String::new(),
            active_field: FormField::Name,
        }
    }

    fn fields(&self) -> &'static [FormField] {
        match self.kind {
            DatabaseKind::Sqlite => SQLITE_FIELDS,
            DatabaseKind::Postgres => POSTGRES_FIELDS,
        }
    }

    fn field_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Path => Some(&mut self.path),
            FormField::Host => Some(&mut self.host),
            FormField::Port => Some(&mut self.port),
            FormField::Database => Some(&mut self.database),
            FormField::Username => Some(&mut self.username),
            FormField::Password => Some(&mut self.password),
            FormField::Type => None,
        }
    }

    /// Connection target described by the form. An empty port means the
    /// driver default.
    pub fn target(&self) -> Result<ConnectionTarget, String> {
        match self.kind {
            DatabaseKind::Sqlite => Ok(ConnectionTarget::sqlite(self.path.trim())),
            DatabaseKind::Postgres => {
                let port = if self.port.is_empty() {
                    0
                } else {
                    self.port
                        .parse::<u16>()
                        .map_err(|_| format!("Invalid port: {}", self.port))?
                };
                Ok(ConnectionTarget::postgres(
                    self.host.trim(),
                    port,
                    self.database.trim(),
                    self.username.trim(),
                    self.password.clone(),
                ))
            }
        }
    }
}

#[derive(Debug)]
pub struct ConnectionManager {
    pub visible: bool,
    pub form: ConnectionForm,
    default_host: String,
    default_port: u16,
}

impl ConnectionManager {
    pub fn new(default_host: &str, default_port: u16) -> Self {
        Self {
            visible: false,
            form: ConnectionForm::new(default_host, default_port),
            default_host: default_host.to_string(),
            default_port,
        }
    }

    pub fn show(&mut self) {
        self.form = ConnectionForm::new(&self.default_host, self.default_port);
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn next_field(&mut self) {
        let fields = self.form.fields();
        let pos = fields.iter().position(|f| *f == self.form.active_field).unwrap_or(0);
        self.form.active_field = fields[(pos + 1) % fields.len()];
    }

    pub fn prev_field(&mut self) {
        let fields = self.form.fields();
        let pos = fields.iter().position(|f| *f == self.form.active_field).unwrap_or(0);
        self.form.active_field = fields[(pos + fields.len() - 1) % fields.len()];
    }

    pub fn cycle_kind(&mut self) {
        self.form.kind = match self.form.kind {
            DatabaseKind::Sqlite => DatabaseKind::Postgres,
            DatabaseKind::Postgres => DatabaseKind::Sqlite,
        };
    }

    pub fn insert_char(&mut self, c: char) {
        let field = self.form.active_field;
        if field == FormField::Type {
            if c == ' ' {
                self.cycle_kind();
            }
            return;
        }
        if field == FormField::Port && !c.is_ascii_digit() {
            return;
        }
        if let Some(value) = self.form.field_mut(field) {
            value.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        let field = self.form.active_field;
        if let Some(value) = self.form.field_mut(field) {
            value.pop();
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let popup_area = centered_rect(70, 80, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" New Connection ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        let fields = self.form.fields();
        let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
        constraints.push(Constraint::Min(0));
        constraints.push(Constraint::Length(2));

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .margin(1)
            .split(inner);

        for (i, field) in fields.iter().enumerate() {
            self.render_field(frame, chunks[i], *field);
        }

        let help = Paragraph::new(vec![
            Line::from("Tab/Shift+Tab: Move  Space: Cycle type"),
            Line::from("Enter/Ctrl+S: Connect  Esc: Cancel"),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[fields.len() + 1]);
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, field: FormField) {
        let style = if self.form.active_field == field {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let (title, value) = match field {
            FormField::Name => ("Connection Name", self.form.name.clone()),
            FormField::Type => ("Database Type (Space to cycle)", self.form.kind.to_string()),
            FormField::Path => ("Database File Path", self.form.path.clone()),
            FormField::Host => ("Host", self.form.host.clone()),
            FormField::Port => ("Port", self.form.port.clone()),
            FormField::Database => ("Database", self.form.database.clone()),
            FormField::Username => ("Username", self.form.username.clone()),
            // Mask password with asterisks
            FormField::Password => ("Password", "*".repeat(self.form.password.chars().count())),
        };

        let paragraph = Paragraph::new(value)
            .block(Block::default().title(title).borders(Borders::ALL).border_style(style))
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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
