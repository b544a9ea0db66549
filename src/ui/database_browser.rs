use crate::db::ConnectionInfo;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// What the cursor in the browser currently points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserItem {
    Connection(String),
    Table(String),
}

/// Sidebar listing open connections and the tables of the selected one.
#[derive(Debug)]
pub struct DatabaseBrowser {
    pub connections: Vec<ConnectionInfo>,
    pub tables: Vec<String>,
    pub selected_connection: Option<usize>,
    pub list_state: ListState,
    pub focused: bool,
}

impl DatabaseBrowser {
    pub fn new() -> Self {
        let mut state = ListState::default();
        state.select(Some(0));

        Self {
            connections: Vec::new(),
            tables: Vec::new(),
            selected_connection: None,
            list_state: state,
            focused: true,
        }
    }

    fn total_items(&self) -> usize {
        self.connections.len() + self.tables.len()
    }

    /// Replaces the connection list, keeping the selection on the same name
    /// when it is still open.
    pub fn set_connections(&mut self, connections: Vec<ConnectionInfo>) {
        let previous = self.selected_connection_name().map(str::to_string);
        self.connections = connections;
        self.selected_connection = previous
            .and_then(|name| self.connections.iter().position(|c| c.name == name));
        if self.selected_connection.is_none() {
            self.tables.clear();
        }
        self.clamp_cursor();
    }

    pub fn select_connection(&mut self, name: &str) {
        if let Some(idx) = self.connections.iter().position(|c| c.name == name) {
            self.selected_connection = Some(idx);
            self.list_state.select(Some(idx));
        }
    }

    pub fn set_tables(&mut self, tables: Vec<String>) {
        self.tables = tables;
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let total = self.total_items();
        let current = self.list_state.selected().unwrap_or(0);
        let next = if total == 0 { 0 } else { current.min(total - 1) };
        self.list_state.select(Some(next));
    }

    pub fn move_up(&mut self) {
        let total_items = self.total_items();
        if total_items == 0 {
            return;
        }

        let current = self.list_state.selected().unwrap_or(0);
        let next = if current == 0 { total_items - 1 } else { current - 1 };
        self.list_state.select(Some(next));
    }

    pub fn move_down(&mut self) {
        let total_items = self.total_items();
        if total_items == 0 {
            return;
        }

        let current = self.list_state.selected().unwrap_or(0);
        let next = if current >= total_items - 1 { 0 } else { current + 1 };
        self.list_state.select(Some(next));
    }

    pub fn goto_top(&mut self) {
        self.list_state.select(Some(0));
    }

    pub fn goto_bottom(&mut self) {
        self.list_state.select(Some(self.total_items().saturating_sub(1)));
    }

    pub fn current_item(&self) -> Option<BrowserItem> {
        let index = self.list_state.selected()?;
        if let Some(conn) = self.connections.get(index) {
            return Some(BrowserItem::Connection(conn.name.clone()));
        }
        self.tables
            .get(index - self.connections.len())
            .map(|t| BrowserItem::Table(t.clone()))
    }

    pub fn selected_connection_name(&self) -> Option<&str> {
        self.selected_connection
            .and_then(|idx| self.connections.get(idx))
            .map(|c| c.name.as_str())
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut items = Vec::new();

        for (idx, conn) in self.connections.iter().enumerate() {
            let icon = if Some(idx) == self.selected_connection { "▼ " } else { "▶ " };
            items.push(ListItem::new(Line::from(vec![
                Span::styled(icon, Style::default().fg(Color::Cyan)),
                Span::styled(conn.name.as_str(), Style::default().fg(Color::Green)),
                Span::styled(format!(" [{}]", conn.kind), Style::default().fg(Color::DarkGray)),
            ])));
        }

        for table in &self.tables {
            items.push(ListItem::new(Line::from(vec![
                Span::raw("  ├─ "),
                Span::styled(table.as_str(), Style::default().fg(Color::Yellow)),
            ])));
        }

        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Connections ")
                    .border_style(border_style),
            )
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

        frame.render_stateful_widget(list, area, &mut self.list_state);
    }
}

impl Default for DatabaseBrowser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DatabaseKind;

    fn info(name: &str) -> ConnectionInfo {
        ConnectionInfo {
            name: name.into(),
            kind: DatabaseKind::Sqlite,
            target: format!("{}.db", name),
        }
    }

    #[test]
    fn test_items_are_connections_then_tables() {
        let mut browser = DatabaseBrowser::new();
        browser.set_connections(vec![info("a"), info("b")]);
        browser.select_connection("b");
        browser.set_tables(vec!["users".into()]);

        assert_eq!(browser.current_item(), Some(BrowserItem::Connection("b".into())));
        browser.move_down();
        assert_eq!(browser.current_item(), Some(BrowserItem::Table("users".into())));
        browser.move_down();
        assert_eq!(browser.current_item(), Some(BrowserItem::Connection("a".into())));
    }

    #[test]
    fn test_refresh_drops_closed_selection() {
        let mut browser = DatabaseBrowser::new();
        browser.set_connections(vec![info("a"), info("b")]);
        browser.select_connection("b");
        browser.set_tables(vec!["t1".into(), "t2".into()]);
        browser.goto_bottom();

        browser.set_connections(vec![info("a")]);
        assert_eq!(browser.selected_connection_name(), None);
        assert!(browser.tables.is_empty());
        assert_eq!(browser.current_item(), Some(BrowserItem::Connection("a".into())));
    }

    #[test]
    fn test_refresh_keeps_selection_by_name() {
        let mut browser = DatabaseBrowser::new();
        browser.set_connections(vec![info("b")]);
        browser.select_connection("b");
        browser.set_connections(vec![info("a"), info("b")]);
        assert_eq!(browser.selected_connection_name(), Some("b"));
    }
}
