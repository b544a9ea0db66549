use crate::db::QueryResult;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabMode {
    Data,
    Columns,
}

/// Grid for the current result plus the column list of the previewed table.
#[derive(Debug)]
pub struct ResultsViewer {
    pub result: Option<QueryResult>,
    pub table_state: TableState,
    pub horizontal_scroll: usize,
    pub visible_columns: usize,
    pub focused: bool,
    pub active_tab: TabMode,
    pub table_name: Option<String>,
    pub table_columns: Vec<String>,
}

impl ResultsViewer {
    pub fn new() -> Self {
        let mut state = TableState::default();
        state.select(Some(0));

        Self {
            result: None,
            table_state: state,
            horizontal_scroll: 0,
            visible_columns: 10,
            focused: false,
            active_tab: TabMode::Data,
            table_name: None,
            table_columns: Vec::new(),
        }
    }

    pub fn set_result(&mut self, result: QueryResult) {
        self.result = Some(result);
        self.horizontal_scroll = 0;
        self.table_state.select(Some(0));
        self.active_tab = TabMode::Data;
    }

    pub fn set_table(&mut self, name: String, columns: Vec<String>) {
        self.table_name = Some(name);
        self.table_columns = columns;
    }

    pub fn clear(&mut self) {
        self.result = None;
        self.table_name = None;
        self.table_columns.clear();
        self.horizontal_scroll = 0;
        self.table_state.select(Some(0));
    }

    fn row_count(&self) -> usize {
        self.result.as_ref().map(QueryResult::row_count).unwrap_or(0)
    }

    pub fn move_up(&mut self, count: usize) {
        if self.row_count() == 0 {
            return;
        }
        let selected = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(selected.saturating_sub(count)));
    }

    pub fn move_down(&mut self, count: usize) {
        let rows = self.row_count();
        if rows == 0 {
            return;
        }
        let selected = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some((selected + count).min(rows - 1)));
    }

    pub fn goto_top(&mut self) {
        self.table_state.select(Some(0));
    }

    pub fn goto_bottom(&mut self) {
        let rows = self.row_count();
        if rows > 0 {
            self.table_state.select(Some(rows - 1));
        }
    }

    pub fn scroll_left(&mut self, count: usize) {
        self.horizontal_scroll = self.horizontal_scroll.saturating_sub(count);
    }

    pub fn scroll_right(&mut self, count: usize) {
        if let Some(ref result) = self.result {
            let max_scroll = result.column_count().saturating_sub(self.visible_columns);
            self.horizontal_scroll = self.horizontal_scroll.saturating_add(count).min(max_scroll);
        }
    }

    /// Selected row as tab-separated display text.
    pub fn selected_row_text(&self) -> Option<String> {
        let result = self.result.as_ref()?;
        let index = self.table_state.selected()?;
        result.display_row(index).map(|cells| cells.join("\t"))
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);

        let tabs = Tabs::new(vec!["1. Data", "2. Columns"])
            .block(Block::default().borders(Borders::ALL).border_style(border_style))
            .select(match self.active_tab {
                TabMode::Data => 0,
                TabMode::Columns => 1,
            })
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, chunks[0]);

        match self.active_tab {
            TabMode::Data => self.render_data_tab(frame, chunks[1], border_style),
            TabMode::Columns => self.render_columns_tab(frame, chunks[1], border_style),
        }
    }

    fn render_data_tab(&mut self, frame: &mut Frame, area: Rect, border_style: Style) {
        let Some(ref result) = self.result else {
            let paragraph = Paragraph::new("No results. Run a query or press Enter on a table.")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title(" Results ").border_style(border_style));
            frame.render_widget(paragraph, area);
            return;
        };

        if result.columns.is_empty() {
            let text = match result.rows_affected {
                Some(affected) => format!("Statement executed, {} rows affected", affected),
                None => "Statement executed".to_string(),
            };
            let paragraph = Paragraph::new(text)
                .block(Block::default().borders(Borders::ALL).title(" Results ").border_style(border_style));
            frame.render_widget(paragraph, area);
            return;
        }

        // Assume each column needs at least 15 characters
        let available_width = area.width.saturating_sub(4);
        self.visible_columns = ((available_width / 15).max(1) as usize).min(result.column_count());

        let start_col = self.horizontal_scroll.min(result.column_count().saturating_sub(1));
        let end_col = (start_col + self.visible_columns).min(result.column_count());

        let header_cells = result.columns[start_col..end_col].iter().map(|h| {
            Cell::from(format!(" {} ", h)).style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        });
        let header = Row::new(header_cells).height(1);

        let rows = result.rows().map(|row| {
            let cells = row[start_col..end_col].iter().map(|value| {
                let style = if value.is_null() {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default()
                };
                Cell::from(format!(" {} ", value)).style(style)
            });
            Row::new(cells).height(1)
        });

        let widths = (start_col..end_col)
            .map(|col_idx| {
                let header_width = result.columns[col_idx].chars().count();
                let max_content_width = result
                    .rows()
                    .filter_map(|row| row.get(col_idx))
                    .map(|cell| cell.to_string().chars().count())
                    .max()
                    .unwrap_or(0);
                let width = header_width.max(max_content_width).clamp(10, 60);
                Constraint::Min(width as u16 + 2)
            })
            .collect::<Vec<_>>();

        let mut title = format!(" Results ({} rows) ", result.row_count());
        if result.execution_time_ms > 0 {
            title.push_str(&format!("- {}ms ", result.execution_time_ms));
        }
        if result.column_count() > self.visible_columns {
            title.push_str(&format!(
                "- Cols {}-{}/{} ",
                start_col + 1,
                end_col,
                result.column_count()
            ));
        }

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title).border_style(border_style))
            .highlight_style(
                Style::default()
                    .bg(Color::Rgb(70, 70, 90))
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .column_spacing(1);

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_columns_tab(&self, frame: &mut Frame, area: Rect, border_style: Style) {
        let title = match self.table_name {
            Some(ref name) => format!(" Columns of {} ", name),
            None => " Columns ".to_string(),
        };
        let block = Block::default().borders(Borders::ALL).title(title).border_style(border_style);

        if self.table_columns.is_empty() {
            let paragraph = Paragraph::new("No column information. Press Enter on a table to load it.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = self
            .table_columns
            .iter()
            .enumerate()
            .map(|(i, name)| ListItem::new(format!("{:3}  {}", i + 1, name)))
            .collect();
        frame.render_widget(List::new(items).block(block), area);
    }
}

impl Default for ResultsViewer {
    fn default() -> Self {
        Self::new()
    }
}
