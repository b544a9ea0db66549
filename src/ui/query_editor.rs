use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Multi-line SQL buffer. The cursor column counts characters, not bytes.
#[derive(Debug)]
pub struct QueryEditor {
    pub content: Vec<String>,
    pub cursor_line: usize,
    pub cursor_col: usize,
    pub focused: bool,
    pub scroll_offset: usize,
}

fn byte_index(line: &str, col: usize) -> usize {
    line.char_indices().nth(col).map(|(i, _)| i).unwrap_or(line.len())
}

fn char_len(line: &str) -> usize {
    line.chars().count()
}

impl QueryEditor {
    pub fn new() -> Self {
        Self {
            content: vec![String::new()],
            cursor_line: 0,
            cursor_col: 0,
            focused: false,
            scroll_offset: 0,
        }
    }

    pub fn get_query(&self) -> String {
        self.content.join("\n")
    }

    /// Replaces the buffer and puts the cursor at the end.
    pub fn set_query(&mut self, text: &str) {
        self.content = text.split('\n').map(str::to_string).collect();
        self.goto_bottom();
    }

    /// The `;`-delimited statement surrounding the cursor.
    pub fn get_query_at_cursor(&self) -> String {
        let full_text = self.get_query();

        let mut cursor_pos = 0;
        for line in &self.content[..self.cursor_line] {
            cursor_pos += line.len() + 1;
        }
        cursor_pos += byte_index(&self.content[self.cursor_line], self.cursor_col);

        let start = full_text[..cursor_pos].rfind(';').map(|pos| pos + 1).unwrap_or(0);
        let end = full_text[cursor_pos..]
            .find(';')
            .map(|pos| cursor_pos + pos + 1)
            .unwrap_or(full_text.len());

        let statement = full_text[start..end].trim();
        // Cursor sat right after a `;`: take the statement it terminates.
        if statement.is_empty() {
            let before = &full_text[..start.saturating_sub(1)];
            let prev_start = before.rfind(';').map(|pos| pos + 1).unwrap_or(0);
            return full_text[prev_start..start].trim().to_string();
        }
        statement.to_string()
    }

    pub fn clear(&mut self) {
        self.content = vec![String::new()];
        self.cursor_line = 0;
        self.cursor_col = 0;
        self.scroll_offset = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        let line = &mut self.content[self.cursor_line];
        let at = byte_index(line, self.cursor_col);
        line.insert(at, c);
        self.cursor_col += 1;
    }

    pub fn insert_newline(&mut self) {
        let line = &mut self.content[self.cursor_line];
        let at = byte_index(line, self.cursor_col);
        let after = line.split_off(at);
        self.content.insert(self.cursor_line + 1, after);
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    pub fn open_line_below(&mut self) {
        self.content.insert(self.cursor_line + 1, String::new());
        self.cursor_line += 1;
        self.cursor_col = 0;
    }

    pub fn backspace(&mut self) {
        if self.cursor_col > 0 {
            let line = &mut self.content[self.cursor_line];
            let at = byte_index(line, self.cursor_col - 1);
            line.remove(at);
            self.cursor_col -= 1;
        } else if self.cursor_line > 0 {
            let current_line = self.content.remove(self.cursor_line);
            self.cursor_line -= 1;
            self.cursor_col = char_len(&self.content[self.cursor_line]);
            self.content[self.cursor_line].push_str(&current_line);
        }
    }

    pub fn delete_char(&mut self) {
        let len = char_len(&self.content[self.cursor_line]);
        if self.cursor_col < len {
            let line = &mut self.content[self.cursor_line];
            let at = byte_index(line, self.cursor_col);
            line.remove(at);
        } else if self.cursor_line + 1 < self.content.len() {
            let next_line = self.content.remove(self.cursor_line + 1);
            self.content[self.cursor_line].push_str(&next_line);
        }
    }

    pub fn move_left(&mut self, count: usize) {
        self.cursor_col = self.cursor_col.saturating_sub(count);
    }

    pub fn move_right(&mut self, count: usize) {
        let len = char_len(&self.content[self.cursor_line]);
        self.cursor_col = (self.cursor_col + count).min(len);
    }

    pub fn move_up(&mut self, count: usize) {
        self.cursor_line = self.cursor_line.saturating_sub(count);
        self.cursor_col = self.cursor_col.min(char_len(&self.content[self.cursor_line]));
    }

    pub fn move_down(&mut self, count: usize) {
        self.cursor_line = (self.cursor_line + count).min(self.content.len() - 1);
        self.cursor_col = self.cursor_col.min(char_len(&self.content[self.cursor_line]));
    }

    pub fn goto_line_start(&mut self) {
        self.cursor_col = 0;
    }

    pub fn goto_line_end(&mut self) {
        self.cursor_col = char_len(&self.content[self.cursor_line]);
    }

    pub fn goto_top(&mut self) {
        self.cursor_line = 0;
        self.cursor_col = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.cursor_line = self.content.len() - 1;
        self.cursor_col = char_len(&self.content[self.cursor_line]);
    }

    fn adjust_scroll(&mut self, visible_lines: usize) {
        if visible_lines == 0 {
            return;
        }
        if self.cursor_line < self.scroll_offset {
            self.scroll_offset = self.cursor_line;
        } else if self.cursor_line >= self.scroll_offset + visible_lines {
            self.scroll_offset = self.cursor_line + 1 - visible_lines;
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let visible_lines = area.height.saturating_sub(2) as usize;
        self.adjust_scroll(visible_lines);

        let text: Vec<Line> = self
            .content
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(visible_lines)
            .map(|(i, line)| {
                Line::from(vec![
                    Span::styled(format!("{:3} ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::raw(line.as_str()),
                ])
            })
            .collect();

        let paragraph = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Query (Ctrl+R: run all, Ctrl+E: run statement) ")
                .border_style(border_style),
        );

        frame.render_widget(paragraph, area);

        if self.focused {
            let cursor_x = area.x + 5 + self.cursor_col as u16;
            let cursor_y = area.y + 1 + (self.cursor_line - self.scroll_offset) as u16;
            if cursor_y < area.y + area.height.saturating_sub(1) {
                frame.set_cursor_position((cursor_x, cursor_y));
            }
        }
    }
}

impl Default for QueryEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(text: &str) -> QueryEditor {
        let mut editor = QueryEditor::new();
        editor.set_query(text);
        editor
    }

    #[test]
    fn test_typing_multibyte() {
        let mut editor = QueryEditor::new();
        for c in "SELECT 'é'".chars() {
            editor.insert_char(c);
        }
        editor.backspace();
        editor.insert_char('ü');
        assert_eq!(editor.get_query(), "SELECT 'éü");
        assert_eq!(editor.cursor_col, 10);
    }

    #[test]
    fn test_newline_and_backspace_join() {
        let mut editor = editor_with("SELECT 1");
        editor.goto_line_start();
        editor.move_right(6);
        editor.insert_newline();
        assert_eq!(editor.content, vec!["SELECT", " 1"]);
        editor.backspace();
        assert_eq!(editor.get_query(), "SELECT 1");
    }

    #[test]
    fn test_statement_under_cursor() {
        let mut editor = editor_with("SELECT 1;\nSELECT 2;\nSELECT 3");
        editor.goto_top();
        editor.move_down(1);
        assert_eq!(editor.get_query_at_cursor(), "SELECT 2;");

        editor.goto_bottom();
        assert_eq!(editor.get_query_at_cursor(), "SELECT 3");
    }

    #[test]
    fn test_statement_right_after_semicolon() {
        let editor = editor_with("SELECT 1;");
        assert_eq!(editor.get_query_at_cursor(), "SELECT 1;");
    }

    #[test]
    fn test_set_query_moves_cursor_to_end() {
        let editor = editor_with("SELECT *\nFROM t");
        assert_eq!(editor.cursor_line, 1);
        assert_eq!(editor.cursor_col, 6);
    }
}
