use anyhow::{Context, Result};
use arboard::Clipboard;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::db::{Connection, NativeDriver, Registry};
use crate::export;
use crate::ui::{
    BrowserItem, ConnectionManager, DatabaseBrowser, Notification, QueryEditor, ResultsViewer,
    TabMode,
};
use crate::vim::{VimCommand, VimMode, VimState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    DatabaseBrowser,
    QueryEditor,
    Results,
}

pub struct App {
    pub should_quit: bool,
    pub vim_state: VimState,
    pub active_pane: Pane,
    pub database_browser: DatabaseBrowser,
    pub query_editor: QueryEditor,
    pub results_viewer: ResultsViewer,
    pub connection_manager: ConnectionManager,
    pub config: Config,
    pub registry: Registry,
    /// Blocking popup; all other input is ignored until it is dismissed.
    pub notification: Option<Notification>,
    pub status: Option<String>,
    clipboard: Option<Clipboard>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let driver = NativeDriver::new().with_default_postgres_port(config.default_postgres_port);
        Self::with_registry(config, Registry::with_driver(driver))
    }

    pub fn with_registry(config: Config, registry: Registry) -> Self {
        let connection_manager =
            ConnectionManager::new(&config.default_postgres_host, config.default_postgres_port);
        let mut app = Self {
            should_quit: false,
            vim_state: VimState::new(),
            active_pane: Pane::DatabaseBrowser,
            database_browser: DatabaseBrowser::new(),
            query_editor: QueryEditor::new(),
            results_viewer: ResultsViewer::new(),
            connection_manager,
            config,
            registry,
            notification: None,
            status: None,
            clipboard: None,
        };
        app.update_focus();
        app.refresh_connections();
        app
    }

    pub fn handle_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key_event(key);
                }
            }
        }
        Ok(())
    }

    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.notification.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.notification = None;
            }
            return;
        }

        if self.connection_manager.visible {
            self.handle_form_key(key);
            return;
        }

        if let Some(vim_command) = self.vim_state.handle_key(key) {
            self.execute_vim_command(vim_command);
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.connection_manager.hide(),
            KeyCode::Enter => self.connect_from_form(),
            KeyCode::Char('s') if ctrl => self.connect_from_form(),
            KeyCode::Tab => self.connection_manager.next_field(),
            KeyCode::BackTab => self.connection_manager.prev_field(),
            KeyCode::Backspace => self.connection_manager.delete_char(),
            KeyCode::Char(c) if !ctrl => self.connection_manager.insert_char(c),
            _ => {}
        }
    }

    fn execute_vim_command(&mut self, command: VimCommand) {
        match command {
            VimCommand::Quit => {
                self.should_quit = true;
            }
            VimCommand::ExecuteCommand(cmd) => {
                self.execute_command(&cmd);
            }
            VimCommand::EnterCommandMode | VimCommand::CancelCommand => {}
            VimCommand::NextPane => self.next_pane(),
            VimCommand::PrevPane => self.prev_pane(),
            VimCommand::Activate => {
                if self.active_pane == Pane::DatabaseBrowser {
                    self.activate_browser_item();
                }
            }
            VimCommand::ExecuteQueryUnderCursor => self.execute_query_at_cursor(),
            VimCommand::ExecuteAll => self.execute_query(),
            VimCommand::EnterInsertMode => {
                self.begin_insert();
            }
            VimCommand::InsertAtLineEnd => {
                if self.begin_insert() {
                    self.query_editor.goto_line_end();
                }
            }
            VimCommand::OpenLineBelow => {
                if self.begin_insert() {
                    self.query_editor.open_line_below();
                }
            }
            VimCommand::ExitInsertMode => {}
            VimCommand::InsertChar(c) => {
                if self.editing() {
                    self.query_editor.insert_char(c);
                }
            }
            VimCommand::InsertNewline => {
                if self.editing() {
                    self.query_editor.insert_newline();
                }
            }
            VimCommand::InsertTab => {
                if self.editing() {
                    for _ in 0..4 {
                        self.query_editor.insert_char(' ');
                    }
                }
            }
            VimCommand::Backspace => {
                if self.editing() {
                    self.query_editor.backspace();
                }
            }
            VimCommand::DeleteChar => {
                if self.active_pane == Pane::QueryEditor {
                    self.query_editor.delete_char();
                }
            }
            VimCommand::MoveUp(n) => match self.active_pane {
                Pane::DatabaseBrowser => (0..n).for_each(|_| self.database_browser.move_up()),
                Pane::QueryEditor => self.query_editor.move_up(n),
                Pane::Results => self.results_viewer.move_up(n),
            },
            VimCommand::MoveDown(n) => match self.active_pane {
                Pane::DatabaseBrowser => (0..n).for_each(|_| self.database_browser.move_down()),
                Pane::QueryEditor => self.query_editor.move_down(n),
                Pane::Results => self.results_viewer.move_down(n),
            },
            VimCommand::MoveLeft(n) => match self.active_pane {
                Pane::QueryEditor => self.query_editor.move_left(n),
                Pane::Results => self.results_viewer.scroll_left(n),
                Pane::DatabaseBrowser => {}
            },
            VimCommand::MoveRight(n) => match self.active_pane {
                Pane::QueryEditor => self.query_editor.move_right(n),
                Pane::Results => self.results_viewer.scroll_right(n),
                Pane::DatabaseBrowser => {}
            },
            VimCommand::GotoTop => match self.active_pane {
                Pane::DatabaseBrowser => self.database_browser.goto_top(),
                Pane::QueryEditor => self.query_editor.goto_top(),
                Pane::Results => self.results_viewer.goto_top(),
            },
            VimCommand::GotoBottom => match self.active_pane {
                Pane::DatabaseBrowser => self.database_browser.goto_bottom(),
                Pane::QueryEditor => self.query_editor.goto_bottom(),
                Pane::Results => self.results_viewer.goto_bottom(),
            },
            VimCommand::GotoLineStart => match self.active_pane {
                Pane::QueryEditor => self.query_editor.goto_line_start(),
                Pane::Results => self.results_viewer.horizontal_scroll = 0,
                Pane::DatabaseBrowser => {}
            },
            VimCommand::GotoLineEnd => match self.active_pane {
                Pane::QueryEditor => self.query_editor.goto_line_end(),
                Pane::Results => self.results_viewer.scroll_right(usize::MAX),
                Pane::DatabaseBrowser => {}
            },
            VimCommand::SwitchToDataTab => self.results_viewer.active_tab = TabMode::Data,
            VimCommand::SwitchToColumnsTab => self.results_viewer.active_tab = TabMode::Columns,
            VimCommand::Yank => {
                if self.active_pane == Pane::Results {
                    self.yank_selected_row();
                }
            }
            VimCommand::BuildQuery => self.build_query(),
            VimCommand::Refresh => self.refresh(),
            VimCommand::OpenConnectionForm => self.connection_manager.show(),
            VimCommand::Disconnect => self.disconnect_selected(),
        }
    }

    /// Only the editor accepts text; anywhere else insert mode is undone.
    fn begin_insert(&mut self) -> bool {
        if self.active_pane != Pane::QueryEditor {
            self.vim_state.enter_normal_mode();
            return false;
        }
        true
    }

    fn editing(&self) -> bool {
        self.vim_state.mode == VimMode::Insert && self.active_pane == Pane::QueryEditor
    }

    fn execute_command(&mut self, cmd: &str) {
        let parts: Vec<&str> = cmd.split_whitespace().collect();
        let Some((&head, args)) = parts.split_first() else {
            return;
        };

        match head {
            "q" | "quit" => {
                self.should_quit = true;
            }
            "connect" | "conn" => self.connection_manager.show(),
            "disconnect" | "close" => self.disconnect_selected(),
            "exec" | "execute" | "run" => self.execute_query(),
            "clear" => {
                self.query_editor.clear();
                self.results_viewer.clear();
            }
            "build" => self.build_query(),
            "refresh" => self.refresh(),
            "export" => {
                let path = (!args.is_empty()).then(|| PathBuf::from(args.join(" ")));
                self.export_results(path);
            }
            "yank" => match args.first() {
                Some(&"json") => self.yank_result_json(),
                _ => self.yank_selected_row(),
            },
            other => {
                self.notify(Notification::warning("Command", format!("Unknown command: {}", other)));
            }
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    fn refresh_connections(&mut self) {
        let connections = self.registry.connections().map(Connection::info).collect();
        self.database_browser.set_connections(connections);
    }

    fn load_tables(&mut self, name: &str) {
        let tables = self.registry.list_tables(name);
        self.status = Some(format!("{}: {} tables", name, tables.len()));
        self.database_browser.set_tables(tables);
    }

    fn refresh(&mut self) {
        self.refresh_connections();
        if let Some(name) = self.selected_connection() {
            self.load_tables(&name);
        }
    }

    fn selected_connection(&self) -> Option<String> {
        self.database_browser.selected_connection_name().map(str::to_string)
    }

    fn connect_from_form(&mut self) {
        let name = self.connection_manager.form.name.clone();
        if name.is_empty() {
            self.notify(Notification::warning("Connection", "Please enter connection name"));
            return;
        }

        let target = match self.connection_manager.form.target() {
            Ok(target) => target,
            Err(message) => {
                self.notify(Notification::error("Connection error", message));
                return;
            }
        };

        match self.registry.open(&name, target) {
            Ok(()) => {
                self.connection_manager.hide();
                self.refresh_connections();
                self.database_browser.select_connection(&name);
                self.load_tables(&name);
                self.notify(Notification::info("Connection", "Connected successfully"));
            }
            Err(err) => {
                self.notify(Notification::error("Connection error", err.to_string()));
            }
        }
    }

    fn disconnect_selected(&mut self) {
        let Some(name) = self.selected_connection() else {
            self.notify(Notification::warning("Disconnect", "No connection selected"));
            return;
        };
        self.registry.close(&name);
        self.results_viewer.clear();
        self.refresh_connections();
        self.status = Some(format!("Disconnected {}", name));
    }

    fn activate_browser_item(&mut self) {
        match self.database_browser.current_item() {
            Some(BrowserItem::Connection(name)) => {
                self.database_browser.select_connection(&name);
                self.load_tables(&name);
            }
            Some(BrowserItem::Table(table)) => self.preview_table(&table),
            None => {}
        }
    }

    fn preview_table(&mut self, table: &str) {
        let query = self.config.preview_query(table);
        if !self.run_sql(&query) {
            return;
        }
        if let Some(name) = self.selected_connection() {
            let columns = self.registry.list_columns(&name, table);
            self.results_viewer.set_table(table.to_string(), columns);
        }
    }

    fn build_query(&mut self) {
        let table = match self.database_browser.current_item() {
            Some(BrowserItem::Table(table)) => Some(table),
            _ => self.results_viewer.table_name.clone(),
        };
        let Some(table) = table else {
            self.notify(Notification::warning("Build query", "Select a table first"));
            return;
        };
        self.query_editor.set_query(&self.config.preview_query(&table));
        self.active_pane = Pane::QueryEditor;
        self.update_focus();
    }

    fn execute_query(&mut self) {
        let query = self.query_editor.get_query();
        self.run_sql(&query);
    }

    fn execute_query_at_cursor(&mut self) {
        let query = self.query_editor.get_query_at_cursor();
        self.run_sql(&query);
    }

    /// Runs `sql` on the selected connection and shows the outcome. Returns
    /// whether a result was produced.
    fn run_sql(&mut self, sql: &str) -> bool {
        let Some(name) = self.selected_connection() else {
            self.notify(Notification::warning("Query", "No connection selected"));
            return false;
        };
        if sql.trim().is_empty() {
            self.notify(Notification::warning("Query", "Query is empty"));
            return false;
        }

        match self.registry.execute(&name, sql) {
            Ok(result) => {
                let schema_may_change = result.columns.is_empty();
                self.status = Some(match result.rows_affected {
                    Some(affected) => format!("{} rows affected", affected),
                    None => format!("{} rows in {}ms", result.row_count(), result.execution_time_ms),
                });
                self.results_viewer.set_result(result);
                if schema_may_change {
                    self.load_tables(&name);
                }
                self.active_pane = Pane::Results;
                self.update_focus();
                true
            }
            Err(err) => {
                self.notify(Notification::error("Query error", err.to_string()));
                false
            }
        }
    }

    fn export_results(&mut self, path: Option<PathBuf>) {
        let Some(result) = self.results_viewer.result.as_ref() else {
            self.notify(Notification::warning("Export", "No results to export"));
            return;
        };
        let path = path.unwrap_or_else(|| export::default_export_path(&self.config.export_dir));

        let notification = match export::export_csv(result, &path) {
            Ok(()) => Notification::info(
                "Export",
                format!("Exported {} rows to {}", result.row_count(), path.display()),
            ),
            Err(err) => Notification::error("Export error", format!("{:#}", err)),
        };
        self.notify(notification);
    }

    fn yank_selected_row(&mut self) {
        let Some(text) = self.results_viewer.selected_row_text() else {
            self.status = Some("Nothing to copy".to_string());
            return;
        };
        self.copy_and_report(text, "Row copied to clipboard");
    }

    fn yank_result_json(&mut self) {
        let Some(result) = self.results_viewer.result.as_ref() else {
            self.status = Some("Nothing to copy".to_string());
            return;
        };
        match serde_json::to_string_pretty(result) {
            Ok(json) => self.copy_and_report(json, "Result copied to clipboard as JSON"),
            Err(err) => self.notify(Notification::error("Clipboard error", err.to_string())),
        }
    }

    fn copy_and_report(&mut self, text: String, done: &str) {
        match self.copy_to_clipboard(text) {
            Ok(()) => self.status = Some(done.to_string()),
            Err(err) => {
                tracing::warn!("clipboard copy failed: {:#}", err);
                self.notify(Notification::error("Clipboard error", format!("{:#}", err)));
            }
        }
    }

    fn copy_to_clipboard(&mut self, text: String) -> Result<()> {
        // Kept alive for the whole session: on X11 the contents vanish with the handle.
        if self.clipboard.is_none() {
            self.clipboard = Some(Clipboard::new().context("Clipboard unavailable")?);
        }
        if let Some(clipboard) = self.clipboard.as_mut() {
            clipboard.set_text(text).context("Failed to copy to clipboard")?;
        }
        Ok(())
    }

    fn next_pane(&mut self) {
        self.active_pane = match self.active_pane {
            Pane::DatabaseBrowser => Pane::QueryEditor,
            Pane::QueryEditor => Pane::Results,
            Pane::Results => Pane::DatabaseBrowser,
        };
        self.update_focus();
    }

    fn prev_pane(&mut self) {
        self.active_pane = match self.active_pane {
            Pane::DatabaseBrowser => Pane::Results,
            Pane::QueryEditor => Pane::DatabaseBrowser,
            Pane::Results => Pane::QueryEditor,
        };
        self.update_focus();
    }

    fn update_focus(&mut self) {
        self.database_browser.focused = self.active_pane == Pane::DatabaseBrowser;
        self.query_editor.focused = self.active_pane == Pane::QueryEditor;
        self.results_viewer.focused = self.active_pane == Pane::Results;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{ConnectionTarget, Value};
    use crate::ui::NotificationKind;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn test_config(dir: &TempDir) -> Config {
        Config {
            export_dir: dir.path().to_path_buf(),
            preview_limit: 10,
            ..Config::default()
        }
    }

    /// App with one SQLite connection `main` holding `t(id, label)`.
    fn app_with_table(dir: &TempDir) -> App {
        let mut registry = Registry::new();
        let path = dir.path().join("app.db");
        registry
            .open("main", ConnectionTarget::sqlite(path.to_string_lossy()))
            .unwrap();
        registry
            .execute("main", "CREATE TABLE t (id INTEGER, label TEXT)")
            .unwrap();
        registry
            .execute("main", "INSERT INTO t VALUES (1, 'a'), (2, 'b')")
            .unwrap();

        let mut app = App::with_registry(test_config(dir), registry);
        app.database_browser.select_connection("main");
        app.refresh();
        app
    }

    fn message(app: &App) -> Option<&str> {
        app.notification.as_ref().map(|n| n.message.as_str())
    }

    #[test]
    fn test_connect_requires_name() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(test_config(&dir));
        app.handle_key_event(key(KeyCode::Char('C')));
        assert!(app.connection_manager.visible);

        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(message(&app), Some("Please enter connection name"));
        assert!(app.registry.is_empty());

        // Any key but Enter/Esc leaves the popup up
        app.handle_key_event(key(KeyCode::Char('x')));
        assert!(app.notification.is_some());
        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.notification.is_none());
        assert!(app.connection_manager.visible);
    }

    #[test]
    fn test_connect_from_form() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(test_config(&dir));
        app.connection_manager.show();
        app.connection_manager.form.name = "local".into();
        app.connection_manager.form.path = dir.path().join("x.db").to_string_lossy().into_owned();

        app.handle_key_event(ctrl('s'));
        assert_eq!(message(&app), Some("Connected successfully"));
        assert!(!app.connection_manager.visible);
        assert!(app.registry.contains("local"));
        assert_eq!(app.database_browser.selected_connection_name(), Some("local"));
    }

    #[test]
    fn test_connection_names_are_not_trimmed() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(test_config(&dir));
        for (name, file) in [("a", "a.db"), (" a", "b.db")] {
            app.connection_manager.show();
            app.connection_manager.form.name = name.into();
            app.connection_manager.form.path = dir.path().join(file).to_string_lossy().into_owned();
            app.handle_key_event(key(KeyCode::Enter));
            assert_eq!(message(&app), Some("Connected successfully"));
            app.handle_key_event(key(KeyCode::Esc));
        }
        assert_eq!(app.registry.names(), vec![" a", "a"]);
    }

    #[test]
    fn test_connect_duplicate_name_reports_error() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_table(&dir);
        app.connection_manager.show();
        app.connection_manager.form.name = "main".into();
        app.handle_key_event(key(KeyCode::Enter));

        let notification = app.notification.clone().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.title, "Connection error");
        assert_eq!(app.registry.len(), 1);
    }

    #[test]
    fn test_query_without_connection() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(test_config(&dir));
        app.query_editor.set_query("SELECT 1");
        app.handle_key_event(ctrl('r'));
        assert_eq!(message(&app), Some("No connection selected"));
    }

    #[test]
    fn test_empty_query() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_table(&dir);
        app.handle_key_event(ctrl('r'));
        assert_eq!(message(&app), Some("Query is empty"));
    }

    #[test]
    fn test_execute_all_shows_result() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_table(&dir);
        app.query_editor.set_query("SELECT id, label FROM t ORDER BY id");
        app.handle_key_event(ctrl('r'));

        assert!(app.notification.is_none());
        assert_eq!(app.active_pane, Pane::Results);
        let result = app.results_viewer.result.as_ref().unwrap();
        assert_eq!(result.columns, vec!["id", "label"]);
        assert_eq!(result.rows[1], vec![Value::Integer(2), Value::from("b")]);
    }

    #[test]
    fn test_query_error_is_shown() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_table(&dir);
        app.query_editor.set_query("SELEC nothing");
        app.handle_key_event(ctrl('r'));
        assert_eq!(app.notification.as_ref().map(|n| n.title.as_str()), Some("Query error"));
    }

    #[test]
    fn test_activate_table_previews_rows_and_columns() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_table(&dir);
        assert_eq!(app.database_browser.tables, vec!["t"]);

        app.database_browser.goto_bottom();
        app.handle_key_event(key(KeyCode::Enter));

        assert_eq!(app.results_viewer.result.as_ref().map(|r| r.row_count()), Some(2));
        assert_eq!(app.results_viewer.table_name.as_deref(), Some("t"));
        assert_eq!(app.results_viewer.table_columns, vec!["id", "label"]);
    }

    #[test]
    fn test_build_command_fills_editor() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_table(&dir);
        app.database_browser.goto_bottom();
        app.execute_command("build");
        assert_eq!(app.query_editor.get_query(), "SELECT * FROM t LIMIT 10");
        assert_eq!(app.active_pane, Pane::QueryEditor);
    }

    #[test]
    fn test_ddl_refreshes_tables() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_table(&dir);
        app.query_editor.set_query("CREATE TABLE u (x INTEGER)");
        app.execute_command("run");
        assert_eq!(app.database_browser.tables, vec!["t", "u"]);
    }

    #[test]
    fn test_export_command_writes_csv() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_table(&dir);
        app.query_editor.set_query("SELECT id, label FROM t ORDER BY id");
        app.execute_command("run");

        let out = dir.path().join("out.csv");
        app.execute_command(&format!("export {}", out.display()));
        assert_eq!(app.notification.as_ref().map(|n| n.kind), Some(NotificationKind::Info));
        let written = std::fs::read_to_string(&out).unwrap();
        assert_eq!(written, "\"id\",\"label\"\n\"1\",\"a\"\n\"2\",\"b\"\n");
    }

    #[test]
    fn test_export_without_result() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(test_config(&dir));
        app.execute_command("export");
        assert_eq!(message(&app), Some("No results to export"));
    }

    #[test]
    fn test_disconnect_closes_session() {
        let dir = TempDir::new().unwrap();
        let mut app = app_with_table(&dir);
        app.handle_key_event(key(KeyCode::Char('X')));
        assert!(app.registry.is_empty());
        assert!(app.database_browser.connections.is_empty());
        assert!(app.database_browser.tables.is_empty());

        app.execute_command("disconnect");
        assert_eq!(message(&app), Some("No connection selected"));
    }

    #[test]
    fn test_typing_only_in_editor() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(test_config(&dir));
        app.handle_key_event(key(KeyCode::Char('i')));
        assert_eq!(app.vim_state.mode, VimMode::Normal);

        app.handle_key_event(key(KeyCode::Tab));
        app.handle_key_event(key(KeyCode::Char('i')));
        for c in "SELECT 1".chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        app.handle_key_event(key(KeyCode::Esc));
        assert_eq!(app.query_editor.get_query(), "SELECT 1");
        assert_eq!(app.vim_state.mode, VimMode::Normal);
    }

    #[test]
    fn test_quit_command() {
        let dir = TempDir::new().unwrap();
        let mut app = App::new(test_config(&dir));
        app.execute_command("bogus");
        assert_eq!(message(&app), Some("Unknown command: bogus"));
        assert!(!app.should_quit);
        app.handle_key_event(key(KeyCode::Enter));
        app.execute_command("q");
        assert!(app.should_quit);
    }
}
