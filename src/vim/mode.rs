use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VimMode {
    Normal,
    Insert,
    Command,
}

impl VimMode {
    pub fn as_str(&self) -> &str {
        match self {
            VimMode::Normal => "NORMAL",
            VimMode::Insert => "INSERT",
            VimMode::Command => "COMMAND",
        }
    }
}

#[derive(Debug, Clone)]
pub struct VimState {
    pub mode: VimMode,
    pub command_buffer: String,
    pub count: Option<usize>,
    pending_g: bool,
}

impl Default for VimState {
    fn default() -> Self {
        Self {
            mode: VimMode::Normal,
            command_buffer: String::new(),
            count: None,
            pending_g: false,
        }
    }
}

impl VimState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter_insert_mode(&mut self) {
        self.mode = VimMode::Insert;
        self.reset_state();
    }

    pub fn enter_normal_mode(&mut self) {
        self.mode = VimMode::Normal;
        self.reset_state();
    }

    pub fn enter_command_mode(&mut self) {
        self.mode = VimMode::Command;
        self.command_buffer.clear();
    }

    pub fn get_command(&self) -> &str {
        &self.command_buffer
    }

    fn push_count(&mut self, n: usize) {
        self.count = Some(match self.count {
            Some(existing) => existing.saturating_mul(10).saturating_add(n),
            None => n,
        });
    }

    fn take_count(&mut self) -> usize {
        self.count.take().unwrap_or(1)
    }

    fn reset_state(&mut self) {
        self.command_buffer.clear();
        self.count = None;
        self.pending_g = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<VimCommand> {
        match self.mode {
            VimMode::Normal => self.handle_normal_mode(key),
            VimMode::Insert => self.handle_insert_mode(key),
            VimMode::Command => self.handle_command_mode(key),
        }
    }

    fn handle_normal_mode(&mut self, key: KeyEvent) -> Option<VimCommand> {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Some(VimCommand::Quit),
                KeyCode::Char('e') => Some(VimCommand::ExecuteQueryUnderCursor),
                KeyCode::Char('r') => Some(VimCommand::ExecuteAll),
                _ => None,
            };
        }

        let was_pending_g = std::mem::take(&mut self.pending_g);

        match key.code {
            KeyCode::Char('h') | KeyCode::Left => Some(VimCommand::MoveLeft(self.take_count())),
            KeyCode::Char('j') | KeyCode::Down => Some(VimCommand::MoveDown(self.take_count())),
            KeyCode::Char('k') | KeyCode::Up => Some(VimCommand::MoveUp(self.take_count())),
            KeyCode::Char('l') | KeyCode::Right => Some(VimCommand::MoveRight(self.take_count())),
            KeyCode::Char('i') => {
                self.enter_insert_mode();
                Some(VimCommand::EnterInsertMode)
            }
            KeyCode::Char('A') => {
                self.enter_insert_mode();
                Some(VimCommand::InsertAtLineEnd)
            }
            KeyCode::Char('o') => {
                self.enter_insert_mode();
                Some(VimCommand::OpenLineBelow)
            }
            KeyCode::Char(':') => {
                self.enter_command_mode();
                Some(VimCommand::EnterCommandMode)
            }
            KeyCode::Char('x') => Some(VimCommand::DeleteChar),
            KeyCode::Char('X') => Some(VimCommand::Disconnect),
            KeyCode::Char('C') => Some(VimCommand::OpenConnectionForm),
            KeyCode::Char('y') => Some(VimCommand::Yank),
            KeyCode::Char('b') => Some(VimCommand::BuildQuery),
            KeyCode::Char('R') => Some(VimCommand::Refresh),
            KeyCode::Char('1') if self.count.is_none() => Some(VimCommand::SwitchToDataTab),
            KeyCode::Char('2') if self.count.is_none() => Some(VimCommand::SwitchToColumnsTab),
            KeyCode::Char('g') if was_pending_g => Some(VimCommand::GotoTop),
            KeyCode::Char('g') => {
                self.pending_g = true;
                None
            }
            KeyCode::Char('G') => Some(VimCommand::GotoBottom),
            KeyCode::Char('0') if self.count.is_none() => Some(VimCommand::GotoLineStart),
            KeyCode::Char('$') => Some(VimCommand::GotoLineEnd),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if let Some(digit) = c.to_digit(10) {
                    self.push_count(digit as usize);
                }
                None
            }
            KeyCode::Char('q') => Some(VimCommand::Quit),
            KeyCode::Tab => Some(VimCommand::NextPane),
            KeyCode::BackTab => Some(VimCommand::PrevPane),
            KeyCode::Enter => Some(VimCommand::Activate),
            _ => None,
        }
    }

    fn handle_insert_mode(&mut self, key: KeyEvent) -> Option<VimCommand> {
        match key.code {
            KeyCode::Esc => {
                self.enter_normal_mode();
                Some(VimCommand::ExitInsertMode)
            }
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(VimCommand::ExecuteQueryUnderCursor)
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(VimCommand::ExecuteAll)
            }
            KeyCode::Char(c) => Some(VimCommand::InsertChar(c)),
            KeyCode::Backspace => Some(VimCommand::Backspace),
            KeyCode::Enter => Some(VimCommand::InsertNewline),
            KeyCode::Tab => Some(VimCommand::InsertTab),
            KeyCode::Left => Some(VimCommand::MoveLeft(1)),
            KeyCode::Right => Some(VimCommand::MoveRight(1)),
            KeyCode::Up => Some(VimCommand::MoveUp(1)),
            KeyCode::Down => Some(VimCommand::MoveDown(1)),
            _ => None,
        }
    }

    fn handle_command_mode(&mut self, key: KeyEvent) -> Option<VimCommand> {
        match key.code {
            KeyCode::Esc => {
                self.enter_normal_mode();
                Some(VimCommand::CancelCommand)
            }
            KeyCode::Enter => {
                let cmd = self.command_buffer.clone();
                self.enter_normal_mode();
                Some(VimCommand::ExecuteCommand(cmd))
            }
            KeyCode::Char(c) => {
                self.command_buffer.push(c);
                None
            }
            KeyCode::Backspace => {
                if self.command_buffer.pop().is_none() {
                    self.enter_normal_mode();
                    return Some(VimCommand::CancelCommand);
                }
                None
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VimCommand {
    // Movement
    MoveLeft(usize),
    MoveRight(usize),
    MoveUp(usize),
    MoveDown(usize),
    GotoTop,
    GotoBottom,
    GotoLineStart,
    GotoLineEnd,

    // Mode changes
    EnterInsertMode,
    InsertAtLineEnd,
    OpenLineBelow,
    ExitInsertMode,
    EnterCommandMode,
    CancelCommand,

    // Editing
    InsertChar(char),
    InsertNewline,
    InsertTab,
    Backspace,
    DeleteChar,
    Yank,

    // Navigation
    NextPane,
    PrevPane,
    SwitchToDataTab,
    SwitchToColumnsTab,

    // Actions
    Activate,
    ExecuteQueryUnderCursor,
    ExecuteAll,
    BuildQuery,
    Refresh,
    OpenConnectionForm,
    Disconnect,

    ExecuteCommand(String),
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_count_prefix() {
        let mut state = VimState::new();
        assert_eq!(state.handle_key(key(KeyCode::Char('3'))), None);
        assert_eq!(state.handle_key(key(KeyCode::Char('j'))), Some(VimCommand::MoveDown(3)));
        assert_eq!(state.handle_key(key(KeyCode::Char('j'))), Some(VimCommand::MoveDown(1)));
    }

    #[test]
    fn test_gg_goes_to_top() {
        let mut state = VimState::new();
        assert_eq!(state.handle_key(key(KeyCode::Char('g'))), None);
        assert_eq!(state.handle_key(key(KeyCode::Char('g'))), Some(VimCommand::GotoTop));
    }

    #[test]
    fn test_command_mode_collects_text() {
        let mut state = VimState::new();
        state.handle_key(key(KeyCode::Char(':')));
        for c in "export /tmp/a.csv".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(state.get_command(), "export /tmp/a.csv");
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(VimCommand::ExecuteCommand("export /tmp/a.csv".into()))
        );
        assert_eq!(state.mode, VimMode::Normal);
    }

    #[test]
    fn test_insert_mode_ctrl_r_executes() {
        let mut state = VimState::new();
        state.handle_key(key(KeyCode::Char('i')));
        assert_eq!(state.mode, VimMode::Insert);
        let ctrl_r = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(state.handle_key(ctrl_r), Some(VimCommand::ExecuteAll));
    }
}
