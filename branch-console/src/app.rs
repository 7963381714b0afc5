//! Console application state
//!
//! 把按键翻译为 gate / management 事件。状态机产生的副作用先进入
//! `pending`，由主循环取走并派发到后台任务执行。

use std::path::PathBuf;

use branch_client::spreadsheet::DEFAULT_EXPORT_FILE;
use branch_client::view::{
    Effect, FormField, GateEvent, GateState, GateTransition, ManagementEvent, ManagementState,
    PAGE_SIZE_OPTIONS,
};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use shared::{Branch, SortField};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiWidgetEvent, TuiWidgetState};

/// Dialog row index of the status toggle (after the text fields)
pub const STATUS_ROW: usize = FormField::ALL.len();

/// Columns reachable with the sort key, in cycle order
const SORT_CYCLE: [SortField; 6] = [
    SortField::Name,
    SortField::Code,
    SortField::City,
    SortField::State,
    SortField::Status,
    SortField::CreatedAt,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathAction {
    Import,
    Export,
}

/// Where key presses go on the management screen when no dialog is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    Path(PathAction),
}

pub struct App {
    pub gate: GateState,
    pub gate_field: GateField,
    pub username_input: Input,
    pub password_input: Input,

    pub management: ManagementState,
    pub input_mode: InputMode,
    pub search_input: Input,
    pub path_input: Input,
    /// Focused dialog row, `STATUS_ROW` for the status toggle
    pub dialog_row: usize,
    /// Editor of the focused dialog text field
    pub field_input: Input,
    /// Selected row of the loaded page
    pub selected: usize,

    /// Logger Widget State
    pub logger_state: TuiWidgetState,
    /// Bumped on logout; effect results of older sessions are dropped
    pub session: u64,
    pub should_quit: bool,
    pending: Vec<Effect>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            gate: GateState::default(),
            gate_field: GateField::default(),
            username_input: Input::default(),
            password_input: Input::default(),
            management: ManagementState::default(),
            input_mode: InputMode::default(),
            search_input: Input::default(),
            path_input: Input::default(),
            dialog_row: 0,
            field_input: Input::default(),
            selected: 0,
            logger_state: TuiWidgetState::new(),
            session: 0,
            should_quit: false,
            pending: Vec::new(),
        }
    }
}

impl App {
    pub fn is_authenticated(&self) -> bool {
        self.gate.is_authenticated()
    }

    /// Effects requested since the last call
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.pending)
    }

    pub fn selected_branch(&self) -> Option<&Branch> {
        self.management.branches.get(self.selected)
    }

    /// Feed an effect outcome back, unless it belongs to a closed session
    pub fn apply_result(&mut self, session: u64, event: ManagementEvent) {
        if session != self.session || !self.is_authenticated() {
            tracing::debug!(session, current = self.session, "Dropping stale result");
            return;
        }
        self.dispatch(event);
    }

    fn dispatch(&mut self, event: ManagementEvent) {
        let dialog_was_open = self.management.dialog.is_some();
        let effects = self.management.handle(event);

        if !dialog_was_open && self.management.dialog.is_some() {
            self.dialog_row = 0;
            self.reset_field_input();
        }
        let len = self.management.branches.len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
        self.pending.extend(effects);
    }

    fn gate_event(&mut self, event: GateEvent) {
        match self.gate.handle(event) {
            Some(GateTransition::Authenticated { username }) => {
                tracing::info!(username = %username, "Signed in");
                self.password_input.reset();
                self.management = ManagementState::default();
                self.input_mode = InputMode::Normal;
                self.selected = 0;
                self.dispatch(ManagementEvent::Mounted);
            }
            Some(GateTransition::LoggedOut) => {
                tracing::info!("Signed out");
                self.session += 1;
                self.management = ManagementState::default();
                self.input_mode = InputMode::Normal;
                self.search_input.reset();
                self.username_input.reset();
                self.password_input.reset();
                self.gate_field = GateField::Username;
                self.selected = 0;
                self.pending.clear();
            }
            None => {}
        }
    }

    /// Route one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if !self.is_authenticated() {
            self.handle_gate_key(key);
        } else if self.management.pending_delete.is_some() {
            self.handle_confirm_key(key);
        } else if self.management.dialog.is_some() {
            self.handle_dialog_key(key);
        } else {
            match self.input_mode {
                InputMode::Normal => self.handle_grid_key(key),
                InputMode::Search => self.handle_search_key(key),
                InputMode::Path(action) => self.handle_path_key(action, key),
            }
        }
    }

    fn handle_gate_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.gate_field = match self.gate_field {
                    GateField::Username => GateField::Password,
                    GateField::Password => GateField::Username,
                };
            }
            KeyCode::Enter => self.gate_event(GateEvent::Submit),
            _ => {
                let input = match self.gate_field {
                    GateField::Username => &mut self.username_input,
                    GateField::Password => &mut self.password_input,
                };
                let before = input.value().to_string();
                input.handle_event(&Event::Key(key));
                let value = input.value().to_string();
                if value != before {
                    let event = match self.gate_field {
                        GateField::Username => GateEvent::UsernameChanged(value),
                        GateField::Password => GateEvent::PasswordChanged(value),
                    };
                    self.gate_event(event);
                }
            }
        }
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.dispatch(ManagementEvent::DeleteConfirmed)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.dispatch(ManagementEvent::DeleteCancelled)
            }
            _ => {}
        }
    }

    fn handle_dialog_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.dispatch(ManagementEvent::DialogCancelled),
            KeyCode::Enter => self.dispatch(ManagementEvent::DialogConfirmed),
            KeyCode::Tab | KeyCode::Down => {
                self.dialog_row = (self.dialog_row + 1) % (STATUS_ROW + 1);
                self.reset_field_input();
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.dialog_row = (self.dialog_row + STATUS_ROW) % (STATUS_ROW + 1);
                self.reset_field_input();
            }
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right if self.dialog_row == STATUS_ROW => {
                self.dispatch(ManagementEvent::FormStatusToggled)
            }
            _ => {
                let Some(field) = FormField::ALL.get(self.dialog_row).copied() else {
                    return;
                };
                let before = self.field_input.value().to_string();
                self.field_input.handle_event(&Event::Key(key));
                let value = self.field_input.value().to_string();
                if value != before {
                    self.dispatch(ManagementEvent::FormChanged(field, value));
                }
            }
        }
    }

    fn reset_field_input(&mut self) {
        let value = match (&self.management.dialog, FormField::ALL.get(self.dialog_row)) {
            (Some(form), Some(field)) => form.get(*field).to_string(),
            _ => String::new(),
        };
        self.field_input = Input::new(value);
    }

    fn handle_grid_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Esc if self.management.fullscreen => {
                self.dispatch(ManagementEvent::FullscreenToggled)
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.management.branches.len() {
                    self.selected += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => self.dispatch(ManagementEvent::PrevPage),
            KeyCode::Right | KeyCode::Char('l') => self.dispatch(ManagementEvent::NextPage),
            KeyCode::Home => self.dispatch(ManagementEvent::PageChanged(0)),
            KeyCode::Char('z') => {
                let size = next_page_size(self.management.page_size);
                self.dispatch(ManagementEvent::PageSizeChanged(size));
            }
            KeyCode::Char('o') => {
                let field = next_sort_field(self.management.sort_field);
                self.dispatch(ManagementEvent::SortChanged(field));
            }
            KeyCode::Char('O') => {
                self.dispatch(ManagementEvent::SortChanged(self.management.sort_field))
            }
            KeyCode::Char('r') => self.dispatch(ManagementEvent::Refresh),
            KeyCode::Char('/') => self.input_mode = InputMode::Search,
            KeyCode::Char('a') => self.dispatch(ManagementEvent::AddRequested),
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(branch) = self.selected_branch().cloned() {
                    self.dispatch(ManagementEvent::EditRequested(branch));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(branch) = self.selected_branch().cloned() {
                    self.dispatch(ManagementEvent::DeleteRequested(branch));
                }
            }
            KeyCode::Char('i') => self.open_path_prompt(PathAction::Import),
            KeyCode::Char('x') => self.open_path_prompt(PathAction::Export),
            KeyCode::Char('v') => self.dispatch(ManagementEvent::ViewToggled),
            KeyCode::Char('f') => self.dispatch(ManagementEvent::FullscreenToggled),
            KeyCode::Char('L') => self.gate_event(GateEvent::Logout),
            KeyCode::PageUp => self.logger_state.transition(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown => self.logger_state.transition(TuiWidgetEvent::NextPageKey),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
            _ => {
                let before = self.search_input.value().to_string();
                self.search_input.handle_event(&Event::Key(key));
                let value = self.search_input.value().to_string();
                if value != before {
                    self.selected = 0;
                    self.dispatch(ManagementEvent::SearchChanged(value));
                }
            }
        }
    }

    fn open_path_prompt(&mut self, action: PathAction) {
        self.path_input = Input::new(DEFAULT_EXPORT_FILE.to_string());
        self.input_mode = InputMode::Path(action);
    }

    fn handle_path_key(&mut self, action: PathAction, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Normal,
            KeyCode::Enter => {
                let value = self.path_input.value().trim().to_string();
                if value.is_empty() {
                    return;
                }
                self.input_mode = InputMode::Normal;
                let path = PathBuf::from(value);
                match action {
                    PathAction::Import => self.dispatch(ManagementEvent::ImportRequested(path)),
                    PathAction::Export => self.dispatch(ManagementEvent::ExportRequested(path)),
                }
            }
            _ => {
                self.path_input.handle_event(&Event::Key(key));
            }
        }
    }
}

fn next_page_size(current: u64) -> u64 {
    PAGE_SIZE_OPTIONS
        .iter()
        .position(|size| *size == current)
        .map(|i| PAGE_SIZE_OPTIONS[(i + 1) % PAGE_SIZE_OPTIONS.len()])
        .unwrap_or(PAGE_SIZE_OPTIONS[0])
}

fn next_sort_field(current: SortField) -> SortField {
    SORT_CYCLE
        .iter()
        .position(|field| *field == current)
        .map(|i| SORT_CYCLE[(i + 1) % SORT_CYCLE.len()])
        .unwrap_or(SORT_CYCLE[0])
}
