// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::context::SharedContext;
use crate::model::{DeviceSession, ParsedTask, Task, TaskStatus};
use crate::routes::{DashboardView, View};
use crate::session::Session;
use crate::validate::FieldError;
use chrono::Utc;
use ratatui::widgets::ListState;
use strum::IntoEnumIterator;

#[derive(PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    /// Typing into the quick-add (natural language) input.
    QuickAdd,
    /// Typing into a form (login, register, profile, new task).
    Form,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FormKind {
    Login,
    Register,
    UpdateProfile,
    ChangePassword,
    CreateTask,
}

/// A single input in a form. Fields with `choices` cycle through fixed
/// options instead of taking free text.
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    /// Cursor position in characters, not bytes.
    pub cursor: usize,
    pub masked: bool,
    pub choices: &'static [&'static str],
    pub choice_idx: usize,
    pub error: Option<String>,
}

impl FormField {
    fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            value: String::new(),
            cursor: 0,
            masked: false,
            choices: &[],
            choice_idx: 0,
            error: None,
        }
    }

    fn password(name: &'static str, label: &'static str) -> Self {
        Self {
            masked: true,
            ..Self::text(name, label)
        }
    }

    fn choice(
        name: &'static str,
        label: &'static str,
        choices: &'static [&'static str],
        default_idx: usize,
    ) -> Self {
        Self {
            choices,
            choice_idx: default_idx,
            ..Self::text(name, label)
        }
    }

    pub fn is_choice(&self) -> bool {
        !self.choices.is_empty()
    }

    /// The submitted value: the selected option for choice fields, the
    /// typed text otherwise.
    pub fn submit_value(&self) -> &str {
        if self.is_choice() {
            self.choices[self.choice_idx]
        } else {
            &self.value
        }
    }

    pub fn insert(&mut self, c: char) {
        let byte_idx = char_to_byte(&self.value, self.cursor);
        self.value.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = char_to_byte(&self.value, self.cursor);
            self.value.remove(byte_idx);
        }
    }

    pub fn cycle_choice(&mut self, forward: bool) {
        if self.choices.is_empty() {
            return;
        }
        let len = self.choices.len();
        self.choice_idx = if forward {
            (self.choice_idx + 1) % len
        } else {
            (self.choice_idx + len - 1) % len
        };
    }
}

fn char_to_byte(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focused: usize,
    /// Backend/transport error shown above the form.
    pub error: Option<String>,
    pub success: Option<String>,
    pub submitting: bool,
}

impl FormState {
    fn new(kind: FormKind, fields: Vec<FormField>) -> Self {
        Self {
            kind,
            fields,
            focused: 0,
            error: None,
            success: None,
            submitting: false,
        }
    }

    pub fn login() -> Self {
        Self::new(
            FormKind::Login,
            vec![
                FormField::text("email", "Email"),
                FormField::password("password", "Password"),
            ],
        )
    }

    pub fn register() -> Self {
        Self::new(
            FormKind::Register,
            vec![
                FormField::text("username", "Username"),
                FormField::text("email", "Email"),
                FormField::password("password", "Password"),
                FormField::password("confirm_password", "Confirm Password"),
            ],
        )
    }

    pub fn update_profile() -> Self {
        Self::new(
            FormKind::UpdateProfile,
            vec![
                FormField::text("username", "New Username"),
                FormField::text("email", "New Email"),
            ],
        )
    }

    pub fn change_password() -> Self {
        Self::new(
            FormKind::ChangePassword,
            vec![
                FormField::password("current_password", "Current Password"),
                FormField::password("new_password", "New Password"),
                FormField::password("confirm_password", "Confirm New Password"),
            ],
        )
    }

    pub fn create_task() -> Self {
        Self::new(
            FormKind::CreateTask,
            vec![
                FormField::text("title", "Title"),
                FormField::text("description", "Description"),
                FormField::choice("priority", "Priority", &["low", "medium", "high"], 1),
                FormField::choice(
                    "recurrence",
                    "Recurrence",
                    &["none", "daily", "weekly", "monthly"],
                    0,
                ),
            ],
        )
    }

    pub fn focused_field_mut(&mut self) -> &mut FormField {
        &mut self.fields[self.focused]
    }

    pub fn next_field(&mut self) {
        self.focused = (self.focused + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
    }

    pub fn value(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.submit_value())
            .unwrap_or("")
    }

    pub fn clear_field_errors(&mut self) {
        for f in &mut self.fields {
            f.error = None;
        }
    }

    /// Attaches validation failures to their fields and focuses the first.
    pub fn apply_errors(&mut self, errors: &[FieldError]) {
        self.clear_field_errors();
        for err in errors {
            if let Some(f) = self.fields.iter_mut().find(|f| f.name == err.field) {
                f.error = Some(err.message.clone());
            }
        }
        if let Some(first) = self
            .fields
            .iter()
            .position(|f| f.error.is_some())
        {
            self.focused = first;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl TaskFilter {
    pub fn cycle(&self) -> Self {
        match self {
            TaskFilter::All => TaskFilter::Pending,
            TaskFilter::Pending => TaskFilter::Completed,
            TaskFilter::Completed => TaskFilter::All,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Pending => "pending",
            TaskFilter::Completed => "completed",
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Pending => task.status == TaskStatus::Pending,
            TaskFilter::Completed => task.status == TaskStatus::Completed,
        }
    }
}

/// Kanban column order, left to right.
pub const KANBAN_COLUMNS: [TaskStatus; 3] = [
    TaskStatus::Pending,
    TaskStatus::InProgress,
    TaskStatus::Completed,
];

pub struct AppState {
    // Data
    pub ctx: SharedContext,
    pub session: Option<Session>,
    pub tasks: Vec<Task>,
    pub device_sessions: Vec<DeviceSession>,

    // Routing
    pub view: View,

    // UI State
    pub mode: InputMode,
    pub dashboard_view: DashboardView,
    pub filter: TaskFilter,
    pub hide_completed: bool,
    pub list_state: ListState,
    pub sessions_state: ListState,
    pub kanban_col: usize,
    pub kanban_row: usize,
    pub form: Option<FormState>,
    pub message: String,
    pub loading: bool,
    pub show_full_help: bool,

    // Quick-add input (natural language parser)
    pub quick_add: String,
    pub quick_cursor: usize,
    pub quick_preview: Option<ParsedTask>,
}

impl AppState {
    pub fn new_with_ctx(ctx: SharedContext) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        let mut sessions_state = ListState::default();
        sessions_state.select(Some(0));

        Self {
            ctx,
            session: None,
            tasks: vec![],
            device_sessions: DeviceSession::seed(Utc::now()),
            view: View::Home,
            mode: InputMode::Normal,
            dashboard_view: DashboardView::default(),
            filter: TaskFilter::default(),
            hide_completed: false,
            list_state,
            sessions_state,
            kanban_col: 0,
            kanban_row: 0,
            form: None,
            message: String::new(),
            loading: false,
            show_full_help: false,
            quick_add: String::new(),
            quick_cursor: 0,
            quick_preview: None,
        }
    }

    /// Navigates by path string, exactly as the web client assigns
    /// `window.location`. All transitions funnel through `View::resolve`
    /// plus the auth guard.
    pub fn navigate(&mut self, path: &str) {
        let mut view = View::resolve(path);
        if view.requires_auth() && self.session.is_none() {
            view = View::Login;
        }
        self.view = view;
        self.show_full_help = false;

        match view {
            View::Login => {
                self.form = Some(FormState::login());
                self.mode = InputMode::Form;
            }
            View::Register => {
                self.form = Some(FormState::register());
                self.mode = InputMode::Form;
            }
            _ => {
                self.form = None;
                self.mode = InputMode::Normal;
            }
        }
    }

    // --- TASK SELECTION ---

    /// Tasks shown in the list view after filtering.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| self.filter.matches(t))
            .filter(|t| {
                !(self.hide_completed
                    && self.filter != TaskFilter::Completed
                    && t.status.is_done())
            })
            .collect()
    }

    pub fn kanban_tasks(&self, col: usize) -> Vec<&Task> {
        let status = KANBAN_COLUMNS[col];
        self.tasks.iter().filter(|t| t.status == status).collect()
    }

    /// The id of the task the cursor is on, for the active sub-view.
    pub fn selected_task_id(&self) -> Option<String> {
        match self.dashboard_view {
            DashboardView::List => {
                let visible = self.visible_tasks();
                let idx = self.list_state.selected()?;
                visible.get(idx).map(|t| t.id.clone())
            }
            DashboardView::Kanban => {
                let col = self.kanban_tasks(self.kanban_col);
                col.get(self.kanban_row).map(|t| t.id.clone())
            }
            _ => None,
        }
    }

    pub fn next(&mut self) {
        match self.dashboard_view {
            DashboardView::List => {
                let len = self.visible_tasks().len();
                step_list(&mut self.list_state, len, 1);
            }
            DashboardView::Kanban => {
                let len = self.kanban_tasks(self.kanban_col).len();
                if len > 0 {
                    self.kanban_row = (self.kanban_row + 1).min(len - 1);
                }
            }
            DashboardView::Sessions => {
                let len = self.device_sessions.len();
                step_list(&mut self.sessions_state, len, 1);
            }
            DashboardView::Analytics => {}
        }
    }

    pub fn previous(&mut self) {
        match self.dashboard_view {
            DashboardView::List => {
                let len = self.visible_tasks().len();
                step_list(&mut self.list_state, len, -1);
            }
            DashboardView::Kanban => {
                self.kanban_row = self.kanban_row.saturating_sub(1);
            }
            DashboardView::Sessions => {
                let len = self.device_sessions.len();
                step_list(&mut self.sessions_state, len, -1);
            }
            DashboardView::Analytics => {}
        }
    }

    pub fn kanban_move_cursor(&mut self, delta: isize) {
        let cols = KANBAN_COLUMNS.len() as isize;
        let next = (self.kanban_col as isize + delta).rem_euclid(cols) as usize;
        self.kanban_col = next;
        let len = self.kanban_tasks(self.kanban_col).len();
        self.kanban_row = self.kanban_row.min(len.saturating_sub(1));
    }

    pub fn cycle_dashboard_view(&mut self) {
        let views: Vec<DashboardView> = DashboardView::iter().collect();
        let idx = views
            .iter()
            .position(|v| *v == self.dashboard_view)
            .unwrap_or(0);
        self.dashboard_view = views[(idx + 1) % views.len()];
    }

    /// Clamp selections after the task list changed under the cursor.
    pub fn clamp_selection(&mut self) {
        let visible = self.visible_tasks().len();
        if let Some(sel) = self.list_state.selected()
            && sel >= visible
        {
            self.list_state
                .select(if visible == 0 { Some(0) } else { Some(visible - 1) });
        }
        let col_len = self.kanban_tasks(self.kanban_col).len();
        self.kanban_row = self.kanban_row.min(col_len.saturating_sub(1));
    }

    // --- QUICK ADD ---

    pub fn quick_add_insert(&mut self, c: char) {
        let byte_idx = char_to_byte(&self.quick_add, self.quick_cursor);
        self.quick_add.insert(byte_idx, c);
        self.quick_cursor += 1;
        self.refresh_quick_preview();
    }

    pub fn quick_add_backspace(&mut self) {
        if self.quick_cursor > 0 {
            self.quick_cursor -= 1;
            let byte_idx = char_to_byte(&self.quick_add, self.quick_cursor);
            self.quick_add.remove(byte_idx);
            self.refresh_quick_preview();
        }
    }

    pub fn quick_add_clear(&mut self) {
        self.quick_add.clear();
        self.quick_cursor = 0;
        self.quick_preview = None;
    }

    /// Reparses the quick-add text. Blank input shows no preview; the
    /// caller is the one deciding not to act on a blank title.
    pub fn refresh_quick_preview(&mut self) {
        if self.quick_add.trim().is_empty() {
            self.quick_preview = None;
        } else {
            let today = chrono::Local::now().date_naive();
            self.quick_preview = Some(crate::model::parse_task_text(&self.quick_add, today));
        }
    }
}

fn step_list(state: &mut ListState, len: usize, delta: isize) {
    if len == 0 {
        state.select(Some(0));
        return;
    }
    let current = state.selected().unwrap_or(0) as isize;
    let next = (current + delta).clamp(0, len as isize - 1);
    state.select(Some(next as usize));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use crate::model::User;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new_with_ctx(Arc::new(TestContext::new()))
    }

    fn session() -> Session {
        Session {
            token: "tok".to_string(),
            user: User {
                id: "u1".to_string(),
                username: "amy".to_string(),
                email: "amy@example.com".to_string(),
                created_at: None,
                updated_at: None,
            },
        }
    }

    #[test]
    fn unauthenticated_dashboard_redirects_to_login() {
        let mut s = state();
        s.navigate("/dashboard");
        assert_eq!(s.view, View::Login);
        assert!(s.form.is_some());
    }

    #[test]
    fn authenticated_dashboard_stays() {
        let mut s = state();
        s.session = Some(session());
        s.navigate("/dashboard");
        assert_eq!(s.view, View::Dashboard);
        s.navigate("/dashboard/profile");
        assert_eq!(s.view, View::Profile);
    }

    #[test]
    fn unknown_path_lands_on_home() {
        let mut s = state();
        s.navigate("/nope");
        assert_eq!(s.view, View::Home);
    }

    #[test]
    fn filter_cycle_wraps() {
        let f = TaskFilter::All;
        assert_eq!(f.cycle(), TaskFilter::Pending);
        assert_eq!(f.cycle().cycle(), TaskFilter::Completed);
        assert_eq!(f.cycle().cycle().cycle(), TaskFilter::All);
    }

    #[test]
    fn quick_add_blank_input_has_no_preview() {
        let mut s = state();
        s.quick_add_insert(' ');
        assert!(s.quick_preview.is_none());
        s.quick_add_insert('x');
        assert!(s.quick_preview.is_some());
        s.quick_add_clear();
        assert!(s.quick_preview.is_none());
    }

    #[test]
    fn form_field_editing_is_char_based() {
        let mut form = FormState::login();
        for c in "héllo".chars() {
            form.focused_field_mut().insert(c);
        }
        assert_eq!(form.value("email"), "héllo");
        form.focused_field_mut().backspace();
        form.focused_field_mut().backspace();
        assert_eq!(form.value("email"), "hél");
    }

    #[test]
    fn choice_field_cycles_both_ways() {
        let mut form = FormState::create_task();
        assert_eq!(form.value("priority"), "medium");
        let idx = form.fields.iter().position(|f| f.name == "priority").unwrap();
        form.fields[idx].cycle_choice(true);
        assert_eq!(form.value("priority"), "high");
        form.fields[idx].cycle_choice(true);
        assert_eq!(form.value("priority"), "low");
        form.fields[idx].cycle_choice(false);
        assert_eq!(form.value("priority"), "high");
    }
}
