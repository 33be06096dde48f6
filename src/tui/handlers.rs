// File: src/tui/handlers.rs
// Handles keyboard input and network events for the TUI.
use crate::client::{NewTask, TaskUpdate};
use crate::model::{Priority, Recurrence, TaskStatus};
use crate::routes::{DashboardView, View};
use crate::tui::action::{Action, AppEvent};
use crate::tui::state::{AppState, FormKind, FormState, InputMode, KANBAN_COLUMNS};
use crate::validate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::Sender;

pub fn handle_app_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Status(s) => state.message = s,

        AppEvent::Error(s) => {
            state.loading = false;
            // Errors during a form submission belong to the form banner,
            // everything else goes to the status line.
            if let Some(form) = state.form.as_mut()
                && form.submitting
            {
                form.submitting = false;
                form.error = Some(s);
            } else {
                state.message = format!("Error: {}", s);
            }
        }

        AppEvent::SessionLoaded(session) | AppEvent::LoggedIn(session) => {
            state.session = Some(session);
            state.loading = true;
            state.navigate(View::Dashboard.path());
        }

        AppEvent::LoggedOut => {
            state.session = None;
            state.tasks.clear();
            state.navigate("/");
            state.message = "Signed out.".to_string();
        }

        AppEvent::SessionExpired => {
            state.session = None;
            state.tasks.clear();
            state.navigate(View::Login.path());
            if let Some(form) = state.form.as_mut() {
                form.error = Some("Session expired. Please sign in again.".to_string());
            }
        }

        AppEvent::TasksLoaded(tasks) => {
            state.tasks = tasks;
            state.loading = false;
            state.clamp_selection();
        }

        AppEvent::TaskCreated(task) => {
            // Newest first, as the web dashboard prepends.
            state.tasks.insert(0, task);
            state.quick_add_clear();
            if matches!(&state.form, Some(f) if f.kind == FormKind::CreateTask) {
                state.form = None;
                state.mode = InputMode::Normal;
            }
            state.clamp_selection();
        }

        AppEvent::TaskUpdated { id, update } => {
            if let Some(task) = state.tasks.iter_mut().find(|t| t.id == id) {
                if let Some(title) = update.title {
                    task.title = title;
                }
                if let Some(description) = update.description {
                    task.description = Some(description);
                }
                if let Some(status) = update.status {
                    task.status = status;
                }
                if let Some(priority) = update.priority {
                    task.priority = Some(priority);
                }
                if let Some(recurrence) = update.recurrence {
                    task.recurrence = Some(recurrence);
                }
                if let Some(due) = update.due_date {
                    task.due_date = Some(due);
                }
            }
            state.clamp_selection();
        }

        AppEvent::TaskDeleted(id) => {
            state.tasks.retain(|t| t.id != id);
            state.clamp_selection();
        }

        AppEvent::ProfileLoaded(user) => {
            if let Some(session) = state.session.as_mut() {
                session.user = user;
            }
            state.loading = false;
        }

        AppEvent::ProfileUpdated(user) => {
            if let Some(session) = state.session.as_mut() {
                session.user = user;
            }
            if let Some(form) = state.form.as_mut()
                && form.kind == FormKind::UpdateProfile
            {
                form.submitting = false;
                form.success = Some("Profile updated successfully!".to_string());
                for f in &mut form.fields {
                    f.value.clear();
                    f.cursor = 0;
                }
            }
        }

        AppEvent::PasswordChanged => {
            if let Some(form) = state.form.as_mut()
                && form.kind == FormKind::ChangePassword
            {
                form.submitting = false;
                form.success = Some("Password changed successfully!".to_string());
                for f in &mut form.fields {
                    f.value.clear();
                    f.cursor = 0;
                }
            }
        }
    }
}

pub async fn handle_key_event(
    key: KeyEvent,
    state: &mut AppState,
    action_tx: &Sender<Action>,
) -> Option<Action> {
    match state.mode {
        InputMode::Normal => handle_normal_mode(key, state, action_tx).await,
        InputMode::QuickAdd => handle_quick_add_mode(key, state, action_tx).await,
        InputMode::Form => handle_form_mode(key, state, action_tx).await,
    }
}

async fn handle_normal_mode(
    key: KeyEvent,
    state: &mut AppState,
    action_tx: &Sender<Action>,
) -> Option<Action> {
    // Global keys first.
    match key.code {
        KeyCode::Char('q') => return Some(Action::Quit),
        KeyCode::Char('?') => {
            state.show_full_help = !state.show_full_help;
            return None;
        }
        _ => {}
    }

    match state.view {
        View::Home => match key.code {
            KeyCode::Char('l') => state.navigate(View::Login.path()),
            KeyCode::Char('r') => state.navigate(View::Register.path()),
            KeyCode::Char('d') | KeyCode::Enter => state.navigate(View::Dashboard.path()),
            _ => {}
        },

        View::Dashboard => return handle_dashboard_keys(key, state, action_tx).await,

        View::Profile => match key.code {
            KeyCode::Char('e') => {
                state.form = Some(FormState::update_profile());
                state.mode = InputMode::Form;
            }
            KeyCode::Char('w') => {
                state.form = Some(FormState::change_password());
                state.mode = InputMode::Form;
            }
            KeyCode::Char('o') => {
                let _ = action_tx.send(Action::Logout).await;
            }
            KeyCode::Esc | KeyCode::Char('b') => state.navigate(View::Dashboard.path()),
            _ => {}
        },

        // Login/Register are form screens; Normal mode only ever sees them
        // transiently.
        View::Login | View::Register => {}
    }
    None
}

async fn handle_dashboard_keys(
    key: KeyEvent,
    state: &mut AppState,
    action_tx: &Sender<Action>,
) -> Option<Action> {
    match key.code {
        KeyCode::Tab => state.cycle_dashboard_view(),
        KeyCode::Char('1') => state.dashboard_view = DashboardView::List,
        KeyCode::Char('2') => state.dashboard_view = DashboardView::Kanban,
        KeyCode::Char('3') => state.dashboard_view = DashboardView::Analytics,
        KeyCode::Char('4') => state.dashboard_view = DashboardView::Sessions,

        KeyCode::Char('a') => {
            state.mode = InputMode::QuickAdd;
            state.refresh_quick_preview();
        }
        KeyCode::Char('n') => {
            state.form = Some(FormState::create_task());
            state.mode = InputMode::Form;
        }
        KeyCode::Char('r') => {
            let _ = action_tx.send(Action::FetchTasks).await;
        }
        KeyCode::Char('p') => {
            state.navigate(View::Profile.path());
            let _ = action_tx.send(Action::FetchProfile).await;
        }
        KeyCode::Char('o') => {
            let _ = action_tx.send(Action::Logout).await;
        }

        KeyCode::Char('j') | KeyCode::Down => state.next(),
        KeyCode::Char('k') | KeyCode::Up => state.previous(),

        KeyCode::Char('f') if state.dashboard_view == DashboardView::List => {
            state.filter = state.filter.cycle();
            state.clamp_selection();
        }

        KeyCode::Char('h') | KeyCode::Left
            if state.dashboard_view == DashboardView::Kanban =>
        {
            state.kanban_move_cursor(-1);
        }
        KeyCode::Char('l') | KeyCode::Right
            if state.dashboard_view == DashboardView::Kanban =>
        {
            state.kanban_move_cursor(1);
        }

        // Move the selected task to the adjacent kanban column: the
        // terminal analog of dragging a card.
        KeyCode::Char('<') | KeyCode::Char('>')
            if state.dashboard_view == DashboardView::Kanban =>
        {
            let delta: isize = if key.code == KeyCode::Char('<') { -1 } else { 1 };
            let target = state.kanban_col as isize + delta;
            if (0..KANBAN_COLUMNS.len() as isize).contains(&target)
                && let Some(id) = state.selected_task_id()
            {
                let status = KANBAN_COLUMNS[target as usize];
                let _ = action_tx
                    .send(Action::UpdateTask {
                        id,
                        update: TaskUpdate::status(status),
                    })
                    .await;
                state.kanban_col = target as usize;
                state.message = "Moving...".to_string();
            }
        }

        KeyCode::Char(' ') => {
            if let Some(id) = state.selected_task_id()
                && let Some(task) = state.tasks.iter().find(|t| t.id == id)
            {
                let toggled = if task.status.is_done() {
                    TaskStatus::Pending
                } else {
                    TaskStatus::Completed
                };
                let _ = action_tx
                    .send(Action::UpdateTask {
                        id,
                        update: TaskUpdate::status(toggled),
                    })
                    .await;
            }
        }

        KeyCode::Char('s') => {
            if let Some(id) = state.selected_task_id()
                && let Some(task) = state.tasks.iter().find(|t| t.id == id)
            {
                let next = match task.status {
                    TaskStatus::Pending => TaskStatus::InProgress,
                    TaskStatus::InProgress => TaskStatus::Completed,
                    TaskStatus::Completed => TaskStatus::Pending,
                };
                let _ = action_tx
                    .send(Action::UpdateTask {
                        id,
                        update: TaskUpdate::status(next),
                    })
                    .await;
            }
        }

        KeyCode::Char('d') => {
            if let Some(id) = state.selected_task_id() {
                let _ = action_tx.send(Action::DeleteTask(id)).await;
            }
        }

        // Sessions view: revoke the selected non-current entry.
        KeyCode::Char('x') if state.dashboard_view == DashboardView::Sessions => {
            if let Some(idx) = state.sessions_state.selected()
                && let Some(s) = state.device_sessions.get(idx)
                && !s.current
            {
                state.device_sessions.remove(idx);
                let len = state.device_sessions.len();
                if idx >= len && len > 0 {
                    state.sessions_state.select(Some(len - 1));
                }
                state.message = "Session revoked.".to_string();
            }
        }
        KeyCode::Char('X') if state.dashboard_view == DashboardView::Sessions => {
            state.device_sessions.retain(|s| s.current);
            state.sessions_state.select(Some(0));
            state.message = "Signed out of all other sessions.".to_string();
        }

        _ => {}
    }
    None
}

async fn handle_quick_add_mode(
    key: KeyEvent,
    state: &mut AppState,
    action_tx: &Sender<Action>,
) -> Option<Action> {
    match key.code {
        KeyCode::Esc => state.mode = InputMode::Normal,
        KeyCode::Enter => {
            // The parser is total; acting on a blank title is the one thing
            // the caller must refuse itself.
            if let Some(parsed) = state.quick_preview.clone()
                && !parsed.title.is_empty()
            {
                let mut new_task = NewTask::new(&parsed.title);
                if let Some(priority) = parsed.priority {
                    new_task.priority = priority;
                }
                if let Some(description) = parsed.description {
                    new_task.description = description;
                }
                if let Some(due) = parsed.due {
                    new_task.due_date = Some(due.and_hms_opt(23, 59, 59).unwrap().and_utc());
                }
                let _ = action_tx.send(Action::CreateTask(new_task)).await;
                state.message = "Adding...".to_string();
            }
        }
        KeyCode::Backspace => state.quick_add_backspace(),
        KeyCode::Left => state.quick_cursor = state.quick_cursor.saturating_sub(1),
        KeyCode::Right => {
            let len = state.quick_add.chars().count();
            state.quick_cursor = (state.quick_cursor + 1).min(len);
        }
        KeyCode::Char(c) => state.quick_add_insert(c),
        _ => {}
    }
    None
}

async fn handle_form_mode(
    key: KeyEvent,
    state: &mut AppState,
    action_tx: &Sender<Action>,
) -> Option<Action> {
    // Cross-links between the auth screens.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match (key.code, state.view) {
            (KeyCode::Char('r'), View::Login) => {
                state.navigate(View::Register.path());
                return None;
            }
            (KeyCode::Char('l'), View::Register) => {
                state.navigate(View::Login.path());
                return None;
            }
            (KeyCode::Char('c'), _) => return Some(Action::Quit),
            _ => {}
        }
    }

    let Some(form) = state.form.as_mut() else {
        state.mode = InputMode::Normal;
        return None;
    };

    match key.code {
        KeyCode::Esc => match form.kind {
            // The auth screens' "Back" link.
            FormKind::Login | FormKind::Register => state.navigate("/"),
            _ => {
                state.form = None;
                state.mode = InputMode::Normal;
            }
        },
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left => {
            let field = form.focused_field_mut();
            if field.is_choice() {
                field.cycle_choice(false);
            } else {
                field.cursor = field.cursor.saturating_sub(1);
            }
        }
        KeyCode::Right => {
            let field = form.focused_field_mut();
            if field.is_choice() {
                field.cycle_choice(true);
            } else {
                let len = field.value.chars().count();
                field.cursor = (field.cursor + 1).min(len);
            }
        }
        KeyCode::Backspace => form.focused_field_mut().backspace(),
        KeyCode::Enter => submit_form(state, action_tx).await,
        KeyCode::Char(c) => {
            let field = form.focused_field_mut();
            if field.is_choice() {
                if c == ' ' {
                    field.cycle_choice(true);
                }
            } else {
                field.insert(c);
            }
        }
        _ => {}
    }
    None
}

async fn submit_form(state: &mut AppState, action_tx: &Sender<Action>) {
    let Some(form) = state.form.as_mut() else {
        return;
    };
    form.error = None;
    form.success = None;

    let action = match form.kind {
        FormKind::Login => {
            let email = form.value("email").to_string();
            let password = form.value("password").to_string();
            let errors = validate::validate_login(&email, &password);
            if !errors.is_empty() {
                form.apply_errors(&errors);
                return;
            }
            Action::Login { email, password }
        }
        FormKind::Register => {
            let username = form.value("username").to_string();
            let email = form.value("email").to_string();
            let password = form.value("password").to_string();
            let confirm = form.value("confirm_password").to_string();
            let errors = validate::validate_register(&username, &email, &password, &confirm);
            if !errors.is_empty() {
                form.apply_errors(&errors);
                return;
            }
            Action::Register {
                username,
                email,
                password,
            }
        }
        FormKind::UpdateProfile => {
            let username = form.value("username").to_string();
            let email = form.value("email").to_string();
            let errors = validate::validate_profile_update(&username, &email);
            if !errors.is_empty() {
                form.apply_errors(&errors);
                return;
            }
            Action::UpdateProfile {
                username: (!username.is_empty()).then_some(username),
                email: (!email.is_empty()).then_some(email),
            }
        }
        FormKind::ChangePassword => {
            let current = form.value("current_password").to_string();
            let new = form.value("new_password").to_string();
            let confirm = form.value("confirm_password").to_string();
            let errors = validate::validate_password_change(&current, &new, &confirm);
            if !errors.is_empty() {
                form.apply_errors(&errors);
                return;
            }
            Action::ChangePassword {
                current_password: current,
                new_password: new,
            }
        }
        FormKind::CreateTask => {
            let title = form.value("title").to_string();
            let errors = validate::validate_task_title(&title);
            if !errors.is_empty() {
                form.apply_errors(&errors);
                return;
            }
            let mut new_task = NewTask::new(title.trim());
            new_task.description = form.value("description").to_string();
            new_task.priority = parse_priority(form.value("priority"));
            new_task.recurrence = parse_recurrence(form.value("recurrence"));
            Action::CreateTask(new_task)
        }
    };

    form.clear_field_errors();
    form.submitting = true;
    let _ = action_tx.send(action).await;
}

fn parse_priority(s: &str) -> Priority {
    match s {
        "low" => Priority::Low,
        "high" => Priority::High,
        _ => Priority::Medium,
    }
}

fn parse_recurrence(s: &str) -> Recurrence {
    match s {
        "daily" => Recurrence::Daily,
        "weekly" => Recurrence::Weekly,
        "monthly" => Recurrence::Monthly,
        _ => Recurrence::None,
    }
}
