// File: ./src/tui/action.rs
// Defines actions and events for TUI interaction and state updates.
use crate::client::{NewTask, TaskUpdate};
use crate::model::{Task, User};
use crate::session::Session;

/// Requests sent from the UI thread to the network actor.
#[derive(Debug)]
pub enum Action {
    Login {
        email: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
    },
    FetchTasks,
    CreateTask(NewTask),
    UpdateTask {
        id: String,
        update: TaskUpdate,
    },
    DeleteTask(String),
    FetchProfile,
    UpdateProfile {
        username: Option<String>,
        email: Option<String>,
    },
    ChangePassword {
        current_password: String,
        new_password: String,
    },
    Logout,
    Quit,
}

/// Results sent back from the network actor to the UI thread.
#[derive(Debug)]
pub enum AppEvent {
    /// A previously stored session was found on startup.
    SessionLoaded(Session),
    LoggedIn(Session),
    LoggedOut,
    TasksLoaded(Vec<Task>),
    TaskCreated(Task),
    TaskUpdated { id: String, update: TaskUpdate },
    TaskDeleted(String),
    ProfileLoaded(User),
    ProfileUpdated(User),
    PasswordChanged,
    /// The backend rejected the stored token; the session has been cleared.
    SessionExpired,
    Error(String),
    Status(String),
}
