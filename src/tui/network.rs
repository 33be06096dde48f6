// File: ./src/tui/network.rs
// Manages background network operations for the TUI. The actor owns the
// API client and the persisted session; the UI thread only sees events.
use crate::client::{ApiClient, ApiError};
use crate::config::Config;
use crate::context::SharedContext;
use crate::session::{Session, SessionStore};
use crate::tui::action::{Action, AppEvent};
use tokio::sync::mpsc::{Receiver, Sender};

pub async fn run_network_actor(
    ctx: SharedContext,
    config: Config,
    mut action_rx: Receiver<Action>,
    event_tx: Sender<AppEvent>,
) {
    let client = match ApiClient::new(&config.api_url, config.allow_insecure_certs) {
        Ok(c) => c,
        Err(e) => {
            let _ = event_tx.send(AppEvent::Error(e.to_string())).await;
            return;
        }
    };

    let mut token: Option<String> = None;

    // 0. Restore the stored session, then load tasks for a fast start.
    match SessionStore::load(ctx.as_ref()) {
        Ok(Some(session)) => {
            log::info!("Restored session for {}", session.user.username);
            token = Some(session.token.clone());
            let _ = event_tx.send(AppEvent::SessionLoaded(session)).await;
            let _ = event_tx
                .send(AppEvent::Status("Loading your tasks...".to_string()))
                .await;
            fetch_tasks(&ctx, &client, &mut token, &event_tx).await;
        }
        Ok(None) => {}
        Err(e) => log::warn!("Could not read stored session: {}", e),
    }

    // 1. Action loop
    while let Some(action) = action_rx.recv().await {
        match action {
            Action::Quit => break,

            Action::Login { email, password } => {
                match client.login(&email, &password).await {
                    Ok(auth) => {
                        let session = Session {
                            token: auth.token,
                            user: auth.user,
                        };
                        persist_session(&ctx, &session);
                        token = Some(session.token.clone());
                        let _ = event_tx.send(AppEvent::LoggedIn(session)).await;
                        fetch_tasks(&ctx, &client, &mut token, &event_tx).await;
                    }
                    Err(e) => {
                        let _ = event_tx.send(AppEvent::Error(e.to_string())).await;
                    }
                }
            }

            Action::Register {
                username,
                email,
                password,
            } => match client.register(&username, &email, &password).await {
                Ok(auth) => {
                    let session = Session {
                        token: auth.token,
                        user: auth.user,
                    };
                    persist_session(&ctx, &session);
                    token = Some(session.token.clone());
                    let _ = event_tx.send(AppEvent::LoggedIn(session)).await;
                    fetch_tasks(&ctx, &client, &mut token, &event_tx).await;
                }
                Err(e) => {
                    let _ = event_tx.send(AppEvent::Error(e.to_string())).await;
                }
            },

            Action::FetchTasks => {
                if let Some(t) = token.clone() {
                    let _ = event_tx
                        .send(AppEvent::Status("Refreshing...".to_string()))
                        .await;
                    match client.fetch_tasks(&t).await {
                        Ok(tasks) => {
                            let _ = event_tx.send(AppEvent::TasksLoaded(tasks)).await;
                            let _ = event_tx
                                .send(AppEvent::Status("Refreshed.".to_string()))
                                .await;
                        }
                        Err(e) => on_error(&ctx, &mut token, &event_tx, e).await,
                    }
                }
            }

            Action::CreateTask(new_task) => {
                if let Some(t) = token.clone() {
                    match client.create_task(&t, &new_task).await {
                        Ok(task) => {
                            let _ = event_tx.send(AppEvent::TaskCreated(task)).await;
                            let _ = event_tx
                                .send(AppEvent::Status("Task created.".to_string()))
                                .await;
                        }
                        Err(e) => on_error(&ctx, &mut token, &event_tx, e).await,
                    }
                }
            }

            Action::UpdateTask { id, update } => {
                if let Some(t) = token.clone() {
                    match client.update_task(&t, &id, &update).await {
                        Ok(()) => {
                            let _ = event_tx.send(AppEvent::TaskUpdated { id, update }).await;
                        }
                        Err(e) => {
                            on_error(&ctx, &mut token, &event_tx, e).await;
                            // Reload to revert the optimistic change.
                            fetch_tasks(&ctx, &client, &mut token, &event_tx).await;
                        }
                    }
                }
            }

            Action::DeleteTask(id) => {
                if let Some(t) = token.clone() {
                    match client.delete_task(&t, &id).await {
                        Ok(()) => {
                            let _ = event_tx.send(AppEvent::TaskDeleted(id)).await;
                            let _ = event_tx
                                .send(AppEvent::Status("Task deleted.".to_string()))
                                .await;
                        }
                        Err(e) => on_error(&ctx, &mut token, &event_tx, e).await,
                    }
                }
            }

            Action::FetchProfile => {
                if let Some(t) = token.clone() {
                    match client.fetch_profile(&t).await {
                        Ok(user) => {
                            let _ = event_tx.send(AppEvent::ProfileLoaded(user)).await;
                        }
                        Err(e) => on_error(&ctx, &mut token, &event_tx, e).await,
                    }
                }
            }

            Action::UpdateProfile { username, email } => {
                if let Some(t) = token.clone() {
                    match client
                        .update_profile(&t, username.as_deref(), email.as_deref())
                        .await
                    {
                        Ok(user) => {
                            // Keep the stored user blob in sync.
                            if let Ok(Some(mut session)) = SessionStore::load(ctx.as_ref()) {
                                session.user = user.clone();
                                persist_session(&ctx, &session);
                            }
                            let _ = event_tx.send(AppEvent::ProfileUpdated(user)).await;
                        }
                        Err(e) => on_error(&ctx, &mut token, &event_tx, e).await,
                    }
                }
            }

            Action::ChangePassword {
                current_password,
                new_password,
            } => {
                if let Some(t) = token.clone() {
                    match client
                        .change_password(&t, &current_password, &new_password)
                        .await
                    {
                        Ok(()) => {
                            let _ = event_tx.send(AppEvent::PasswordChanged).await;
                        }
                        Err(e) => on_error(&ctx, &mut token, &event_tx, e).await,
                    }
                }
            }

            Action::Logout => {
                if let Err(e) = SessionStore::clear(ctx.as_ref()) {
                    log::warn!("Could not clear session: {}", e);
                }
                token = None;
                let _ = event_tx.send(AppEvent::LoggedOut).await;
            }
        }
    }
}

fn persist_session(ctx: &SharedContext, session: &Session) {
    if let Err(e) = SessionStore::save(ctx.as_ref(), session) {
        log::warn!("Could not persist session: {}", e);
    }
}

async fn fetch_tasks(
    ctx: &SharedContext,
    client: &ApiClient,
    token: &mut Option<String>,
    event_tx: &Sender<AppEvent>,
) {
    let Some(t) = token.clone() else { return };
    match client.fetch_tasks(&t).await {
        Ok(tasks) => {
            let _ = event_tx.send(AppEvent::TasksLoaded(tasks)).await;
            let _ = event_tx.send(AppEvent::Status("Ready.".to_string())).await;
        }
        Err(e) => on_error(ctx, token, event_tx, e).await,
    }
}

/// A rejected token invalidates the whole session; anything else is shown
/// in the status line.
async fn on_error(
    ctx: &SharedContext,
    token: &mut Option<String>,
    event_tx: &Sender<AppEvent>,
    err: ApiError,
) {
    match err {
        ApiError::Unauthorized => {
            log::info!("Token rejected by backend, clearing session");
            if let Err(e) = SessionStore::clear(ctx.as_ref()) {
                log::warn!("Could not clear session: {}", e);
            }
            *token = None;
            let _ = event_tx.send(AppEvent::SessionExpired).await;
        }
        e => {
            log::warn!("API error: {}", e);
            let _ = event_tx.send(AppEvent::Error(e.to_string())).await;
        }
    }
}
