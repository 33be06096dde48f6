// File: ./src/session.rs
// Persists the auth session (bearer token + user blob) between runs.
// This is the terminal analog of the web client's local storage.
use crate::context::AppContext;
use crate::model::User;
use anyhow::Result;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

pub struct SessionStore;

impl SessionStore {
    /// Loads the stored session, if any.
    ///
    /// A missing file means "not logged in". A file that fails to parse is
    /// treated the same way rather than erroring: the worst case is that
    /// the user signs in again.
    pub fn load(ctx: &dyn AppContext) -> Result<Option<Session>> {
        let path = ctx.get_session_file_path()?;
        if !path.exists() {
            return Ok(None);
        }
        Self::with_lock(&path, || {
            let json = fs::read_to_string(&path)?;
            match serde_json::from_str::<Session>(&json) {
                Ok(session) => Ok(Some(session)),
                Err(e) => {
                    log::warn!("Discarding unreadable session file: {}", e);
                    Ok(None)
                }
            }
        })
    }

    pub fn save(ctx: &dyn AppContext, session: &Session) -> Result<()> {
        let path = ctx.get_session_file_path()?;
        Self::with_lock(&path, || {
            let json = serde_json::to_string_pretty(session)?;
            Self::atomic_write(&path, json)?;
            Ok(())
        })
    }

    /// Removes the stored session (logout, or a rejected token).
    pub fn clear(ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_session_file_path()?;
        if path.exists() {
            Self::with_lock(&path, || {
                fs::remove_file(&path)?;
                Ok(())
            })?;
        }
        Ok(())
    }

    fn get_lock_path(file_path: &Path) -> std::path::PathBuf {
        file_path.with_extension("lock")
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;

    fn sample() -> Session {
        Session {
            token: "tok-123".to_string(),
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
    fn missing_file_loads_as_none() {
        let ctx = TestContext::new();
        assert_eq!(SessionStore::load(&ctx).unwrap(), None);
    }

    #[test]
    fn corrupt_file_loads_as_none() {
        let ctx = TestContext::new();
        let path = ctx.get_session_file_path().unwrap();
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(SessionStore::load(&ctx).unwrap(), None);
    }

    #[test]
    fn clear_removes_the_file() {
        let ctx = TestContext::new();
        SessionStore::save(&ctx, &sample()).unwrap();
        assert!(SessionStore::load(&ctx).unwrap().is_some());
        SessionStore::clear(&ctx).unwrap();
        assert_eq!(SessionStore::load(&ctx).unwrap(), None);
        // Clearing twice is fine.
        SessionStore::clear(&ctx).unwrap();
    }
}
