// File: src/client/core.rs
// JSON REST client for the TaskFlow backend. Authenticated calls carry the
// session's bearer token; error bodies surface their `message` string.
use crate::client::{ApiError, endpoints};
use crate::model::{Priority, Recurrence, Task, TaskStatus, User};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Deserialize)]
struct ProfileResponse {
    user: User,
}

#[derive(Debug, Clone, Deserialize)]
struct TasksResponse {
    #[serde(default)]
    tasks: Vec<Task>,
}

#[derive(Debug, Clone, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Payload for POST /api/tasks.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub recurrence: Recurrence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTask {
    /// Backend defaults match the web client: pending, medium, none.
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            description: String::new(),
            status: TaskStatus::Pending,
            priority: Priority::Medium,
            recurrence: Recurrence::None,
            due_date: None,
        }
    }
}

/// Partial update for PUT /api/tasks/{id}. Unset fields are left alone.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl TaskUpdate {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, allow_insecure: bool) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if allow_insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    fn url(&self, endpoint: &str) -> String {
        endpoints::join(&self.base_url, endpoint)
    }

    // --- AUTH ---

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let resp = self
            .http
            .post(self.url(endpoints::AUTH_LOGIN))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp, "Login failed", false).await);
        }
        resp.json::<AuthResponse>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        let body = serde_json::json!({
            "username": username,
            "email": email,
            "password": password,
        });
        let resp = self
            .http
            .post(self.url(endpoints::AUTH_REGISTER))
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp, "Registration failed", false).await);
        }
        resp.json::<AuthResponse>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    pub async fn fetch_profile(&self, token: &str) -> Result<User, ApiError> {
        let resp = self
            .http
            .get(self.url(endpoints::AUTH_PROFILE))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp, "Failed to load profile", true).await);
        }
        let profile = resp
            .json::<ProfileResponse>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(profile.user)
    }

    pub async fn update_profile(
        &self,
        token: &str,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<User, ApiError> {
        let mut body = serde_json::Map::new();
        if let Some(u) = username {
            body.insert("username".to_string(), serde_json::json!(u));
        }
        if let Some(e) = email {
            body.insert("email".to_string(), serde_json::json!(e));
        }

        let resp = self
            .http
            .put(self.url(endpoints::AUTH_PROFILE))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp, "Failed to update profile", true).await);
        }
        let profile = resp
            .json::<ProfileResponse>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(profile.user)
    }

    pub async fn change_password(
        &self,
        token: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), ApiError> {
        let body = serde_json::json!({
            "currentPassword": current_password,
            "newPassword": new_password,
        });
        let resp = self
            .http
            .put(self.url(endpoints::AUTH_PASSWORD))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp, "Failed to change password", true).await);
        }
        Ok(())
    }

    // --- TASKS ---

    pub async fn fetch_tasks(&self, token: &str) -> Result<Vec<Task>, ApiError> {
        let resp = self
            .http
            .get(self.url(endpoints::TASKS))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp, "Failed to fetch tasks", true).await);
        }
        let data = resp
            .json::<TasksResponse>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(data.tasks)
    }

    pub async fn create_task(&self, token: &str, new_task: &NewTask) -> Result<Task, ApiError> {
        let resp = self
            .http
            .post(self.url(endpoints::TASKS))
            .bearer_auth(token)
            .json(new_task)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp, "Failed to create task", true).await);
        }
        resp.json::<Task>()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    pub async fn update_task(
        &self,
        token: &str,
        id: &str,
        update: &TaskUpdate,
    ) -> Result<(), ApiError> {
        let resp = self
            .http
            .put(self.url(&endpoints::task(id)))
            .bearer_auth(token)
            .json(update)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp, "Failed to update task", true).await);
        }
        Ok(())
    }

    pub async fn delete_task(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let resp = self
            .http
            .delete(self.url(&endpoints::task(id)))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(Self::error_from(resp, "Failed to delete task", true).await);
        }
        Ok(())
    }

    // --- ERROR MAPPING ---

    /// Converts a non-2xx response into an `ApiError`. On authenticated
    /// endpoints a 401 means the token was rejected; on login/register a
    /// 401 is an ordinary "wrong credentials" message.
    async fn error_from(resp: reqwest::Response, fallback: &str, authed: bool) -> ApiError {
        let status = resp.status();
        if authed && status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }
        let message = resp
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|b| b.message)
            .unwrap_or_else(|| fallback.to_string());
        ApiError::Api(message)
    }
}
