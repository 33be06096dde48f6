// File: ./src/client/endpoints.rs
// The backend's endpoint table, kept in one place.

pub const AUTH_REGISTER: &str = "/api/auth/register";
pub const AUTH_LOGIN: &str = "/api/auth/login";
pub const AUTH_PROFILE: &str = "/api/auth/profile";
pub const AUTH_PASSWORD: &str = "/api/auth/password";
pub const TASKS: &str = "/api/tasks";

pub fn task(id: &str) -> String {
    format!("{}/{}", TASKS, id)
}

/// Joins the configured base URL and an endpoint without producing double
/// or missing slashes, whatever the config author typed.
pub fn join(base_url: &str, endpoint: &str) -> String {
    let base = base_url.strip_suffix('/').unwrap_or(base_url);
    let endpoint = endpoint.strip_prefix('/').unwrap_or(endpoint);
    format!("{}/{}", base, endpoint)
}
