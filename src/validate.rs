// File: ./src/validate.rs
// Client-side form validation. Checks mirror what the backend enforces so
// obviously-bad submissions never leave the client.

/// A validation failure attached to a named form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Cheap shape check: one '@', a non-empty local part, a dot in the domain.
pub fn is_valid_email(s: &str) -> bool {
    let s = s.trim();
    if s.contains(char::is_whitespace) {
        return false;
    }
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && domain.contains('.')
        }
        None => false,
    }
}

pub fn validate_login(email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if password.len() < 6 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 6 characters",
        ));
    }
    errors
}

pub fn validate_register(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if username.chars().count() < 3 {
        errors.push(FieldError::new(
            "username",
            "Username must be at least 3 characters",
        ));
    } else if username.chars().count() > 20 {
        errors.push(FieldError::new(
            "username",
            "Username must be less than 20 characters",
        ));
    }
    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    if password.len() < 8 {
        errors.push(FieldError::new(
            "password",
            "Password must be at least 8 characters",
        ));
    }
    if password != confirm_password {
        errors.push(FieldError::new("confirm_password", "Passwords don't match"));
    }
    errors
}

/// Both fields are optional, but an empty submission is rejected.
pub fn validate_profile_update(username: &str, email: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if username.is_empty() && email.is_empty() {
        errors.push(FieldError::new(
            "username",
            "At least one field must be provided",
        ));
        return errors;
    }
    if !username.is_empty() {
        if username.chars().count() < 3 {
            errors.push(FieldError::new(
                "username",
                "Username must be at least 3 characters",
            ));
        } else if username.chars().count() > 20 {
            errors.push(FieldError::new(
                "username",
                "Username must be at most 20 characters",
            ));
        }
    }
    if !email.is_empty() && !is_valid_email(email) {
        errors.push(FieldError::new("email", "Invalid email address"));
    }
    errors
}

pub fn validate_password_change(
    current_password: &str,
    new_password: &str,
    confirm_password: &str,
) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if current_password.is_empty() {
        errors.push(FieldError::new(
            "current_password",
            "Current password is required",
        ));
    }
    if new_password.len() < 8 {
        errors.push(FieldError::new(
            "new_password",
            "New password must be at least 8 characters",
        ));
    }
    if confirm_password.len() < 8 {
        errors.push(FieldError::new(
            "confirm_password",
            "Please confirm your password",
        ));
    } else if new_password != confirm_password {
        errors.push(FieldError::new("confirm_password", "Passwords do not match"));
    }
    errors
}

/// The create-task form only requires a non-blank title.
pub fn validate_task_title(title: &str) -> Vec<FieldError> {
    if title.trim().is_empty() {
        vec![FieldError::new("title", "Title is required")]
    } else {
        Vec::new()
    }
}
