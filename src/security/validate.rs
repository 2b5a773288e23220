use once_cell::sync::Lazy;
use regex::Regex;

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 8;
const RESERVED_USERNAMES: &[&str] = &["admin", "root", "system", "administrator"];

static USERNAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_.-]+$").unwrap());
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap());

pub fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    (USERNAME_MIN..=USERNAME_MAX).contains(&len)
        && USERNAME.is_match(username)
        && !RESERVED_USERNAMES.contains(&username.to_lowercase().as_str())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub fn is_valid_phone(phone: &str) -> bool {
    PHONE.is_match(phone)
}

pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= PASSWORD_MIN
        && password.chars().any(char::is_lowercase)
        && password.chars().any(char::is_uppercase)
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

/// Registration form checks, in the order they are shown to the user.
pub fn registration_errors(
    username: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Vec<&'static str> {
    let mut errors = Vec::new();
    if !is_valid_username(username) {
        errors.push("Username must be 3-50 characters and contain only letters, numbers, and ._-");
    }
    if !is_valid_email(email) {
        errors.push("Invalid email format.");
    }
    if !is_strong_password(password) {
        errors.push(
            "Password must be at least 8 characters with uppercase, lowercase, number and special character.",
        );
    }
    if password != confirm_password {
        errors.push("Passwords do not match.");
    }
    errors
}
