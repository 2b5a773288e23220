pub mod detect;
pub mod guard;
pub mod validate;

pub use detect::{detect_path_traversal, detect_sql_injection, detect_xss, is_suspicious_input};
pub use guard::{AddressStatus, IntrusionGuard, SecurityEvent};
pub use validate::{
    is_strong_password, is_valid_email, is_valid_phone, is_valid_username, registration_errors,
};
