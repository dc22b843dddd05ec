//! Security Module
//!
//! Form validation, HTML escaping and response security headers.

pub mod middleware;
pub mod validation;

pub use middleware::security_headers_middleware;
pub use validation::{RequestValidator, ValidationError, ValidationResult, validators};
