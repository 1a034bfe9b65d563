pub mod rate_limit;
pub mod validator;
#[cfg(test)]
mod tests;

pub use rate_limit::RateLimiter;
pub use validator::{sanitize, validate, Validation, ValidationError, MAX_INPUT_CHARS};
