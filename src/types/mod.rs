//! Type conversion registrations.

pub mod handlers;
pub mod jdbc;

pub use handlers::{RegistrationForm, TypeHandlerBinding, TypeHandlerError, TypeHandlerRegistry};
pub use jdbc::JdbcType;
