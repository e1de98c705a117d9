//! Authentication and authorization module
//!
//! JWT session tokens, bcrypt password hashing, and the admin session
//! extractor used by every admin-only handler.

mod jwt;
mod password;
mod session;

pub use jwt::{create_token, decode_token};
pub use password::{hash_password, verify_password};
pub use session::AdminSession;
