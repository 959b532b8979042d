pub mod security;

pub use security::{hash_password, verify_password};
