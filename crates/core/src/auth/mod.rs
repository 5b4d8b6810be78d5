//! Authentication, session state and route guarding.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - `AppState`, the explicit session state with its hydrate step
//! - The route table and the guard that gates public-only and protected pages

mod password;
pub mod routes;
pub mod state;

pub use password::{PasswordError, hash_password, verify_password};
pub use routes::{Access, Navigation, Route, guard, resolve};
pub use state::{AppState, AuthError, AuthState};
