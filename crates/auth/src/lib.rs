//! Authentication: password hashing, bearer tokens, and the service tying
//! them to the user store.

pub mod error;
pub mod password;
pub mod service;
pub mod store;
pub mod token;
pub mod user;

pub use error::{AuthError, AuthResult};
pub use service::{AuthResponse, AuthService};
pub use token::{Claims, TokenService};
pub use user::{PublicUser, User};
