//! # tdah-auth
//!
//! Identity and role resolution for SMART-TDAH.
//!
//! - [`bearer`]: `Authorization` header parsing
//! - [`claims`]: legacy claim aliases, normalized into one `Principal`
//! - [`token`]: HS256 issuing and verification (`TokenService`)
//! - [`password`]: Argon2 hashing
//!
//! # Example
//!
//! ```
//! use tdah_auth::TokenService;
//! use tdah_core::entities::Principal;
//! use tdah_core::enums::Role;
//!
//! let tokens = TokenService::new("secret", 3600);
//! let token = tokens.issue(&Principal { id: 1, role: Role::Teacher }).unwrap();
//! let principal = tokens.resolve(Some(&format!("Bearer {token}"))).unwrap();
//! assert_eq!(principal.id, 1);
//! ```

pub mod bearer;
pub mod claims;
pub mod error;
pub mod password;
pub mod token;

pub use error::AuthError;
pub use token::{TokenService, require_admin};
