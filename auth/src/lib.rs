//! Authentication utilities library
//!
//! Provides the credential and token building blocks used by the todo service:
//! - Password hashing (Argon2id)
//! - JWT identity claims and HS256 codec
//! - Stateless access/refresh token issuance and verification
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("GoodPass1").unwrap();
//! assert!(hasher.verify("GoodPass1", &hash));
//! assert!(!hasher.verify("BadPass1", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{Claims, IssueOptions, TokenService};
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = Claims::for_user(1, "ada@example.com", "Ada Lovelace");
//!
//! let pair = tokens.issue(claims, IssueOptions::with_refresh()).unwrap();
//! assert_eq!(tokens.verify(&pair.access_token).unwrap(), "1");
//! assert!(pair.refresh_token.is_some());
//! ```

pub mod jwt;
pub mod password;
pub mod tokens;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::JwtHandler;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use tokens::IssueOptions;
pub use tokens::TokenPair;
pub use tokens::TokenService;
