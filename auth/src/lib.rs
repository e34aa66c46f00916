//! Authentication primitives library
//!
//! Provides the two cryptographic building blocks of the identity service:
//! - Password hashing (Argon2id)
//! - Signed, time-bound bearer tokens
//!
//! The service defines its own authentication flow on top of these
//! implementations. Keeping the primitives free of domain types lets other
//! services reuse them without sharing domain logic.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.matches("my_password", &digest).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenCodec;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!", 60_000);
//! let token = codec.mint("alice").unwrap();
//! assert!(codec.verify(&token));
//! assert_eq!(codec.extract_subject(&token).unwrap(), "alice");
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenCodec;
pub use token::TokenError;
