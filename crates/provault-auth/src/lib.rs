//! Bearer-token issue/validation and password hashing.
//!
//! The API service is both the sole token issuer and the sole validator,
//! so creation and validation live in one crate.

pub mod password;
pub mod token;
