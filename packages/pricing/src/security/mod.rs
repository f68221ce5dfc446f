//! Credential handling.

mod credentials;

pub use credentials::{mask_key, SecretString};
