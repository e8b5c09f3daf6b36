//! Cryptographic utilities for Gatekeep Core

pub mod password;

pub use password::{hash_secret, verify_secret, PasswordDeriver};
