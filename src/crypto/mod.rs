//! Cryptographic derivation for hashed secrets.
//!
//! Provides the PBKDF2 engine, parameter validation, and salt generation.

pub mod kdf;

pub use kdf::{Algorithm, Params, derive, derive_fresh, generate_salt};

/// Default salt length in bytes.
pub const DEFAULT_SALT_SIZE: usize = 32;
/// Default digest length in bytes.
pub const DEFAULT_OUTPUT_LEN: usize = 32;
/// Default PBKDF2 iteration count.
pub const DEFAULT_ITERATIONS: u32 = 2920;
