//! Salted, iterated hash values for storing and verifying secrets.
//!
//! [`HashedSecret`] derives a PBKDF2 digest from a plaintext and a fresh
//! random salt, serializes the pair as `base64(digest)|base64(salt)` for
//! persistence (e.g. a database column), and verifies candidate
//! plaintexts against the stored value without ever keeping the
//! original input.
//!
//! ```
//! use credhash::HashedSecret;
//!
//! let stored = HashedSecret::new("hunter2").unwrap();
//! let column = stored.to_text();
//!
//! let restored = HashedSecret::parse(&column).unwrap();
//! assert!(restored.verify("hunter2"));
//! assert!(!restored.verify("hunter3"));
//! ```
//!
//! The serialized form carries no algorithm or iteration metadata:
//! verification parameters are an external contract, and a caller that
//! created a value with non-default [`Params`] must supply the same
//! parameters when parsing it back.

pub mod crypto;
pub mod error;
pub mod format;

pub use crate::crypto::{
    Algorithm, DEFAULT_ITERATIONS, DEFAULT_OUTPUT_LEN, DEFAULT_SALT_SIZE, Params,
};
pub use crate::error::{HashError, ParseError};
pub use crate::format::DEFAULT_SEPARATOR;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use subtle::ConstantTimeEq;

use crate::crypto::kdf;

/// A salted, iterated hash of a secret, safe to persist as text.
///
/// Immutable once constructed; cloning produces an independent copy of
/// the digest and salt buffers. Values are freely shareable across
/// threads since nothing is ever mutated after construction.
#[derive(Debug, Clone)]
pub struct HashedSecret {
    digest: Vec<u8>,
    salt: Vec<u8>,
    params: Params,
}

impl HashedSecret {
    /// Hashes `origin` with default parameters and a fresh random salt.
    pub fn new(origin: &str) -> Result<Self, HashError> {
        Self::with_params(origin, Params::default())
    }

    /// Hashes `origin` with the given parameters and a fresh random salt.
    pub fn with_params(origin: &str, params: Params) -> Result<Self, HashError> {
        let (digest, salt) = kdf::derive_fresh(origin, &params)?;

        Ok(Self {
            digest: digest.to_vec(),
            salt,
            params,
        })
    }

    /// Reconstructs a value from its serialized text form, assuming
    /// default parameters.
    ///
    /// Digest and salt are taken verbatim from the text. The minimal
    /// format embeds no derivation metadata, so a value created with
    /// non-default parameters must be parsed with [`Self::parse_with`]
    /// or verification will fail.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_with(text, Params::default())
    }

    /// Reconstructs a value from its serialized text form, adopting
    /// `params` as the parameters in effect at creation time.
    pub fn parse_with(text: &str, params: Params) -> Result<Self, ParseError> {
        let (digest, salt) = format::decode(text, params.separator())?;

        Ok(Self {
            digest,
            salt,
            params,
        })
    }

    /// Serializes the value as `base64(digest)<sep>base64(salt)`.
    pub fn to_text(&self) -> String {
        format::encode(&self.digest, &self.salt, self.params.separator())
    }

    /// Checks whether `candidate` is the secret this value was derived
    /// from, by re-deriving with the stored salt and parameters.
    ///
    /// The digest comparison is constant-time. A mismatch is a normal
    /// `false`, never an error; use this, not equality, to check a
    /// user-supplied secret against a persisted value.
    pub fn verify(&self, candidate: &str) -> bool {
        let Ok(digest) = kdf::derive(candidate, &self.salt, &self.params) else {
            return false;
        };

        digest.as_slice().ct_eq(self.digest.as_slice()).into()
    }

    /// Parses `stored` and verifies `candidate` against it, assuming
    /// default parameters. Malformed stored text is `false`, never an
    /// error, so "wrong password" and "corrupt column" are
    /// indistinguishable to the caller.
    pub fn verify_text(stored: &str, candidate: &str) -> bool {
        Self::verify_text_with(stored, candidate, Params::default())
    }

    /// Parses `stored` with `params` and verifies `candidate` against it.
    pub fn verify_text_with(stored: &str, candidate: &str, params: Params) -> bool {
        match Self::parse_with(stored, params) {
            Ok(secret) => secret.verify(candidate),
            Err(_) => false,
        }
    }

    /// True if `text` deserializes to this exact stored value (same
    /// digest and salt bytes). This is identity of the persisted value,
    /// not a plaintext check; see [`Self::verify`] for that.
    pub fn same_as_text(&self, text: &str) -> bool {
        match Self::parse_with(text, self.params) {
            Ok(other) => *self == other,
            Err(_) => false,
        }
    }

    /// The derived digest bytes.
    pub fn digest(&self) -> &[u8] {
        &self.digest
    }

    /// The random salt generated at creation.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    /// The parameters this instance re-derives with during [`Self::verify`].
    pub fn params(&self) -> &Params {
        &self.params
    }
}

/// Equality is identity of the stored value: digest and salt bytes only,
/// parameters excluded. Two derivations of the same plaintext are never
/// equal because their random salts differ.
impl PartialEq for HashedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest && self.salt == other.salt
    }
}

impl Eq for HashedSecret {}

impl Hash for HashedSecret {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.digest.hash(state);
        self.salt.hash(state);
    }
}

/// Hashed secrets have no natural order. This is an equivalence check
/// exposed through the comparison interface: two values are either the
/// same stored credential (`Some(Equal)`) or incomparable (`None`).
/// Never use it to sort by strength or recency.
impl PartialOrd for HashedSecret {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self == other {
            Some(Ordering::Equal)
        } else {
            None
        }
    }
}

impl fmt::Display for HashedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl FromStr for HashedSecret {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
