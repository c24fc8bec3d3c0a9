use getrandom::fill;
use hmac::Hmac;
use pbkdf2::pbkdf2;
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use super::{DEFAULT_ITERATIONS, DEFAULT_OUTPUT_LEN, DEFAULT_SALT_SIZE};
use crate::error::HashError;
use crate::format::{DEFAULT_SEPARATOR, is_base64_char};

/// PRF used inside the PBKDF2 derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    Sha256,
    #[default]
    Sha384,
    Sha512,
}

/// Derivation and serialization parameters for a hashed secret.
///
/// Always validated at construction, so a `Params` value in hand is
/// usable as-is. The defaults match the reference behavior: 32-byte
/// salt and digest, 2920 iterations, SHA-384, `|` separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Params {
    salt_size: usize,
    output_len: usize,
    iterations: u32,
    algorithm: Algorithm,
    separator: char,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            salt_size: DEFAULT_SALT_SIZE,
            output_len: DEFAULT_OUTPUT_LEN,
            iterations: DEFAULT_ITERATIONS,
            algorithm: Algorithm::default(),
            separator: DEFAULT_SEPARATOR,
        }
    }
}

impl Params {
    pub fn new(
        salt_size: usize,
        output_len: usize,
        iterations: u32,
        algorithm: Algorithm,
    ) -> Result<Self, HashError> {
        let params = Self {
            salt_size,
            output_len,
            iterations,
            algorithm,
            separator: DEFAULT_SEPARATOR,
        };
        params.validate()?;
        Ok(params)
    }

    /// Replaces the separator used by the serialized text form.
    ///
    /// Fails if the character can occur in standard base64 output,
    /// since splitting on it would be ambiguous.
    pub fn with_separator(mut self, separator: char) -> Result<Self, HashError> {
        self.separator = separator;
        self.validate()?;
        Ok(self)
    }

    pub fn salt_size(&self) -> usize {
        self.salt_size
    }

    pub fn output_len(&self) -> usize {
        self.output_len
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn separator(&self) -> char {
        self.separator
    }

    pub fn validate(&self) -> Result<(), HashError> {
        if self.salt_size < 1 {
            return Err(HashError::InvalidParameter("salt size must be >= 1"));
        }
        if self.output_len < 1 {
            return Err(HashError::InvalidParameter("output length must be >= 1"));
        }
        if self.iterations < 1 {
            return Err(HashError::InvalidParameter("iterations must be >= 1"));
        }
        if is_base64_char(self.separator) {
            return Err(HashError::InvalidParameter(
                "separator must not be a base64 alphabet character",
            ));
        }
        Ok(())
    }
}

/// Fill buffer with cryptographically secure random bytes
fn secure_random(buf: &mut [u8]) -> Result<(), HashError> {
    fill(buf).map_err(|_| HashError::RandomUnavailable)
}

/// Generate a fresh random salt of `len` bytes.
pub fn generate_salt(len: usize) -> Result<Vec<u8>, HashError> {
    let mut salt = vec![0u8; len];
    secure_random(&mut salt)?;
    Ok(salt)
}

/// Derive exactly `params.output_len()` digest bytes from `origin` and `salt`.
///
/// Deterministic for fixed inputs; the digest buffer is zeroed on drop.
pub fn derive(origin: &str, salt: &[u8], params: &Params) -> Result<Zeroizing<Vec<u8>>, HashError> {
    params.validate()?;

    let mut digest = Zeroizing::new(vec![0u8; params.output_len()]);

    let derived = match params.algorithm() {
        Algorithm::Sha256 => pbkdf2::<Hmac<Sha256>>(
            origin.as_bytes(),
            salt,
            params.iterations(),
            &mut digest,
        ),
        Algorithm::Sha384 => pbkdf2::<Hmac<Sha384>>(
            origin.as_bytes(),
            salt,
            params.iterations(),
            &mut digest,
        ),
        Algorithm::Sha512 => pbkdf2::<Hmac<Sha512>>(
            origin.as_bytes(),
            salt,
            params.iterations(),
            &mut digest,
        ),
    };

    derived.map_err(|_| HashError::InvalidParameter("output length too large for PBKDF2"))?;

    Ok(digest)
}

/// Derive with a freshly generated salt, returning (digest, salt).
pub fn derive_fresh(origin: &str, params: &Params) -> Result<(Zeroizing<Vec<u8>>, Vec<u8>), HashError> {
    params.validate()?;

    let salt = generate_salt(params.salt_size())?;
    let digest = derive(origin, &salt, params)?;

    Ok((digest, salt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivation_is_deterministic() {
        let salt = [42u8; 32];
        let params = Params::default();

        let d1 = derive("password", &salt, &params).unwrap();
        let d2 = derive("password", &salt, &params).unwrap();

        assert_eq!(*d1, *d2);
        assert_eq!(d1.len(), params.output_len());
    }

    #[test]
    fn salt_affects_output() {
        let params = Params::default();

        let d1 = derive("password", &[1u8; 32], &params).unwrap();
        let d2 = derive("password", &[2u8; 32], &params).unwrap();

        assert_ne!(*d1, *d2);
    }

    #[test]
    fn algorithm_affects_output() {
        let salt = [7u8; 32];

        let p256 = Params::new(32, 32, 1000, Algorithm::Sha256).unwrap();
        let p512 = Params::new(32, 32, 1000, Algorithm::Sha512).unwrap();

        let d1 = derive("pw", &salt, &p256).unwrap();
        let d2 = derive("pw", &salt, &p512).unwrap();

        assert_ne!(*d1, *d2);
    }

    #[test]
    fn iterations_affect_output() {
        let salt = [7u8; 32];

        let p1 = Params::new(32, 32, 1000, Algorithm::Sha384).unwrap();
        let p2 = Params::new(32, 32, 2000, Algorithm::Sha384).unwrap();

        let d1 = derive("pw", &salt, &p1).unwrap();
        let d2 = derive("pw", &salt, &p2).unwrap();

        assert_ne!(*d1, *d2);
    }

    #[test]
    fn output_length_is_respected() {
        let salt = [0u8; 32];
        let params = Params::new(32, 48, 100, Algorithm::Sha384).unwrap();

        let digest = derive("pw", &salt, &params).unwrap();

        assert_eq!(digest.len(), 48);
    }

    #[test]
    fn empty_origin_is_allowed() {
        let salt = [9u8; 32];

        assert!(derive("", &salt, &Params::default()).is_ok());
    }

    #[test]
    fn invalid_params_fail_without_clamping() {
        assert!(Params::new(0, 32, 2920, Algorithm::Sha384).is_err());
        assert!(Params::new(32, 0, 2920, Algorithm::Sha384).is_err());
        assert!(Params::new(32, 32, 0, Algorithm::Sha384).is_err());
    }

    #[test]
    fn base64_separator_is_rejected() {
        assert!(Params::default().with_separator('A').is_err());
        assert!(Params::default().with_separator('+').is_err());
        assert!(Params::default().with_separator('=').is_err());
        assert!(Params::default().with_separator(':').is_ok());
    }

    #[test]
    fn generated_salts_differ() {
        let s1 = generate_salt(32).unwrap();
        let s2 = generate_salt(32).unwrap();

        assert_eq!(s1.len(), 32);
        assert_ne!(s1, s2);
    }
}
