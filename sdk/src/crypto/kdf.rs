use {
    super::{passphrase::Passphrase, provider::CryptoProvider},
    crate::error::CryptoError,
    sealpost_protocol::Salt,
    std::fmt::{self, Debug},
    tracing::debug,
    zeroize::{Zeroize, ZeroizeOnDrop},
};

pub const PBKDF2_ITERATIONS: u32 = 1000;

/// AES key sizes the key derivation can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyLength {
    Aes128,
    Aes192,
    #[default]
    Aes256,
}

impl KeyLength {
    #[must_use]
    #[inline]
    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            128 => Some(Self::Aes128),
            192 => Some(Self::Aes192),
            256 => Some(Self::Aes256),
            _ => None,
        }
    }

    #[must_use]
    #[inline]
    pub fn bits(self) -> u32 {
        match self {
            Self::Aes128 => 128,
            Self::Aes192 => 192,
            Self::Aes256 => 256,
        }
    }

    #[must_use]
    #[inline]
    pub fn bytes(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }
}

/// Key material derived from a passphrase.
///
/// Exists only inside one encryption or decryption call and is wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey(Vec<u8>);

impl DerivedKey {
    #[must_use]
    #[inline]
    pub fn zeroed(len: usize) -> Self {
        Self(vec![0; len])
    }

    #[must_use]
    #[inline]
    pub fn as_unmasked_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn as_mut_bytes(&mut self) -> &mut [u8] {
        &mut self.0
    }

    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for DerivedKey {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedKey")
            .field("len", &self.0.len())
            .finish_non_exhaustive()
    }
}

/// PBKDF2 salt input for `salt`: its byte values in decimal, joined with `,`.
///
/// Payloads produced by the web client are keyed this way, so the textual form is
/// part of the format. The packed payload still carries the raw 16 bytes.
#[must_use]
#[inline]
pub fn salt_input(salt: &Salt) -> String {
    salt.as_bytes()
        .iter()
        .map(u8::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Derives an AES key of `key_length_bits` from `password` and `salt` using
/// PBKDF2-HMAC-SHA256 with [`PBKDF2_ITERATIONS`] rounds over [`salt_input`].
///
/// The same inputs always produce the same key.
#[inline]
pub fn derive(
    provider: &dyn CryptoProvider,
    password: &Passphrase,
    salt: &Salt,
    key_length_bits: u32,
) -> Result<DerivedKey, CryptoError> {
    let Some(key_length) = KeyLength::from_bits(key_length_bits) else {
        debug!(key_length_bits, "unsupported AES key length");
        return Err(CryptoError::KeyDerivationFailed);
    };
    provider.derive_key(
        password.as_unmasked_str().as_bytes(),
        salt_input(salt).as_bytes(),
        PBKDF2_ITERATIONS,
        key_length.bytes(),
    )
}
