//! Packed form of an encrypted file.
//!
//! The encrypted file is sent as a single blob with the following layout:
//!
//! - salt (128 bits) - random salt used to derive the key from the passphrase
//! - IV (96 bits) - random AES-GCM nonce
//! - ciphertext followed by the 128-bit authentication tag
//!
//! There is no version byte or length prefix; the receiver splits the blob at fixed offsets.

use {
    anyhow::{Result, ensure, format_err},
    cadd::ops::Cadd,
    derivative::Derivative,
    derive_more::{From, Into},
    std::fmt,
};

pub const SALT_LENGTH: usize = 16;
pub const IV_LENGTH: usize = 12;
pub const TAG_LENGTH: usize = 16;
/// Length of the salt and IV that precede the ciphertext.
pub const HEADER_LENGTH: usize = SALT_LENGTH + IV_LENGTH;

/// Random salt mixed into key derivation. Must never be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From, Into)]
pub struct Salt(pub [u8; SALT_LENGTH]);

impl Salt {
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SALT_LENGTH] {
        &self.0
    }
}

/// Random AES-GCM nonce. Must never be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, From, Into)]
pub struct Iv(pub [u8; IV_LENGTH]);

impl Iv {
    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8; IV_LENGTH] {
        &self.0
    }
}

#[expect(clippy::ptr_arg, reason = "signature required by derivative")]
fn fmt_len(value: &Vec<u8>, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "<{} bytes>", value.len())
}

#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct EncryptedPayload {
    pub salt: Salt,
    pub iv: Iv,
    /// Ciphertext with the authentication tag appended.
    #[derivative(Debug(format_with = "fmt_len"))]
    pub ciphertext: Vec<u8>,
}

/// Length of the packed payload produced for a plaintext of `plaintext_len` bytes.
#[inline]
pub fn packed_length(plaintext_len: usize) -> Result<usize> {
    Ok(plaintext_len.cadd(HEADER_LENGTH)?.cadd(TAG_LENGTH)?)
}

impl EncryptedPayload {
    #[inline]
    pub fn packed_len(&self) -> Result<usize> {
        Ok(self.ciphertext.len().cadd(HEADER_LENGTH)?)
    }

    /// Serializes into `[salt][iv][ciphertext || tag]`.
    #[inline]
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut out = Vec::with_capacity(self.packed_len()?);
        out.extend_from_slice(self.salt.as_bytes());
        out.extend_from_slice(self.iv.as_bytes());
        out.extend_from_slice(&self.ciphertext);
        Ok(out)
    }

    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (salt, rest) = bytes
            .split_first_chunk::<SALT_LENGTH>()
            .ok_or_else(|| format_err!("payload too short for salt: {} bytes", bytes.len()))?;
        let (iv, ciphertext) = rest
            .split_first_chunk::<IV_LENGTH>()
            .ok_or_else(|| format_err!("payload too short for IV: {} bytes", bytes.len()))?;
        ensure!(
            ciphertext.len() >= TAG_LENGTH,
            "payload too short for authentication tag: {} bytes",
            bytes.len(),
        );
        Ok(Self {
            salt: Salt(*salt),
            iv: Iv(*iv),
            ciphertext: ciphertext.to_vec(),
        })
    }
}
