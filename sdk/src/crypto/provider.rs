use {
    super::kdf::DerivedKey,
    crate::error::CryptoError,
    aes_gcm::{
        Aes256Gcm, Nonce,
        aead::{Aead, KeyInit},
    },
    hmac::Hmac,
    rand::{TryRngCore, rngs::OsRng},
    sealpost_protocol::{DIGEST_LENGTH, Iv},
    sha2::{Digest, Sha256},
    tracing::{debug, warn},
};

/// Cryptographic primitives used by the upload pipeline.
///
/// Implementations must be deterministic for `derive_key` and `digest`, and must
/// draw `secure_random_bytes` from a cryptographically secure source.
pub trait CryptoProvider: Send + Sync {
    /// PBKDF2 with HMAC-SHA256, producing `key_len` bytes.
    fn derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        key_len: usize,
    ) -> Result<DerivedKey, CryptoError>;

    fn secure_random_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError>;

    /// AES-GCM encryption; the authentication tag is appended to the returned ciphertext.
    fn aead_encrypt(
        &self,
        key: &DerivedKey,
        iv: &Iv,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    fn aead_decrypt(
        &self,
        key: &DerivedKey,
        iv: &Iv,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// SHA-256.
    fn digest(&self, data: &[u8]) -> [u8; DIGEST_LENGTH];
}

/// Pure-Rust implementation on top of the RustCrypto crates and the OS random generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustCrypto;

impl CryptoProvider for RustCrypto {
    #[inline]
    fn derive_key(
        &self,
        password: &[u8],
        salt: &[u8],
        iterations: u32,
        key_len: usize,
    ) -> Result<DerivedKey, CryptoError> {
        if iterations == 0 || key_len == 0 {
            debug!(iterations, key_len, "rejected key derivation parameters");
            return Err(CryptoError::KeyDerivationFailed);
        }
        let mut key = DerivedKey::zeroed(key_len);
        pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, key.as_mut_bytes()).map_err(
            |err| {
                debug!(%err, "pbkdf2 failed");
                CryptoError::KeyDerivationFailed
            },
        )?;
        Ok(key)
    }

    #[inline]
    fn secure_random_bytes(&self, dest: &mut [u8]) -> Result<(), CryptoError> {
        OsRng.try_fill_bytes(dest).map_err(|err| {
            warn!(%err, "OS random generator failed");
            CryptoError::EncryptionFailed
        })
    }

    #[inline]
    fn aead_encrypt(
        &self,
        key: &DerivedKey,
        iv: &Iv,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let cipher = Aes256Gcm::new_from_slice(key.as_unmasked_bytes()).map_err(|err| {
            debug!(%err, "invalid AES-256 key");
            CryptoError::EncryptionFailed
        })?;
        cipher
            .encrypt(Nonce::from_slice(iv.as_bytes()), plaintext)
            .map_err(|err| {
                debug!(%err, "AES-GCM encryption failed");
                CryptoError::EncryptionFailed
            })
    }

    #[inline]
    fn aead_decrypt(
        &self,
        key: &DerivedKey,
        iv: &Iv,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        let cipher = Aes256Gcm::new_from_slice(key.as_unmasked_bytes()).map_err(|err| {
            debug!(%err, "invalid AES-256 key");
            CryptoError::DecryptionFailed
        })?;
        cipher
            .decrypt(Nonce::from_slice(iv.as_bytes()), ciphertext)
            .map_err(|err| {
                debug!(%err, "AES-GCM authentication failed");
                CryptoError::DecryptionFailed
            })
    }

    #[inline]
    fn digest(&self, data: &[u8]) -> [u8; DIGEST_LENGTH] {
        Sha256::digest(data).into()
    }
}
