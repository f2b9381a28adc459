use {
    super::{
        kdf::{self, KeyLength},
        passphrase::Passphrase,
        provider::{CryptoProvider, RustCrypto},
    },
    crate::error::CryptoError,
    sealpost_protocol::{
        EncryptedPayload, Iv, Salt,
        payload::{IV_LENGTH, SALT_LENGTH},
    },
    std::sync::Arc,
    tokio::task::spawn_blocking,
    tracing::{debug, instrument, warn},
};

/// Encrypts `content` under a key derived from `password`.
///
/// Draws a fresh salt and IV from the provider on every call.
#[inline]
pub fn encrypt_with(
    provider: &dyn CryptoProvider,
    content: &[u8],
    password: &Passphrase,
) -> Result<EncryptedPayload, CryptoError> {
    let mut salt = Salt([0; SALT_LENGTH]);
    provider.secure_random_bytes(&mut salt.0)?;
    let key = kdf::derive(provider, password, &salt, KeyLength::Aes256.bits())?;

    let mut iv = Iv([0; IV_LENGTH]);
    provider.secure_random_bytes(&mut iv.0)?;
    let ciphertext = provider.aead_encrypt(&key, &iv, content)?;
    Ok(EncryptedPayload {
        salt,
        iv,
        ciphertext,
    })
}

/// Parses a packed payload and decrypts it, re-deriving the key from the embedded salt.
///
/// Fails with [`CryptoError::DecryptionFailed`] on a wrong password, tampered data or
/// malformed input.
#[inline]
pub fn decrypt_with(
    provider: &dyn CryptoProvider,
    packed: &[u8],
    password: &Passphrase,
) -> Result<Vec<u8>, CryptoError> {
    let payload = EncryptedPayload::from_bytes(packed).map_err(|err| {
        debug!(%err, "malformed encrypted payload");
        CryptoError::DecryptionFailed
    })?;
    let key = kdf::derive(provider, password, &payload.salt, KeyLength::Aes256.bits())?;
    provider.aead_decrypt(&key, &payload.iv, &payload.ciphertext)
}

/// Runs key derivation and encryption off the async executor.
///
/// Reuse created engine or clone it in order to share the provider.
#[derive(Clone)]
pub struct EncryptionEngine {
    provider: Arc<dyn CryptoProvider>,
}

impl Default for EncryptionEngine {
    #[inline]
    fn default() -> Self {
        Self::new(Arc::new(RustCrypto))
    }
}

impl EncryptionEngine {
    #[must_use]
    #[inline]
    pub fn new(provider: Arc<dyn CryptoProvider>) -> Self {
        Self { provider }
    }

    #[must_use]
    #[inline]
    pub fn provider(&self) -> &dyn CryptoProvider {
        &*self.provider
    }

    /// Takes ownership of the file content so that it is dropped as soon as the
    /// ciphertext exists.
    #[instrument(skip_all, fields(size = content.len()))]
    #[inline]
    pub async fn encrypt(
        &self,
        content: Vec<u8>,
        password: &Passphrase,
    ) -> Result<EncryptedPayload, CryptoError> {
        let provider = Arc::clone(&self.provider);
        let password = password.clone();
        let payload = spawn_blocking(move || encrypt_with(&*provider, &content, &password))
            .await
            .map_err(|err| {
                warn!(%err, "encryption task failed");
                CryptoError::EncryptionFailed
            })??;
        debug!(ciphertext_len = payload.ciphertext.len(), "file encrypted");
        Ok(payload)
    }
}
