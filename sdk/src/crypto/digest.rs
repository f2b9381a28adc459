use {
    super::{passphrase::Passphrase, provider::CryptoProvider},
    sealpost_protocol::PasswordDigest,
};

/// SHA-256 of the UTF-8 passphrase.
///
/// The result is a verifier for the server only; the encryption key is always
/// derived from the raw passphrase.
#[must_use]
#[inline]
pub fn hash_password(provider: &dyn CryptoProvider, password: &Passphrase) -> PasswordDigest {
    PasswordDigest::from_bytes(provider.digest(password.as_unmasked_str().as_bytes()))
}
