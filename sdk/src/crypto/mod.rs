//! File content is encrypted with AES-256-GCM under a key derived from the user's passphrase.
//!
//! For each file, a random 128-bit salt is chosen and the key is derived with
//! PBKDF2-HMAC-SHA256 (1000 iterations). PBKDF2 receives the salt as text, its byte
//! values in decimal joined with `,` (see [`salt_input`]). A random 96-bit IV is then
//! chosen and the whole file is encrypted in one pass. The salt and IV are not secret and are stored in front
//! of the ciphertext (see [`sealpost_protocol::payload`]), so the passphrase alone is
//! enough to decrypt the file.
//!
//! Integrity of the file content is ensured by the GCM authentication tag; decryption
//! with a wrong passphrase fails instead of returning garbage.
//!
//! Separately, the SHA-256 of the passphrase is sent to the server as a verifier.
//! It plays no part in key derivation.
//!
//! All primitives are reached through [`CryptoProvider`], so the pipeline does not
//! depend on a particular backend. [`RustCrypto`] is the default implementation.

mod cipher;
mod digest;
mod kdf;
mod passphrase;
mod provider;

pub use cipher::{EncryptionEngine, decrypt_with, encrypt_with};
pub use digest::hash_password;
pub use kdf::{DerivedKey, KeyLength, PBKDF2_ITERATIONS, derive, salt_input};
pub use passphrase::Passphrase;
pub use provider::{CryptoProvider, RustCrypto};
