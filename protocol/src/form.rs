//! Multipart form of an upload request.

use {
    crate::{EncryptedPayload, PasswordDigest},
    derivative::Derivative,
};

pub const ENCRYPTED_FILE_FIELD: &str = "encryptedFile";
pub const ORIGINAL_NAME_FIELD: &str = "originalName";
pub const RECEIVER_EMAIL_FIELD: &str = "receiverEmail";
/// Carries the hex password digest, never the passphrase itself.
pub const PASSWORD_FIELD: &str = "password";

/// File name attached to the encrypted part.
pub const ENCRYPTED_FILE_NAME: &str = "blob";
pub const ENCRYPTED_FILE_MIME: &str = "application/octet-stream";

/// Everything sent to the upload endpoint for one file. Built once and sent once.
#[derive(Derivative, Clone)]
#[derivative(Debug)]
pub struct UploadRequest {
    pub encrypted_payload: EncryptedPayload,
    pub original_name: String,
    pub receiver_email: String,
    #[derivative(Debug = "ignore")]
    pub password_digest: PasswordDigest,
}
