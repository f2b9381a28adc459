//! Failure taxonomy of the upload pipeline.
//!
//! Every stage returns either its value or one of these tagged failures, and the
//! orchestrator stops at the first one. Messages are meant for the user and never
//! include details from the cryptographic provider or the HTTP stack; those are
//! logged where the failure is detected.

use {
    sealpost_protocol::limits::ALLOWED_EXTENSIONS,
    thiserror::Error,
};

/// Input rejected before any cryptographic or network work.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("max file upload size is 10MB (file is {size} bytes)")]
    TooLarge { size: u64 },
    #[error(
        "file type `{extension}` not allowed. Allowed types: {}",
        ALLOWED_EXTENSIONS.join(", ")
    )]
    DisallowedExtension { extension: String },
    #[error("please enter value for email")]
    EmptyEmail,
    #[error("please enter valid email")]
    InvalidEmail,
    #[error("file password must be minimum 20 characters")]
    TooShort,
    #[error("file password should have at least 1 uppercase character")]
    NoUppercase,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("failed to derive encryption key")]
    KeyDerivationFailed,
    #[error("failed to encrypt file")]
    EncryptionFailed,
    #[error("failed to decrypt file: wrong password or corrupted data")]
    DecryptionFailed,
}

/// Network failures and non-2xx responses are deliberately not distinguished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("error uploading file")]
    UploadFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("another upload is already in progress")]
    Busy,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}
