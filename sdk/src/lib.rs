//! Client-side pipeline that validates a file, encrypts it under a key derived
//! from a passphrase and submits it to an upload endpoint.

pub mod client;
pub mod content;
pub mod crypto;
pub mod error;
pub mod orchestrator;
pub mod validation;

pub use crate::{
    content::SelectedFile,
    crypto::Passphrase,
    error::{CryptoError, SubmitError, TransportError, ValidationError},
    orchestrator::{UploadOrchestrator, UploadState},
};
