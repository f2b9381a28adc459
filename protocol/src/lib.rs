//! Wire-level definitions shared by everything that produces or consumes a
//! sealpost upload: the packed encrypted payload, the password digest, the
//! multipart form layout and the client-side limits.

mod digest;
pub mod form;
pub mod limits;
pub mod payload;

pub use crate::{
    digest::{DIGEST_LENGTH, PasswordDigest},
    form::UploadRequest,
    payload::{EncryptedPayload, Iv, Salt},
};
