use {
    crate::error::TransportError,
    anyhow::Result,
    reqwest::multipart::{Form, Part},
    sealpost_protocol::{
        UploadRequest,
        form::{
            ENCRYPTED_FILE_FIELD, ENCRYPTED_FILE_MIME, ENCRYPTED_FILE_NAME, ORIGINAL_NAME_FIELD,
            PASSWORD_FIELD, RECEIVER_EMAIL_FIELD,
        },
    },
    std::{future::Future, time::Duration},
    tracing::{info, instrument, warn},
    url::Url,
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[must_use]
#[inline]
pub fn upload_timeout(base: Duration, upload_size: u64) -> Duration {
    // Assuming upload speed above 1 MB/s.
    base.saturating_add(Duration::from_micros(upload_size))
}

/// Delivers an assembled upload request to the remote service.
///
/// Called at most once per submission; implementations must not retry.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: UploadRequest,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// Reuse created client or clone it in order to reuse a connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    reqwest: reqwest::Client,
    upload_url: Url,
    timeout: Duration,
}

impl Client {
    #[inline]
    pub fn new(upload_url: Url) -> Result<Self> {
        Self::with_timeout(upload_url, DEFAULT_TIMEOUT)
    }

    /// `timeout` bounds connecting and, extended by the payload size, the whole upload.
    #[inline]
    pub fn with_timeout(upload_url: Url, timeout: Duration) -> Result<Self> {
        Ok(Self {
            upload_url,
            timeout,
            reqwest: reqwest::Client::builder().connect_timeout(timeout).build()?,
        })
    }

    #[must_use]
    #[inline]
    pub fn upload_url(&self) -> &Url {
        &self.upload_url
    }

    /// Sends the request as a single multipart POST. Any 2xx status is success.
    #[instrument(skip_all, fields(name = %request.original_name))]
    #[inline(never)]
    pub async fn upload(&self, request: UploadRequest) -> Result<(), TransportError> {
        let (form, size) = build_form(request).map_err(|err| {
            warn!(error = %err, "failed to build upload form");
            TransportError::UploadFailed
        })?;
        let response = self
            .reqwest
            .post(self.upload_url.clone())
            .timeout(upload_timeout(self.timeout, size))
            .multipart(form)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "upload request failed");
                TransportError::UploadFailed
            })?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "server rejected upload");
            return Err(TransportError::UploadFailed);
        }
        info!(%status, size, "upload accepted");
        Ok(())
    }
}

impl Transport for Client {
    #[inline]
    async fn send(&self, request: UploadRequest) -> Result<(), TransportError> {
        self.upload(request).await
    }
}

/// Returns the form and the size of the encrypted part.
fn build_form(request: UploadRequest) -> Result<(Form, u64)> {
    let encrypted = request.encrypted_payload.to_bytes()?;
    let size = u64::try_from(encrypted.len())?;
    let form = Form::new()
        .part(
            ENCRYPTED_FILE_FIELD,
            Part::bytes(encrypted)
                .file_name(ENCRYPTED_FILE_NAME)
                .mime_str(ENCRYPTED_FILE_MIME)?,
        )
        .text(ORIGINAL_NAME_FIELD, request.original_name)
        .text(RECEIVER_EMAIL_FIELD, request.receiver_email)
        .text(PASSWORD_FIELD, request.password_digest.to_hex());
    Ok((form, size))
}
