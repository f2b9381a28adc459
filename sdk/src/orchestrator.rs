//! Sequences one upload attempt: validate, hash, encrypt, assemble, send.
//!
//! ```text
//! Idle -> Validating -> Encrypting -> Submitting -> Succeeded
//!             |             |             |
//!             v             +-------------+-----> Failed(kind)
//!           Idle
//! ```
//!
//! A validation failure returns to `Idle`. `Succeeded` and `Failed` end the attempt;
//! the next `submit` starts a new one. Nothing is retried.

use {
    crate::{
        client::Transport,
        content::SelectedFile,
        crypto::{EncryptionEngine, Passphrase, hash_password},
        error::{CryptoError, SubmitError},
        validation::{validate_file, validate_password, validate_receiver},
    },
    sealpost_protocol::UploadRequest,
    std::time::Duration,
    tokio::{sync::watch, time::timeout},
    tracing::{info, instrument, warn},
};

pub const DEFAULT_ENCRYPTION_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Validating,
    Encrypting,
    Submitting,
    Succeeded,
    Failed(SubmitError),
}

impl UploadState {
    #[must_use]
    #[inline]
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::Encrypting | Self::Submitting)
    }
}

/// Puts the state back to `Idle` if an attempt is abandoned midway.
struct AttemptGuard<'a>(&'a watch::Sender<UploadState>);

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        self.0.send_if_modified(|state| {
            if state.is_busy() {
                *state = UploadState::Idle;
                true
            } else {
                false
            }
        });
    }
}

pub struct UploadOrchestrator<T> {
    engine: EncryptionEngine,
    transport: T,
    encryption_timeout: Duration,
    state: watch::Sender<UploadState>,
}

impl<T: Transport> UploadOrchestrator<T> {
    #[inline]
    pub fn new(transport: T) -> Self {
        Self::with_engine(EncryptionEngine::default(), transport)
    }

    #[inline]
    pub fn with_engine(engine: EncryptionEngine, transport: T) -> Self {
        let (state, _) = watch::channel(UploadState::Idle);
        Self {
            engine,
            transport,
            encryption_timeout: DEFAULT_ENCRYPTION_TIMEOUT,
            state,
        }
    }

    /// Upper bound for key derivation and encryption together.
    ///
    /// When it elapses the attempt fails with [`CryptoError::EncryptionFailed`] right away,
    /// but the blocking task cannot be cancelled: it keeps its copy of the file content,
    /// the passphrase and the derived key until derivation and encryption finish, then
    /// drops them (the key and passphrase are zeroized) and its result is discarded.
    #[must_use]
    #[inline]
    pub fn with_encryption_timeout(mut self, encryption_timeout: Duration) -> Self {
        self.encryption_timeout = encryption_timeout;
        self
    }

    #[must_use]
    #[inline]
    pub fn state(&self) -> UploadState {
        self.state.borrow().clone()
    }

    /// Progress signal: receives every state transition.
    #[must_use]
    #[inline]
    pub fn subscribe(&self) -> watch::Receiver<UploadState> {
        self.state.subscribe()
    }

    /// Runs one attempt. Fails with [`SubmitError::Busy`] without side effects if
    /// another attempt is in flight.
    ///
    /// The file content and passphrase are consumed and dropped by the end of the attempt.
    #[instrument(skip_all, fields(name = file.name()))]
    #[inline]
    pub async fn submit(
        &self,
        file: SelectedFile,
        receiver_email: &str,
        password: Passphrase,
    ) -> Result<(), SubmitError> {
        let started = self.state.send_if_modified(|state| {
            if state.is_busy() {
                false
            } else {
                *state = UploadState::Validating;
                true
            }
        });
        if !started {
            warn!("upload already in progress");
            return Err(SubmitError::Busy);
        }
        let _guard = AttemptGuard(&self.state);

        let result = self.run(file, receiver_email, password).await;
        let final_state = match &result {
            Ok(()) => UploadState::Succeeded,
            Err(SubmitError::Validation(_)) => UploadState::Idle,
            Err(err) => UploadState::Failed(err.clone()),
        };
        self.state.send_replace(final_state);
        result
    }

    async fn run(
        &self,
        file: SelectedFile,
        receiver_email: &str,
        password: Passphrase,
    ) -> Result<(), SubmitError> {
        validate_file(file.name(), file.size())?;
        validate_receiver(receiver_email)?;
        validate_password(password.as_unmasked_str())?;

        self.state.send_replace(UploadState::Encrypting);
        let password_digest = hash_password(self.engine.provider(), &password);
        let (original_name, content) = file.into_parts();
        let encrypted_payload = timeout(
            self.encryption_timeout,
            self.engine.encrypt(content, &password),
        )
        .await
        .map_err(|elapsed| {
            warn!(%elapsed, timeout = ?self.encryption_timeout, "encryption timed out");
            CryptoError::EncryptionFailed
        })??;
        drop(password);

        let request = UploadRequest {
            encrypted_payload,
            original_name,
            receiver_email: receiver_email.to_owned(),
            password_digest,
        };
        self.state.send_replace(UploadState::Submitting);
        self.transport.send(request).await?;
        info!("file successfully uploaded");
        Ok(())
    }
}
