pub mod cli;
pub mod config;

use {
    crate::{
        cli::{Cli, Command},
        config::Config,
    },
    anyhow::{Result, bail},
    byte_unit::{Byte, UnitType},
    sealpost_sdk::{
        Passphrase, SelectedFile, UploadOrchestrator, UploadState,
        client::Client,
        crypto::{RustCrypto, hash_password},
        validation::validate_receiver,
    },
    std::{
        env,
        fmt::Display,
        io::{self, Write},
        path::Path,
        sync::Mutex,
    },
    tracing::{debug, info},
    tracing_subscriber::{EnvFilter, layer::SubscriberExt as _, util::SubscriberInitExt as _},
};

pub const PASSWORD_ENV_VAR: &str = "SEALPOST_PASSWORD";

#[inline]
pub async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Command::Send { file, to } => send(&config, &file, &to).await,
        Command::Check { file, to } => check(&file, to.as_deref()),
        Command::Digest => {
            let password = read_passphrase(false)?;
            print_line(hash_password(&RustCrypto, &password))
        }
    }
}

async fn send(config: &Config, path: &Path, receiver_email: &str) -> Result<()> {
    let file = SelectedFile::open(path)?;
    info!("selected {} ({})", file.name(), pretty_size(file.size()));
    let password = read_passphrase(true)?;

    let client = Client::with_timeout(config.server_url.clone(), config.request_timeout)?;
    let orchestrator =
        UploadOrchestrator::new(client).with_encryption_timeout(config.encryption_timeout);
    let mut states = orchestrator.subscribe();
    let progress = tokio::spawn(async move {
        while states.changed().await.is_ok() {
            let state = states.borrow_and_update().clone();
            match state {
                UploadState::Encrypting => info!("encrypting..."),
                UploadState::Submitting => info!("uploading..."),
                state => debug!(?state, "upload state changed"),
            }
        }
    });

    let result = orchestrator.submit(file, receiver_email, password).await;
    drop(orchestrator);
    progress.await?;
    result?;
    info!(
        "file sent to {receiver_email}. Share the passphrase with the receiver \
        through another channel, the server never receives it"
    );
    Ok(())
}

fn check(path: &Path, receiver_email: Option<&str>) -> Result<()> {
    let (name, size) = SelectedFile::inspect(path)?;
    if let Some(receiver_email) = receiver_email {
        validate_receiver(receiver_email)?;
    }
    info!("{name} ({}) can be sent", pretty_size(size));
    Ok(())
}

fn read_passphrase(confirm: bool) -> Result<Passphrase> {
    if let Ok(value) = env::var(PASSWORD_ENV_VAR) {
        debug!("using passphrase from {PASSWORD_ENV_VAR}");
        return Ok(Passphrase::new(value));
    }
    let password = Passphrase::new(rpassword::prompt_password("Passphrase: ")?);
    if confirm {
        let repeated = Passphrase::new(rpassword::prompt_password("Repeat passphrase: ")?);
        if password.as_unmasked_str() != repeated.as_unmasked_str() {
            bail!("passphrases do not match");
        }
    }
    Ok(password)
}

fn print_line(value: impl Display) -> Result<()> {
    writeln!(io::stdout().lock(), "{value}")?;
    Ok(())
}

#[must_use]
#[inline]
pub fn pretty_size(size: u64) -> impl Display {
    let size = Byte::from_u64(size).get_appropriate_unit(UnitType::Decimal);
    format!("{size:.2}")
}

fn log_writer(log_file: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    Ok(match log_file {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs_err::create_dir_all(parent)?;
            }
            Box::new(
                fs_err::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)?,
            )
        }
        None => Box::new(io::stderr()),
    })
}

/// Logs go to stderr unless `log_file` is set; stdout is reserved for command output.
#[inline]
pub fn setup_logger(log_file: Option<&Path>, log_filter: &str) -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(log_file.is_none())
        .with_writer(Mutex::new(log_writer(log_file)?));
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(EnvFilter::try_new(log_filter)?)
        .init();
    Ok(())
}
