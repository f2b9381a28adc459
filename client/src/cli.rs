use {
    clap::{Parser, Subcommand},
    std::path::PathBuf,
};

/// Encrypt a file locally and send it to a receiver through a sealpost server.
#[derive(Debug, Parser)]
#[command(version)]
pub struct Cli {
    /// Path to the config file. Defaults to `sealpost.json5` in the user's config dir.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Encrypt the file and upload it for the receiver.
    ///
    /// The passphrase is read from `SEALPOST_PASSWORD` or prompted for.
    Send {
        file: PathBuf,
        #[arg(long)]
        to: String,
    },
    /// Check that the file (and optionally the receiver) would be accepted.
    Check {
        file: PathBuf,
        #[arg(long)]
        to: Option<String>,
    },
    /// Print the digest the server receives for a passphrase.
    Digest,
}
