use {
    anyhow::{Error, bail, ensure},
    std::{
        fmt::{self, Debug, Display},
        str::FromStr,
    },
};

pub const DIGEST_LENGTH: usize = 32;

/// SHA-256 of the raw passphrase, sent to the server as a verifier.
///
/// It is never used to derive the encryption key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PasswordDigest([u8; DIGEST_LENGTH]);

impl PasswordDigest {
    #[must_use]
    #[inline]
    pub fn from_bytes(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    #[must_use]
    #[inline]
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    /// 64 lowercase hex characters, as sent over the wire.
    #[must_use]
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl Display for PasswordDigest {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Debug for PasswordDigest {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordDigest").finish()
    }
}

impl FromStr for PasswordDigest {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const HEX_LENGTH: usize = DIGEST_LENGTH * 2;

        ensure!(
            s.len() == HEX_LENGTH,
            "invalid length; got {}, expected {HEX_LENGTH}",
            s.len(),
        );
        if let Some(c) = s.chars().find(|c| !matches!(c, '0'..='9' | 'a'..='f')) {
            bail!("must be lowercase hex but contains invalid character `{c}`");
        }
        let mut bytes = [0; DIGEST_LENGTH];
        hex::decode_to_slice(s, &mut bytes)?;
        Ok(Self(bytes))
    }
}
