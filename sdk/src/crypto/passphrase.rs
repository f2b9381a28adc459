use {
    std::fmt::{self, Debug},
    zeroize::Zeroizing,
};

/// Passphrase entered by the user.
///
/// Lives only for the duration of one submission. The buffer is wiped on drop and
/// the value never appears in `Debug` output or logs.
#[derive(Clone)]
pub struct Passphrase(Zeroizing<String>);

impl Passphrase {
    #[must_use]
    #[inline]
    pub fn new(raw: String) -> Self {
        Self(Zeroizing::new(raw))
    }

    #[must_use]
    #[inline]
    pub fn as_unmasked_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Passphrase {
    #[inline]
    fn from(raw: &str) -> Self {
        Self::new(raw.to_owned())
    }
}

impl Debug for Passphrase {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Passphrase").finish()
    }
}
