use {
    crate::{error::ValidationError, validation::validate_file},
    anyhow::{Context as _, Result, bail},
    derivative::Derivative,
    std::path::Path,
    tracing::debug,
};

/// File chosen for upload. Only constructed from input that passed file validation.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct SelectedFile {
    name: String,
    size: u64,
    #[derivative(Debug = "ignore")]
    content: Vec<u8>,
}

impl SelectedFile {
    #[inline]
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Result<Self, ValidationError> {
        let name = name.into();
        let size = u64::try_from(content.len()).unwrap_or(u64::MAX);
        validate_file(&name, size)?;
        Ok(Self {
            name,
            size,
            content,
        })
    }

    /// Reads a file from disk.
    ///
    /// Size and extension are checked from metadata before the content is read, so an
    /// oversized file is rejected without loading it.
    #[inline]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let (name, _) = Self::inspect(path)?;
        let content = fs_err::read(path)?;
        debug!(name, size = content.len(), "file selected");
        Ok(Self::new(name, content)?)
    }

    /// Validates the file at `path` from its name and metadata only, returning both.
    #[inline]
    pub fn inspect(path: &Path) -> Result<(&str, u64)> {
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .with_context(|| format!("unsupported file name: {path:?}"))?;
        let metadata = fs_err::metadata(path)?;
        if !metadata.is_file() {
            bail!("not a file: {path:?}");
        }
        validate_file(name, metadata.len())?;
        Ok((name, metadata.len()))
    }

    #[must_use]
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    #[must_use]
    #[inline]
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// Splits into name and content.
    #[must_use]
    #[inline]
    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.name, self.content)
    }
}
