use {
    crate::error::ValidationError,
    sealpost_protocol::limits::{MAX_FILE_SIZE, is_allowed_extension},
};

/// Lower-cased substring after the last `.` of the name.
///
/// A name without any `.` is returned whole, which never matches the allow-list.
#[must_use]
#[inline]
pub fn file_extension(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_lowercase()
}

/// Checks size first, then extension.
#[inline]
pub fn validate_file(name: &str, size: u64) -> Result<(), ValidationError> {
    if size > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge { size });
    }
    let extension = file_extension(name);
    if !is_allowed_extension(&extension) {
        return Err(ValidationError::DisallowedExtension { extension });
    }
    Ok(())
}
