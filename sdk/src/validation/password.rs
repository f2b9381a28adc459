use crate::error::ValidationError;

/// Minimum passphrase length in characters (Unicode scalar values, not bytes).
pub const MIN_PASSWORD_LENGTH: usize = 20;

/// Checks length first, then the presence of an uppercase character.
///
/// "Uppercase" means any character that changes under lower-casing, so letters of
/// caseless scripts never satisfy it.
#[inline]
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort);
    }
    if password == password.to_lowercase() {
        return Err(ValidationError::NoUppercase);
    }
    Ok(())
}
