use {crate::error::ValidationError, regex::Regex, std::sync::LazyLock};

#[expect(clippy::expect_used, reason = "constant pattern")]
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9_'+\-.]*[a-z0-9_+\-]@([a-z0-9][a-z0-9\-]*\.)+[a-z]{2,}$")
        .expect("invalid email regex")
});

/// Checks emptiness first, then address syntax. Deliverability is not checked.
#[inline]
pub fn validate_receiver(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if email.starts_with('.') || email.contains("..") || !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}
