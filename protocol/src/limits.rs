/// Largest accepted file, in decimal bytes.
pub const MAX_FILE_SIZE: u64 = 10_000_000;

/// File extensions accepted for upload, lower-cased.
pub const ALLOWED_EXTENSIONS: [&str; 27] = [
    "pdf", "docx", "doc", "xls", "xlsx", "csv", "txt", "rtf", "html", "zip", "mp3", "m4a", "wma",
    "mpg", "flv", "avi", "jpg", "jpeg", "png", "gif", "ppt", "pptx", "wav", "mp4", "m4v", "wmv",
    "epub",
];

/// Checks a lower-cased extension against [`ALLOWED_EXTENSIONS`].
#[must_use]
#[inline]
pub fn is_allowed_extension(extension: &str) -> bool {
    ALLOWED_EXTENSIONS.contains(&extension)
}
