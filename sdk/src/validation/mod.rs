//! Client-side checks run before any cryptographic or network work.
//!
//! Each validator is a pure function returning the first failure it detects.

mod file;
mod password;
mod receiver;

pub use {
    file::{file_extension, validate_file},
    password::{MIN_PASSWORD_LENGTH, validate_password},
    receiver::validate_receiver,
};
