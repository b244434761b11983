//! Error types for window lookups.

use thiserror::Error;

/// Returned by lookups that require the coordinate to be inside the window.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowError {
    #[error("position ({x}, {y}, {z}) is out of window")]
    OutOfWindow { x: i32, y: i32, z: i32 },
}

impl WindowError {
    pub(crate) fn out_of_window((x, y, z): (i32, i32, i32)) -> Self {
        WindowError::OutOfWindow { x, y, z }
    }
}

pub type Result<T> = std::result::Result<T, WindowError>;
