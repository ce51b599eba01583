//! Strong domain types for roledoc.
//!
//! # Examples
//!
//! ```
//! use roledoc_core::RoleName;
//! use std::path::Path;
//!
//! let name = RoleName::from_path(Path::new("/srv/roles/msxml")).unwrap();
//! assert_eq!(name.as_str(), "msxml");
//! ```

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// Role name (newtype over String).
///
/// Derived from the final component of the role's root directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoleName(String);

impl RoleName {
    /// Creates a new role name.
    ///
    /// # Examples
    ///
    /// ```
    /// use roledoc_core::RoleName;
    ///
    /// let name = RoleName::new("webserver");
    /// assert_eq!(name.as_str(), "webserver");
    /// ```
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Derives a role name from a directory path.
    ///
    /// Returns `None` when the path has no final component (for example `/`).
    /// Callers should canonicalize relative paths such as `.` first.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .map(|name| Self(name.to_string_lossy().into_owned()))
    }

    /// Returns the role name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `RoleName` and returns the inner `String`.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RoleName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
