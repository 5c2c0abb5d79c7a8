use std::fmt;
use std::path::{Path, PathBuf};

/// Where a CSV of ASOS observations comes from.
///
/// Strings starting with `http://` or `https://` are treated as URLs, anything else
/// as a local file path.
///
/// ```
/// use meteogram::AsosSource;
///
/// assert!(matches!(AsosSource::from("https://example.org/a.csv"), AsosSource::Url(_)));
/// assert!(matches!(AsosSource::from("data/AMW_example_data.csv"), AsosSource::Path(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AsosSource {
    Url(String),
    Path(PathBuf),
}

impl From<&str> for AsosSource {
    fn from(value: &str) -> Self {
        let lower = value.trim_start().to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            AsosSource::Url(value.trim().to_string())
        } else {
            AsosSource::Path(PathBuf::from(value))
        }
    }
}

impl From<String> for AsosSource {
    fn from(value: String) -> Self {
        AsosSource::from(value.as_str())
    }
}

impl From<&Path> for AsosSource {
    fn from(value: &Path) -> Self {
        AsosSource::Path(value.to_path_buf())
    }
}

impl From<PathBuf> for AsosSource {
    fn from(value: PathBuf) -> Self {
        AsosSource::Path(value)
    }
}

impl fmt::Display for AsosSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AsosSource::Url(url) => write!(f, "{}", url),
            AsosSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
