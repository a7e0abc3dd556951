//! Error types for page resolution.

use std::path::PathBuf;

/// Error from resolving a page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Page name is empty or would escape the pages directory.
    #[error("invalid page name `{0}`")]
    InvalidName(String),

    /// No location yielded the page.
    #[error("page `{page}` not found (tried {})", display_paths(.tried))]
    NotFound {
        /// Requested page name.
        page: String,
        /// Local paths that were tried, in order.
        tried: Vec<PathBuf>,
    },

    /// The page was downloaded but its temporary file could not be used.
    #[error("downloaded page at {} could not be opened: {source}", .path.display())]
    Download {
        /// Temporary file the page was downloaded into.
        path: PathBuf,
        /// Underlying filesystem error.
        source: std::io::Error,
    },
}

/// Error from a single fetch attempt.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Request failed before a status was received (DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// Writing the response body failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_tried_paths() {
        let err = PageError::NotFound {
            page: "tar.md".to_owned(),
            tried: vec![
                PathBuf::from("/c/pages/linux/tar.md"),
                PathBuf::from("/c/pages/common/tar.md"),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("tar.md"));
        assert!(msg.contains("/c/pages/linux/tar.md, /c/pages/common/tar.md"));
    }
}
