use crate::error::PageError;
use crate::platform::Platform;

/// A page to look up, keyed by file name and platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page_name: String,
    platform: Platform,
}

impl PageRequest {
    /// Create a request for `page_name` (e.g. `tar.md`) on `platform`.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::InvalidName`] if the name is empty or is not a
    /// plain file name.
    pub fn new(page_name: impl Into<String>, platform: Platform) -> Result<Self, PageError> {
        let page_name = page_name.into();
        if page_name.is_empty()
            || page_name == "."
            || page_name == ".."
            || page_name.contains(['/', '\\'])
        {
            return Err(PageError::InvalidName(page_name));
        }
        Ok(Self {
            page_name,
            platform,
        })
    }

    #[must_use]
    pub fn page_name(&self) -> &str {
        &self.page_name
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        self.platform
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_name() {
        let request = PageRequest::new("tar.md", Platform::Linux).unwrap();
        assert_eq!(request.page_name(), "tar.md");
        assert_eq!(request.platform(), Platform::Linux);
    }

    #[test]
    fn test_rejects_empty_and_traversal() {
        for name in ["", ".", "..", "../etc/passwd", "a/b.md", "a\\b.md"] {
            let err = PageRequest::new(name, Platform::Common).unwrap_err();
            assert!(
                matches!(err, PageError::InvalidName(_)),
                "expected InvalidName for {name:?}, got {err:?}"
            );
        }
    }
}
