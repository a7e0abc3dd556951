//! tldr page resolution and rendering for wrapup.
//!
//! A page is found by [`PageLocator`], which tries, in order:
//!
//! 1. `{cache_dir}/pages/{platform}/{page}`
//! 2. a download from the upstream repository (when a [`PageFetcher`] is set)
//! 3. `{cache_dir}/pages/common/{page}`
//!
//! The resolved page is then turned into ANSI-colored terminal output by
//! [`MarkupRenderer`].
//!
//! # Example
//!
//! ```
//! use wrapup_pages::{ColorTheme, MarkupRenderer};
//!
//! let renderer = MarkupRenderer::new(ColorTheme::default());
//! let mut out = Vec::new();
//! renderer.render("# tar\n".as_bytes(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("tar"));
//! ```

mod error;
mod fetch;
mod locator;
mod platform;
mod render;
mod request;

pub use error::{FetchError, PageError};
#[cfg(feature = "online")]
pub use fetch::HttpFetcher;
pub use fetch::{DEFAULT_BASE_URL, PageFetcher, page_url};
pub use locator::{PageLocator, PageOrigin, ResolvedPage};
pub use platform::{Platform, UnknownPlatform, detect_platform};
pub use render::{ColorTheme, LineClass, MarkupRenderer, RESET, UNDERLINE, classify};
pub use request::PageRequest;

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    const PAGE: &str = "# ls\n\n> List directory contents.\n\n- List files:\n\n`ls {{path}}`\n";

    #[test]
    fn test_common_fallback_renders_like_common_file() {
        let cache = TempDir::new().unwrap();
        let common = cache.path().join("pages/common");
        fs::create_dir_all(&common).unwrap();
        fs::write(common.join("ls.md"), PAGE).unwrap();

        let renderer = MarkupRenderer::default();
        let request = PageRequest::new("ls.md", Platform::Osx).unwrap();
        let page = PageLocator::new(cache.path().to_path_buf())
            .resolve(&request)
            .unwrap();
        assert_eq!(page.origin(), PageOrigin::Common);

        let mut via_locator = Vec::new();
        renderer.render(page.into_reader(), &mut via_locator).unwrap();

        let mut direct = Vec::new();
        renderer.render(PAGE.as_bytes(), &mut direct).unwrap();

        assert_eq!(
            String::from_utf8(via_locator).unwrap(),
            String::from_utf8(direct).unwrap()
        );
    }
}
