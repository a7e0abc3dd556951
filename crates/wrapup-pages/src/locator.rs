//! Page lookup across the local cache and the network.
//!
//! Directory layout consumed:
//! ```text
//! {cache_dir}/
//! +-- pages/
//!     +-- linux/         # platform-specific pages
//!     |   +-- tar.md
//!     +-- common/        # fallback for every platform
//!         +-- tar.md
//! ```
//!
//! Downloads land in `{temp_dir}/wrapup_tmp_pages_{platform}_{page}` and are
//! left there for the OS to reap.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Lines, Write};
use std::path::{Path, PathBuf};

use crate::error::PageError;
use crate::fetch::PageFetcher;
use crate::platform::Platform;
use crate::request::PageRequest;

/// Prefix of downloaded page files inside the temp directory.
const DOWNLOAD_PREFIX: &str = "wrapup_tmp_pages";

/// Where a resolved page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOrigin {
    /// `{cache_dir}/pages/{platform}/{page}`.
    Platform,
    /// Downloaded from upstream into the temp directory.
    Download,
    /// `{cache_dir}/pages/common/{page}`.
    Common,
}

/// An opened page, ready to be read once.
///
/// Owns the file handle; dropping it closes the file.
#[derive(Debug)]
pub struct ResolvedPage {
    source_path: PathBuf,
    origin: PageOrigin,
    reader: BufReader<File>,
}

impl ResolvedPage {
    #[must_use]
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    #[must_use]
    pub fn origin(&self) -> PageOrigin {
        self.origin
    }

    /// Consume the page, yielding a buffered reader over its content.
    #[must_use]
    pub fn into_reader(self) -> BufReader<File> {
        self.reader
    }

    /// Consume the page, yielding its lines.
    #[must_use]
    pub fn lines(self) -> Lines<BufReader<File>> {
        self.reader.lines()
    }
}

/// Resolves page names to readable files.
pub struct PageLocator {
    cache_dir: PathBuf,
    temp_dir: PathBuf,
    fetcher: Option<Box<dyn PageFetcher>>,
}

impl PageLocator {
    /// Create a locator over `cache_dir` with the network tier disabled.
    #[must_use]
    pub fn new(cache_dir: PathBuf) -> Self {
        Self {
            cache_dir,
            temp_dir: std::env::temp_dir(),
            fetcher: None,
        }
    }

    /// Enable the network tier.
    #[must_use]
    pub fn with_fetcher(mut self, fetcher: impl PageFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    /// Directory downloads are written into (default: system temp dir).
    #[must_use]
    pub fn with_temp_dir(mut self, temp_dir: PathBuf) -> Self {
        self.temp_dir = temp_dir;
        self
    }

    /// `{cache_dir}/pages/{platform}/{page}`.
    #[must_use]
    pub fn platform_path(&self, request: &PageRequest) -> PathBuf {
        self.cache_path(request.platform(), request.page_name())
    }

    /// `{cache_dir}/pages/common/{page}`.
    #[must_use]
    pub fn common_path(&self, request: &PageRequest) -> PathBuf {
        self.cache_path(Platform::Common, request.page_name())
    }

    /// Temp file a download of `request` is written into.
    ///
    /// Distinct per platform and page so unrelated invocations never share a
    /// file.
    #[must_use]
    pub fn download_path(&self, request: &PageRequest) -> PathBuf {
        self.temp_dir.join(format!(
            "{DOWNLOAD_PREFIX}_{}_{}",
            request.platform(),
            request.page_name()
        ))
    }

    fn cache_path(&self, platform: Platform, page_name: &str) -> PathBuf {
        self.cache_dir
            .join("pages")
            .join(platform.as_str())
            .join(page_name)
    }

    /// Resolve `request` to an open page.
    ///
    /// Tries the platform path, then the network (if a fetcher is set), then
    /// the common path. Each step is attempted exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`PageError::NotFound`] when every step misses, and
    /// [`PageError::Download`] when the download file could not be created,
    /// written or reopened.
    pub fn resolve(&self, request: &PageRequest) -> Result<ResolvedPage, PageError> {
        let platform_path = self.platform_path(request);
        if let Some(page) = open_candidate(&platform_path, PageOrigin::Platform) {
            return Ok(page);
        }

        if let Some(page) = self.download(request)? {
            return Ok(page);
        }

        let common_path = self.common_path(request);
        if let Some(page) = open_candidate(&common_path, PageOrigin::Common) {
            return Ok(page);
        }

        Err(PageError::NotFound {
            page: request.page_name().to_owned(),
            tried: vec![platform_path, common_path],
        })
    }

    /// Network tier. `Ok(None)` means "not available here, keep going".
    fn download(&self, request: &PageRequest) -> Result<Option<ResolvedPage>, PageError> {
        let Some(fetcher) = &self.fetcher else {
            return Ok(None);
        };

        let path = self.download_path(request);
        let (status, write_error) = {
            let file = File::create(&path).map_err(|source| PageError::Download {
                path: path.clone(),
                source,
            })?;
            let mut dest = RecordingWriter::new(file);
            let status = fetcher.fetch(request.platform(), request.page_name(), &mut dest);
            (status, dest.error)
        };

        // A local write fault is fatal whatever the fetcher made of it.
        if let Some(source) = write_error {
            return Err(PageError::Download { path, source });
        }

        match status {
            Ok(200) => {}
            Ok(status) => {
                tracing::debug!(
                    "upstream returned HTTP {status} for {}/{}",
                    request.platform(),
                    request.page_name()
                );
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!("failed to download {}: {e}", request.page_name());
                return Ok(None);
            }
        }

        let file = File::open(&path).map_err(|source| PageError::Download {
            path: path.clone(),
            source,
        })?;
        tracing::info!("downloaded {} to {}", request.page_name(), path.display());

        Ok(Some(ResolvedPage {
            source_path: path,
            origin: PageOrigin::Download,
            reader: BufReader::new(file),
        }))
    }
}

/// Writer that keeps the first error raised by `inner`.
///
/// Fetchers report local write faults and remote read faults alike as
/// [`FetchError::Io`](crate::FetchError::Io); this tells them apart.
struct RecordingWriter<W> {
    inner: W,
    error: Option<io::Error>,
}

impl<W: Write> RecordingWriter<W> {
    fn new(inner: W) -> Self {
        Self { inner, error: None }
    }

    fn record(&mut self, err: io::Error) -> io::Error {
        if err.kind() == io::ErrorKind::Interrupted {
            return err;
        }
        let copy = io::Error::new(err.kind(), err.to_string());
        self.error.get_or_insert(err);
        copy
    }
}

impl<W: Write> Write for RecordingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).map_err(|e| self.record(e))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().map_err(|e| self.record(e))
    }
}

/// Open a cached page, treating any failure as a miss.
fn open_candidate(path: &Path, origin: PageOrigin) -> Option<ResolvedPage> {
    match File::open(path) {
        Ok(file) => {
            tracing::debug!("path = {}", path.display());
            Some(ResolvedPage {
                source_path: path.to_path_buf(),
                origin,
                reader: BufReader::new(file),
            })
        }
        Err(e) => {
            tracing::debug!("no page at {}: {e}", path.display());
            None
        }
    }
}
