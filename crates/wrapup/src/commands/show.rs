//! `wrapup <page>` implementation.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use clap::Args;
use wrapup_config::{CliSettings, ColorsConfig, Config};
use wrapup_pages::{ColorTheme, MarkupRenderer, PageLocator, PageRequest, Platform, detect_platform};

use crate::error::CliError;

/// Extension of upstream page files.
const PAGE_EXTENSION: &str = ".md";

/// Arguments for showing a page.
#[derive(Args, Debug)]
pub(crate) struct ShowArgs {
    /// Command to show the page for (e.g. `tar` or `tar.md`).
    #[arg(required = true)]
    page: Option<String>,

    /// Path to configuration file (default: ~/.config/wrapup/config.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Platform to look up (default: the host platform).
    #[arg(short, long)]
    platform: Option<Platform>,

    /// tldr cache directory containing `pages/` (overrides config).
    #[arg(long, env = "WRAPUP_CACHE_DIR")]
    cache_dir: Option<PathBuf>,

    /// Never download missing pages.
    #[arg(long)]
    offline: bool,
}

impl ShowArgs {
    /// Resolve and print the page to stdout.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut out = BufWriter::new(stdout.lock());
        self.run(&mut out)?;
        out.flush()?;
        Ok(())
    }

    fn run<W: Write>(self, out: &mut W) -> Result<(), CliError> {
        let page = self
            .page
            .as_deref()
            .ok_or_else(|| CliError::Validation("no page given".to_owned()))?;

        let cli_settings = CliSettings {
            cache_dir: self.cache_dir.clone(),
            network_enabled: self.offline.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let platform = self.platform.unwrap_or_else(detect_platform);
        let request = PageRequest::new(page_file_name(page), platform)?;

        let page = build_locator(&config).resolve(&request)?;
        tracing::debug!(
            "rendering {} ({:?})",
            page.source_path().display(),
            page.origin()
        );

        let renderer = MarkupRenderer::new(theme_from_config(&config.colors));
        renderer.render(page.into_reader(), out)?;
        Ok(())
    }
}

/// Append the page extension to a bare command name.
fn page_file_name(page: &str) -> String {
    if page.ends_with(PAGE_EXTENSION) {
        page.to_owned()
    } else {
        format!("{page}{PAGE_EXTENSION}")
    }
}

/// Overlay configured colors on the renderer defaults.
fn theme_from_config(colors: &ColorsConfig) -> ColorTheme {
    let defaults = ColorTheme::default();
    ColorTheme {
        title: colors.title.clone().unwrap_or(defaults.title),
        description: colors.description.clone().unwrap_or(defaults.description),
        example_text: colors.example_text.clone().unwrap_or(defaults.example_text),
        example_code: colors.example_code.clone().unwrap_or(defaults.example_code),
    }
}

#[cfg(feature = "online")]
fn build_locator(config: &Config) -> PageLocator {
    use std::time::Duration;
    use wrapup_pages::{DEFAULT_BASE_URL, HttpFetcher};

    let locator = PageLocator::new(config.pages_resolved.cache_dir.clone());
    if !config.network.enabled {
        return locator;
    }

    let base_url = config
        .network
        .base_url
        .as_deref()
        .unwrap_or(DEFAULT_BASE_URL);
    let timeout = Duration::from_secs(config.network.timeout);
    locator.with_fetcher(HttpFetcher::with_base_url(base_url, timeout))
}

#[cfg(not(feature = "online"))]
fn build_locator(config: &Config) -> PageLocator {
    PageLocator::new(config.pages_resolved.cache_dir.clone())
}
