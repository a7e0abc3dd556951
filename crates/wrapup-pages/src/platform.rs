//! Host platform identification.
//!
//! The upstream repository keeps one directory of pages per operating system
//! plus a `common` directory shared by all of them.

use std::fmt;
use std::str::FromStr;

/// Operating system a page variant targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Android,
    Windows,
    Osx,
    SunOs,
    Linux,
    OpenBsd,
    NetBsd,
    FreeBsd,
    /// Pages valid on every platform.
    Common,
}

impl Platform {
    /// All platforms, in detection priority order.
    pub const ALL: [Self; 9] = [
        Self::Android,
        Self::Windows,
        Self::Osx,
        Self::SunOs,
        Self::Linux,
        Self::OpenBsd,
        Self::NetBsd,
        Self::FreeBsd,
        Self::Common,
    ];

    /// Directory name used under `pages/` both locally and upstream.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Windows => "windows",
            Self::Osx => "osx",
            Self::SunOs => "sunos",
            Self::Linux => "linux",
            Self::OpenBsd => "openbsd",
            Self::NetBsd => "netbsd",
            Self::FreeBsd => "freebsd",
            Self::Common => "common",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown platform name.
#[derive(Debug, thiserror::Error)]
#[error("unknown platform `{0}` (expected one of: android, windows, osx, sunos, linux, openbsd, netbsd, freebsd, common)")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "macos" => return Ok(Self::Osx),
            "solaris" => return Ok(Self::SunOs),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| UnknownPlatform(s.to_owned()))
    }
}

/// Detect the platform this binary was built for.
///
/// Falls back to [`Platform::Common`] on operating systems without a
/// dedicated page directory.
#[must_use]
pub fn detect_platform() -> Platform {
    if cfg!(target_os = "android") {
        Platform::Android
    } else if cfg!(target_os = "windows") {
        Platform::Windows
    } else if cfg!(target_os = "macos") {
        Platform::Osx
    } else if cfg!(any(target_os = "solaris", target_os = "illumos")) {
        Platform::SunOs
    } else if cfg!(target_os = "linux") {
        Platform::Linux
    } else if cfg!(target_os = "openbsd") {
        Platform::OpenBsd
    } else if cfg!(target_os = "netbsd") {
        Platform::NetBsd
    } else if cfg!(target_os = "freebsd") {
        Platform::FreeBsd
    } else {
        Platform::Common
    }
}
