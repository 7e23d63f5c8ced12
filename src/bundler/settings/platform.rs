//! Target platform types and utilities.

use crate::bundler::error::{Error, Result};

/// Target platform for a bundle.
///
/// Closed enumeration of the five supported targets. Every branch point in
/// the pipeline (launcher selection, extension choice, bundle scaffolding,
/// architecture filtering) dispatches over this enum exhaustively, so adding
/// a platform cannot silently skip a branch.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Platform {
    /// Windows 32-bit
    Windows32,
    /// Windows 64-bit
    Windows64,
    /// Linux 32-bit
    Linux32,
    /// Linux 64-bit
    Linux64,
    /// macOS
    MacOS,
}

/// Native word size used when filtering shared libraries by file name.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WordSize {
    /// 32-bit target; libraries whose names contain `64` are removed
    Bits32,
    /// 64-bit target; libraries whose names lack `64` are removed
    Bits64,
}

impl Platform {
    /// Returns the launcher executable extension for this platform.
    pub fn exe_extension(self) -> &'static str {
        match self {
            Platform::Windows32 | Platform::Windows64 => ".exe",
            Platform::Linux32 | Platform::Linux64 | Platform::MacOS => "",
        }
    }

    /// Returns the word size used for native-library filtering, or `None` on
    /// macOS, where the architecture filter does not apply.
    pub fn word_size(self) -> Option<WordSize> {
        match self {
            Platform::Windows32 | Platform::Linux32 => Some(WordSize::Bits32),
            Platform::Windows64 | Platform::Linux64 => Some(WordSize::Bits64),
            Platform::MacOS => None,
        }
    }

    /// Returns the canonical name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Platform::Windows32 => "windows32",
            Platform::Windows64 => "windows64",
            Platform::Linux32 => "linux32",
            Platform::Linux64 => "linux64",
            Platform::MacOS => "macos",
        }
    }

    /// All supported platforms, in declaration order.
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Windows32,
            Platform::Windows64,
            Platform::Linux32,
            Platform::Linux64,
            Platform::MacOS,
        ]
    }
}

impl std::str::FromStr for Platform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "windows32" => Ok(Platform::Windows32),
            "windows64" => Ok(Platform::Windows64),
            "linux32" => Ok(Platform::Linux32),
            "linux64" => Ok(Platform::Linux64),
            "macos" => Ok(Platform::MacOS),
            other => Err(Error::Config(format!(
                "invalid platform '{}', expected one of: windows32, windows64, linux32, linux64, macos",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_platforms_get_exe_extension() {
        assert_eq!(Platform::Windows32.exe_extension(), ".exe");
        assert_eq!(Platform::Windows64.exe_extension(), ".exe");
        assert_eq!(Platform::Linux64.exe_extension(), "");
        assert_eq!(Platform::MacOS.exe_extension(), "");
    }

    #[test]
    fn word_size_is_none_on_macos() {
        assert_eq!(Platform::MacOS.word_size(), None);
        assert_eq!(Platform::Linux32.word_size(), Some(WordSize::Bits32));
        assert_eq!(Platform::Windows64.word_size(), Some(WordSize::Bits64));
    }

    #[test]
    fn parse_round_trips_canonical_names() {
        for platform in Platform::all() {
            assert_eq!(platform.name().parse::<Platform>().unwrap(), *platform);
        }
        assert!("win64".parse::<Platform>().is_err());
    }
}
