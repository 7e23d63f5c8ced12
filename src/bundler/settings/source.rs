//! Runtime source classification.

use std::path::PathBuf;
use url::Url;

/// Where the bundled runtime comes from.
///
/// A source string is remote iff it parses as a URL with an `http` or
/// `https` scheme; everything else is treated as a local path (which may be
/// an archive or an already-extracted directory, decided at acquisition
/// time).
#[derive(Clone, Debug)]
pub enum RuntimeSource {
    /// Runtime fetched over HTTP(S)
    Remote(Url),
    /// Runtime read from the local filesystem
    Local(PathBuf),
}

impl RuntimeSource {
    /// Classifies a raw source string.
    ///
    /// Windows drive paths like `C:\jdk` parse as URLs with a single-letter
    /// scheme and are correctly classified as local.
    pub fn classify(raw: &str) -> Self {
        if let Ok(url) = Url::parse(raw) {
            if matches!(url.scheme(), "http" | "https") {
                return RuntimeSource::Remote(url);
            }
        }
        RuntimeSource::Local(PathBuf::from(raw))
    }
}
