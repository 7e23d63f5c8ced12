//! Output location model.

use std::path::{Path, PathBuf};

/// The two roots every pipeline step writes into.
///
/// Set once by the orchestrator (both roots point at the output directory)
/// and overridden exactly once by the macOS bundle builder, which redirects
/// them into `Contents/MacOS` and `Contents/Resources`. Both directories
/// must exist before any copy or write proceeds.
#[derive(Clone, Debug)]
pub struct OutputLocations {
    /// Where the launcher executable lands.
    executable_dir: PathBuf,

    /// Where the classpath, runtime, and resources land.
    resources_dir: PathBuf,
}

impl OutputLocations {
    /// Creates a new pair of output locations.
    pub fn new(executable_dir: PathBuf, resources_dir: PathBuf) -> Self {
        Self {
            executable_dir,
            resources_dir,
        }
    }

    /// Returns the launcher directory.
    pub fn executable_dir(&self) -> &Path {
        &self.executable_dir
    }

    /// Returns the resources directory.
    pub fn resources_dir(&self) -> &Path {
        &self.resources_dir
    }
}
