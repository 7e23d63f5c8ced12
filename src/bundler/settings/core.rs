//! Core Config struct and accessors.

use super::Platform;
use std::path::{Path, PathBuf};

/// Validated bundling configuration.
///
/// Constructed once via [`ConfigBuilder`](super::ConfigBuilder), validated at
/// build time, and read-only for the rest of the run. Every pipeline step
/// receives it explicitly; there is no ambient configuration state.
#[derive(Clone, Debug)]
pub struct Config {
    /// Target platform.
    platform: Platform,

    /// Output directory for the distributable.
    out_dir: PathBuf,

    /// Launcher executable name, without extension.
    executable_name: String,

    /// Fully qualified main class started by the launcher.
    main_class: String,

    /// Classpath entries, in launch order.
    classpath: Vec<PathBuf>,

    /// VM arguments, in launch order.
    vm_args: Vec<String>,

    /// Auxiliary files and directories copied next to the classpath.
    resources: Vec<PathBuf>,

    /// Runtime source: local directory, local archive, or http(s) URL.
    runtime_source: String,

    /// Optional persistent cache directory for the extracted runtime.
    runtime_cache: Option<PathBuf>,

    /// Explicit macOS bundle identifier.
    ///
    /// Defaults to the main class with its final segment stripped.
    bundle_identifier: Option<String>,

    /// Optional macOS icon file.
    icon: Option<PathBuf>,

    /// Archives whose native libraries are filtered by word size.
    remove_platform_libs: Vec<PathBuf>,

    /// Minimize profile handed to the runtime minimizer.
    minimize_profile: String,

    /// Emit per-file detail while filtering archives.
    verbose: bool,
}

impl Config {
    /// Returns the target platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the output directory.
    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Returns the launcher executable name, without extension.
    pub fn executable_name(&self) -> &str {
        &self.executable_name
    }

    /// Returns the fully qualified main class.
    pub fn main_class(&self) -> &str {
        &self.main_class
    }

    /// Returns the classpath entries, in launch order.
    pub fn classpath(&self) -> &[PathBuf] {
        &self.classpath
    }

    /// Returns the VM arguments, in launch order.
    pub fn vm_args(&self) -> &[String] {
        &self.vm_args
    }

    /// Returns the declared resource paths.
    pub fn resources(&self) -> &[PathBuf] {
        &self.resources
    }

    /// Returns the raw runtime source string.
    pub fn runtime_source(&self) -> &str {
        &self.runtime_source
    }

    /// Returns the runtime cache directory, if caching is enabled.
    pub fn runtime_cache(&self) -> Option<&Path> {
        self.runtime_cache.as_deref()
    }

    /// Returns the explicit bundle identifier, if configured.
    pub fn bundle_identifier(&self) -> Option<&str> {
        self.bundle_identifier.as_deref()
    }

    /// Returns the icon path, if configured.
    pub fn icon(&self) -> Option<&Path> {
        self.icon.as_deref()
    }

    /// Returns the archives listed for architecture filtering.
    pub fn remove_platform_libs(&self) -> &[PathBuf] {
        &self.remove_platform_libs
    }

    /// Returns the minimize profile name.
    pub fn minimize_profile(&self) -> &str {
        &self.minimize_profile
    }

    /// Returns whether per-file filter detail is logged.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Creates a new Config instance (used by ConfigBuilder).
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        platform: Platform,
        out_dir: PathBuf,
        executable_name: String,
        main_class: String,
        classpath: Vec<PathBuf>,
        vm_args: Vec<String>,
        resources: Vec<PathBuf>,
        runtime_source: String,
        runtime_cache: Option<PathBuf>,
        bundle_identifier: Option<String>,
        icon: Option<PathBuf>,
        remove_platform_libs: Vec<PathBuf>,
        minimize_profile: String,
        verbose: bool,
    ) -> Self {
        Self {
            platform,
            out_dir,
            executable_name,
            main_class,
            classpath,
            vm_args,
            resources,
            runtime_source,
            runtime_cache,
            bundle_identifier,
            icon,
            remove_platform_libs,
            minimize_profile,
            verbose,
        }
    }
}
