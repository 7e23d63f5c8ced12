//! Builder for constructing Config.

use super::{Config, Platform};
use crate::bundler::error::{Context, Error, Result};
use crate::bundler::runtime::minimize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Config`].
///
/// Provides a fluent API for building a bundling configuration with
/// validation. All validation happens in [`build`](Self::build), before the
/// pipeline mutates anything.
///
/// # Examples
///
/// ```no_run
/// use jbundle::bundler::{ConfigBuilder, Platform};
///
/// # fn example() -> jbundle::bundler::Result<()> {
/// let config = ConfigBuilder::new()
///     .platform(Platform::Linux64)
///     .out_dir("out/myapp")
///     .executable_name("myapp")
///     .main_class("com.example.Main")
///     .classpath(vec!["myapp.jar".into()])
///     .runtime_source("https://example.com/jdk.zip")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ConfigBuilder {
    platform: Option<Platform>,
    out_dir: Option<PathBuf>,
    executable_name: Option<String>,
    main_class: Option<String>,
    classpath: Vec<PathBuf>,
    vm_args: Vec<String>,
    resources: Vec<PathBuf>,
    runtime_source: Option<String>,
    runtime_cache: Option<PathBuf>,
    bundle_identifier: Option<String>,
    icon: Option<PathBuf>,
    remove_platform_libs: Vec<PathBuf>,
    minimize_profile: Option<String>,
    verbose: bool,
}

impl ConfigBuilder {
    /// Creates a new config builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the target platform.
    ///
    /// # Required
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Sets the output directory.
    ///
    /// If it already exists it is deleted and recreated when the pipeline
    /// starts.
    ///
    /// # Required
    pub fn out_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.out_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the launcher executable name, without extension.
    ///
    /// # Required
    pub fn executable_name<S: Into<String>>(mut self, name: S) -> Self {
        self.executable_name = Some(name.into());
        self
    }

    /// Sets the fully qualified main class.
    ///
    /// # Required
    pub fn main_class<S: Into<String>>(mut self, main_class: S) -> Self {
        self.main_class = Some(main_class.into());
        self
    }

    /// Sets the classpath entries, in launch order.
    ///
    /// # Required
    ///
    /// At least one entry must be given.
    pub fn classpath(mut self, classpath: Vec<PathBuf>) -> Self {
        self.classpath = classpath;
        self
    }

    /// Sets the VM arguments, in launch order.
    ///
    /// Arguments missing a leading `-` are normalized when the launch config
    /// is emitted.
    pub fn vm_args(mut self, vm_args: Vec<String>) -> Self {
        self.vm_args = vm_args;
        self
    }

    /// Sets auxiliary resource files and directories.
    pub fn resources(mut self, resources: Vec<PathBuf>) -> Self {
        self.resources = resources;
        self
    }

    /// Sets the runtime source: a local directory, a local zip archive, or
    /// an `http(s)` URL.
    ///
    /// # Required
    pub fn runtime_source<S: Into<String>>(mut self, source: S) -> Self {
        self.runtime_source = Some(source.into());
        self
    }

    /// Sets a persistent cache directory for the extracted runtime.
    ///
    /// The cache is keyed only by this path; no fingerprinting ties it to a
    /// runtime version. Reuse one path per runtime.
    pub fn runtime_cache<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.runtime_cache = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets an explicit macOS bundle identifier.
    ///
    /// Default: the main class with its final dot-delimited segment stripped.
    pub fn bundle_identifier<S: Into<String>>(mut self, identifier: S) -> Self {
        self.bundle_identifier = Some(identifier.into());
        self
    }

    /// Sets the macOS icon file, copied to `Contents/Resources/icons.icns`.
    pub fn icon<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.icon = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets archives whose native libraries are filtered by word size after
    /// packaging. Ignored on macOS.
    pub fn remove_platform_libs(mut self, archives: Vec<PathBuf>) -> Self {
        self.remove_platform_libs = archives;
        self
    }

    /// Sets the minimize profile handed to the runtime minimizer.
    ///
    /// Default: `soft`
    pub fn minimize_profile<S: Into<String>>(mut self, profile: S) -> Self {
        self.minimize_profile = Some(profile.into());
        self
    }

    /// Enables per-file detail while filtering archives.
    ///
    /// Default: false
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builds and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is missing, the classpath is
    /// empty, the minimize profile is unknown, or a default bundle
    /// identifier cannot be derived for a macOS target.
    pub fn build(self) -> Result<Config> {
        let platform = self.platform.context("platform is required")?;
        let out_dir = self.out_dir.context("out_dir is required")?;
        let executable_name = self.executable_name.context("executable_name is required")?;
        let main_class = self.main_class.context("main_class is required")?;
        let runtime_source = self.runtime_source.context("runtime_source is required")?;

        if executable_name.is_empty() {
            return Err(Error::Config("executable_name must not be empty".into()));
        }
        if main_class.is_empty() {
            return Err(Error::Config("main_class must not be empty".into()));
        }
        if self.classpath.is_empty() {
            return Err(Error::Config(
                "classpath requires at least one entry".into(),
            ));
        }

        let minimize_profile = self.minimize_profile.unwrap_or_else(|| "soft".to_string());
        if !minimize::is_profile(&minimize_profile) {
            return Err(Error::Config(format!(
                "unknown minimize profile '{}', expected one of: {}",
                minimize_profile,
                minimize::profile_names().join(", ")
            )));
        }

        // The default bundle identifier strips the final segment of the main
        // class; catch undecorated class names before the pipeline runs.
        if platform == Platform::MacOS
            && self.bundle_identifier.is_none()
            && !main_class.contains('.')
        {
            return Err(Error::Config(format!(
                "cannot derive a bundle identifier from main class '{}'; pass one explicitly",
                main_class
            )));
        }

        Ok(Config::new(
            platform,
            out_dir,
            executable_name,
            main_class,
            self.classpath,
            self.vm_args,
            self.resources,
            runtime_source,
            self.runtime_cache,
            self.bundle_identifier,
            self.icon,
            self.remove_platform_libs,
            minimize_profile,
            self.verbose,
        ))
    }
}
