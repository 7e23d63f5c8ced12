//! Pipeline orchestration.
//!
//! [`Packager`] drives the fixed bundling sequence. Steps run strictly in
//! order and any failure aborts the rest of the run; the partially built
//! output is left in place (no rollback).

pub mod executable;
pub mod launch_config;
pub mod resources;

use crate::bundler::error::Result;
use crate::bundler::settings::Config;
use crate::bundler::utils::fs;
use crate::bundler::{archfilter, platform, reduce, runtime, OutputLocations};
use std::path::Path;

/// Operator-supplied predicate marking extra files for removal during the
/// platform-library pass. Checked before any built-in rule.
pub type RemoveLibsFilter = dyn Fn(&Path) -> bool + Send + Sync;

/// Main pipeline orchestrator.
///
/// Owns the validated configuration and runs the bundling steps in a fixed
/// sequence:
///
/// 1. Clean or create the output directory
/// 2. Build the macOS bundle scaffold (no-op elsewhere)
/// 3. Install the launcher and the classpath
/// 4. Emit the launch config read by the launcher
/// 5. Acquire, cache, and minimize the runtime
/// 6. Install declared resources
/// 7. Remove platform-inapplicable libraries
/// 8. Filter listed archives by native word size
///
/// # Examples
///
/// ```no_run
/// use jbundle::bundler::{ConfigBuilder, Packager, Platform};
///
/// # async fn example() -> jbundle::bundler::Result<()> {
/// let config = ConfigBuilder::new()
///     .platform(Platform::Linux64)
///     .out_dir("out/myapp")
///     .executable_name("myapp")
///     .main_class("com.example.Main")
///     .classpath(vec!["myapp.jar".into()])
///     .runtime_source("https://example.com/jdk.zip")
///     .build()?;
///
/// Packager::new(config).pack().await?;
/// # Ok(())
/// # }
/// ```
pub struct Packager {
    config: Config,
    remove_libs_filter: Box<RemoveLibsFilter>,
}

impl Packager {
    /// Creates a packager for a validated configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            remove_libs_filter: Box::new(|_| false),
        }
    }

    /// Installs an application-side filter naming additional files to delete
    /// during the platform-library pass.
    ///
    /// The filter is checked first, before any built-in rule.
    pub fn remove_platform_libs_filter<F>(mut self, filter: F) -> Self
    where
        F: Fn(&Path) -> bool + Send + Sync + 'static,
    {
        self.remove_libs_filter = Box::new(filter);
        self
    }

    /// Returns a reference to the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs the bundling pipeline.
    ///
    /// Aborts at the first failing step. A failed run may leave a partially
    /// built output directory behind.
    pub async fn pack(&self) -> Result<()> {
        let out_dir = self.config.out_dir().to_path_buf();
        let output = OutputLocations::new(out_dir.clone(), out_dir);

        self.clean_output(&output).await?;

        let output = platform::macos::specialize_output(&self.config, output).await?;

        executable::install(&self.config, &output).await?;

        launch_config::write(&self.config, &output).await?;

        runtime::acquire(&self.config, &output).await?;

        resources::install(&self.config, &output).await?;

        reduce::remove_platform_libs(&self.config, &output, self.remove_libs_filter.as_ref())
            .await?;

        archfilter::filter_archives(&self.config).await?;

        log::info!("Done!");
        Ok(())
    }

    /// Recursively deletes the output directory if present, then recreates
    /// it empty. Prior content at that path is destroyed unconditionally.
    async fn clean_output(&self, output: &OutputLocations) -> Result<()> {
        let dir = output.executable_dir();
        if dir.exists() {
            log::info!("Cleaning output directory '{}' ...", dir.display());
        }
        fs::create_dir_all(dir, true).await
    }
}
