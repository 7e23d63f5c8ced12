//! Command line argument parsing and validation.

use crate::bundler::{Config, ConfigBuilder, Platform};
use clap::Parser;
use std::path::PathBuf;

/// Self-contained platform bundler for JVM applications
#[derive(Parser, Debug)]
#[command(
    name = "jbundle",
    version,
    about = "Bundles a JVM application and a JRE into a platform-native distributable",
    long_about = "Takes an application classpath and a JRE (local directory, local zip, or URL)
and bundles them into a platform-specific distributable directory, executable
on machines without an installed runtime.

Usage:
  jbundle --platform linux64 --jre https://example.com/jdk.zip \\
      --executable myapp --classpath myapp.jar --mainclass com.example.Main \\
      --outdir out/myapp
  jbundle --platform macos --jre /opt/jdk --executable MyApp \\
      --classpath myapp.jar --mainclass com.example.Main \\
      --icon icon.icns --outdir out/MyApp.app

A failed run may leave a partially built output directory behind."
)]
pub struct Args {
    /// Target platform: windows32, windows64, linux32, linux64, macos
    #[arg(long, value_name = "PLATFORM")]
    pub platform: String,

    /// Output directory for the distributable (deleted and recreated)
    #[arg(long, value_name = "DIR")]
    pub outdir: PathBuf,

    /// Name of the launcher executable, without extension
    #[arg(long, value_name = "NAME")]
    pub executable: String,

    /// Fully qualified main class
    #[arg(long = "mainclass", value_name = "CLASS")]
    pub main_class: String,

    /// Classpath entry (file or directory); repeat to add more, order kept
    #[arg(long = "classpath", value_name = "PATH")]
    pub classpath: Vec<PathBuf>,

    /// VM argument passed to the bundled runtime; repeat to add more
    #[arg(long = "vmargs", value_name = "ARG")]
    pub vm_args: Vec<String>,

    /// Auxiliary file or directory copied next to the classpath
    #[arg(long = "resources", value_name = "PATH")]
    pub resources: Vec<PathBuf>,

    /// JRE source: local directory, local zip archive, or http(s) URL
    #[arg(long = "jre", value_name = "PATH|URL")]
    pub jre: String,

    /// Cache directory for the extracted JRE, reused across runs.
    ///
    /// The cache is keyed only by this path; use one directory per JRE.
    #[arg(long = "cachejre", value_name = "DIR")]
    pub cache_jre: Option<PathBuf>,

    /// macOS bundle identifier (default: main class package)
    #[arg(long = "bundleidentifier", value_name = "ID")]
    pub bundle_identifier: Option<String>,

    /// macOS icon file, copied to Contents/Resources/icons.icns
    #[arg(long = "icon", value_name = "FILE")]
    pub icon: Option<PathBuf>,

    /// Archive whose native libraries are filtered by word size; repeatable
    #[arg(long = "removelibs", value_name = "ARCHIVE")]
    pub remove_libs: Vec<PathBuf>,

    /// JRE minimize profile: soft, hard
    #[arg(long = "minimizejre", value_name = "PROFILE", default_value = "soft")]
    pub minimize_jre: String,

    /// Emit per-file detail while filtering archives
    #[arg(long, short)]
    pub verbose: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.platform.parse::<Platform>().is_err() {
            return Err(format!(
                "Invalid platform: {}. Valid platforms: windows32, windows64, linux32, linux64, macos",
                self.platform
            ));
        }

        if self.executable.is_empty() {
            return Err("Executable name cannot be empty".to_string());
        }

        if self.classpath.is_empty() {
            return Err("At least one --classpath entry is required".to_string());
        }

        Ok(())
    }

    /// Builds the validated bundling configuration
    pub fn into_config(self) -> crate::bundler::Result<Config> {
        let platform: Platform = self.platform.parse()?;

        let mut builder = ConfigBuilder::new()
            .platform(platform)
            .out_dir(self.outdir)
            .executable_name(self.executable)
            .main_class(self.main_class)
            .classpath(self.classpath)
            .vm_args(self.vm_args)
            .resources(self.resources)
            .runtime_source(self.jre)
            .remove_platform_libs(self.remove_libs)
            .minimize_profile(self.minimize_jre)
            .verbose(self.verbose);

        if let Some(cache) = self.cache_jre {
            builder = builder.runtime_cache(cache);
        }
        if let Some(identifier) = self.bundle_identifier {
            builder = builder.bundle_identifier(identifier);
        }
        if let Some(icon) = self.icon {
            builder = builder.icon(icon);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Vec<&'static str> {
        vec![
            "jbundle",
            "--platform",
            "linux64",
            "--outdir",
            "out",
            "--executable",
            "app",
            "--mainclass",
            "com.example.Main",
            "--classpath",
            "app.jar",
            "--jre",
            "/opt/jdk",
        ]
    }

    #[test]
    fn minimal_arguments_validate_and_build() {
        let args = Args::try_parse_from(base_args()).unwrap();
        args.validate().unwrap();
        let config = args.into_config().unwrap();
        assert_eq!(config.platform(), Platform::Linux64);
        assert_eq!(config.executable_name(), "app");
    }

    #[test]
    fn classpath_order_is_preserved() {
        let mut argv = base_args();
        argv.extend(["--classpath", "second.jar"]);
        let args = Args::try_parse_from(argv).unwrap();
        let config = args.into_config().unwrap();
        assert_eq!(
            config.classpath(),
            &[PathBuf::from("app.jar"), PathBuf::from("second.jar")]
        );
    }

    #[test]
    fn invalid_platform_is_rejected() {
        let mut argv = base_args();
        argv[2] = "win64";
        let args = Args::try_parse_from(argv).unwrap();
        assert!(args.validate().is_err());
    }
}
