//! Launch configuration emission.
//!
//! `config.json` is the fixed contract read by the launcher at process
//! start: the classpath entry base names in order, the main class, and the
//! VM arguments, each normalized to carry a leading `-`. Field names and
//! the dash normalization are part of the external protocol.

use crate::bundler::error::{ErrorExt, Result};
use crate::bundler::settings::Config;
use crate::bundler::OutputLocations;
use serde::{Deserialize, Serialize};

/// The document the launcher reads at startup.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchConfig {
    /// Classpath entry base names, order preserved
    class_path: Vec<String>,

    /// Fully qualified main class
    main_class: String,

    /// VM arguments, each starting with `-`
    vm_args: Vec<String>,
}

impl LaunchConfig {
    /// Derives the launch document from the bundling configuration.
    pub fn from_config(config: &Config) -> Self {
        let class_path = config
            .classpath()
            .iter()
            .map(|entry| match entry.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => entry.to_string_lossy().into_owned(),
            })
            .collect();

        let vm_args = config.vm_args().iter().map(|arg| normalize(arg)).collect();

        Self {
            class_path,
            main_class: config.main_class().to_string(),
            vm_args,
        }
    }
}

/// VM arguments may be given without the leading dash; the launcher expects
/// them dashed.
fn normalize(arg: &str) -> String {
    if arg.starts_with('-') {
        arg.to_string()
    } else {
        format!("-{}", arg)
    }
}

/// Writes `config.json` into the resources directory.
pub async fn write(config: &Config, output: &OutputLocations) -> Result<()> {
    let document = serde_json::to_string_pretty(&LaunchConfig::from_config(config))?;

    let path = output.resources_dir().join("config.json");
    tokio::fs::write(&path, document)
        .await
        .fs_context("writing launch config", &path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::{ConfigBuilder, Platform};

    #[test]
    fn document_round_trip() {
        let config = ConfigBuilder::new()
            .platform(Platform::Linux64)
            .out_dir("out")
            .executable_name("app")
            .main_class("com.x.Main")
            .classpath(vec!["libs/A".into(), "B".into()])
            .vm_args(vec!["Xmx512m".into()])
            .runtime_source("/opt/jdk")
            .build()
            .unwrap();

        let document = LaunchConfig::from_config(&config);
        let json = serde_json::to_string(&document).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed["classPath"], serde_json::json!(["A", "B"]));
        assert_eq!(parsed["mainClass"], "com.x.Main");
        assert_eq!(parsed["vmArgs"], serde_json::json!(["-Xmx512m"]));
    }

    #[test]
    fn dashed_args_are_left_alone() {
        assert_eq!(normalize("-Xmx512m"), "-Xmx512m");
        assert_eq!(normalize("Xmx512m"), "-Xmx512m");
        assert_eq!(normalize("-Dkey=value"), "-Dkey=value");
    }
}
