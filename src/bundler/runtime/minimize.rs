//! Runtime minimization.
//!
//! Trims files unneeded at execution time from a freshly extracted runtime.
//! A named profile selects the rule set; the `soft` profile drops tooling
//! and demo payloads, `hard` additionally drops diagnostics and agent
//! libraries at the cost of debuggability of the bundled app.

use crate::bundler::error::{Error, Result};
use crate::bundler::settings::Config;
use crate::bundler::utils::fs;
use std::path::Path;

/// A named minimization rule set.
struct Profile {
    name: &'static str,
    /// Paths relative to the installed runtime directory, deleted if present.
    remove: &'static [&'static str],
}

const SOFT_REMOVE: &[&str] = &[
    "demo",
    "sample",
    "man",
    "lib/missioncontrol",
    "lib/visualvm",
    "lib/ant-javafx.jar",
    "lib/javafx-mx.jar",
    "lib/jconsole.jar",
    "lib/oblique-fonts",
    "bin/rmid",
    "bin/rmid.exe",
    "bin/policytool",
    "bin/policytool.exe",
];

const HARD_REMOVE: &[&str] = &[
    "demo",
    "sample",
    "man",
    "lib/missioncontrol",
    "lib/visualvm",
    "lib/ant-javafx.jar",
    "lib/javafx-mx.jar",
    "lib/jconsole.jar",
    "lib/oblique-fonts",
    "bin/rmid",
    "bin/rmid.exe",
    "bin/policytool",
    "bin/policytool.exe",
    "lib/jfr",
    "lib/jfr.jar",
    "lib/libjdwp.so",
    "lib/libjdwp.dylib",
    "bin/jdwp.dll",
    "THIRDPARTYLICENSEREADME.txt",
    "THIRDPARTYLICENSEREADME-JAVAFX.txt",
];

const PROFILES: &[Profile] = &[
    Profile {
        name: "soft",
        remove: SOFT_REMOVE,
    },
    Profile {
        name: "hard",
        remove: HARD_REMOVE,
    },
];

/// Returns whether a profile name is known.
pub fn is_profile(name: &str) -> bool {
    PROFILES.iter().any(|p| p.name == name)
}

/// Returns the known profile names.
pub fn profile_names() -> Vec<&'static str> {
    PROFILES.iter().map(|p| p.name).collect()
}

/// Trims the runtime installed under the storage path according to the
/// configured profile.
///
/// Invoked once per fresh acquisition; a cached runtime is reused without
/// re-minimizing. Listed paths that do not exist are skipped.
pub async fn minimize_runtime(storage: &Path, config: &Config) -> Result<()> {
    let profile = PROFILES
        .iter()
        .find(|p| p.name == config.minimize_profile())
        .ok_or_else(|| {
            Error::Config(format!(
                "unknown minimize profile '{}'",
                config.minimize_profile()
            ))
        })?;

    log::info!("Minimizing runtime ...");

    let runtime_root = storage.join(super::RUNTIME_DIR);

    for rel in profile.remove {
        let target = runtime_root.join(rel);
        if !target.exists() {
            continue;
        }

        if config.verbose() {
            log::debug!("  # Removing '{}'", target.display());
        }

        if target.is_dir() {
            fs::remove_dir_all(&target).await?;
        } else {
            tokio::fs::remove_file(&target).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::{ConfigBuilder, Platform};

    fn config(profile: &str) -> Config {
        ConfigBuilder::new()
            .platform(Platform::Linux64)
            .out_dir("out")
            .executable_name("app")
            .main_class("com.example.Main")
            .classpath(vec!["app.jar".into()])
            .runtime_source("/opt/jdk")
            .minimize_profile(profile)
            .build()
            .unwrap()
    }

    #[test]
    fn known_profiles() {
        assert!(is_profile("soft"));
        assert!(is_profile("hard"));
        assert!(!is_profile("aggressive"));
    }

    #[tokio::test]
    async fn soft_profile_trims_tooling_but_keeps_the_vm() {
        let dir = tempfile::tempdir().unwrap();
        let runtime = dir.path().join(crate::bundler::runtime::RUNTIME_DIR);
        std::fs::create_dir_all(runtime.join("bin")).unwrap();
        std::fs::create_dir_all(runtime.join("demo/applets")).unwrap();
        std::fs::create_dir_all(runtime.join("lib")).unwrap();
        std::fs::write(runtime.join("bin/java"), b"vm").unwrap();
        std::fs::write(runtime.join("lib/rt.jar"), b"rt").unwrap();
        std::fs::write(runtime.join("lib/jconsole.jar"), b"jc").unwrap();

        minimize_runtime(dir.path(), &config("soft")).await.unwrap();

        assert!(runtime.join("bin/java").is_file());
        assert!(runtime.join("lib/rt.jar").is_file());
        assert!(!runtime.join("demo").exists());
        assert!(!runtime.join("lib/jconsole.jar").exists());
    }
}
