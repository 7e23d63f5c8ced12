//! jbundle - self-contained platform distributables for JVM applications.
//!
//! This binary takes an application classpath and a JRE and bundles them into
//! a platform-specific distributable directory, executable on machines without
//! an installed runtime.

mod bundler;
mod cli;
mod error;

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging; pipeline progress is emitted at info level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
