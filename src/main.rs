//! Scriptpack - descriptor-driven bundler for script applications.
//!
//! This binary reads a build descriptor, validates it, and assembles a
//! standalone distributable bundle (entry script, module trees, data files,
//! launcher) with proper error handling and artifact verification.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match scriptpack::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    process::exit(exit_code);
}
