//! Central Bundle - Maven Central upload bundle builder.
//!
//! This binary stages, signs, checksums and zips a POM and its artifacts into
//! `target/central-publishing/central-bundle.zip`.

use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Run CLI and get exit code
    let exit_code = match central_bundler::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
