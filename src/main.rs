//! Bitcoin Compiler packager - builds the macOS .app bundle with PyInstaller.
//!
//! This binary drives the whole packaging sequence: toolchain check,
//! PyInstaller build, bundle validation, optional launch test, and
//! distribution guidance.

use std::process;

use bitcoin_compiler_packager::cli;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

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
