#![allow(clippy::print_stdout, clippy::print_stderr)]

//! Print every URL found in stdin along with its normalized form.
//!
//! ```text
//! echo 'see <a href="HTTP://Example.COM/a/../b">x</a>' | cargo run --example detect -- HTML
//! ```
//!
//! Arguments are option names such as `QUOTE_MATCH` or `JSON`. Set
//! `RUST_LOG=url_detector=trace` to watch the scan.
use std::io::{self, Read};
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use url_detector::{DetectorOptions, UrlBase, detect};

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut options = DetectorOptions::empty();
    for name in std::env::args().skip(1) {
        let Some(flag) = DetectorOptions::from_name(&name) else {
            eprintln!("unknown option: {name}");
            return ExitCode::FAILURE;
        };
        options |= flag;
    }

    let mut text = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut text) {
        eprintln!("failed to read stdin: {e}");
        return ExitCode::FAILURE;
    }

    match detect(&text, options) {
        Ok(urls) => {
            for url in urls {
                let normalized = url.normalize();
                println!("{url}\t{}", normalized.full_url());
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("detection failed: {e}");
            ExitCode::FAILURE
        }
    }
}
