use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use common::telemetry;
use injector::{PageOutcome, globals_from_env, inject_site};
use tracing::info;

/// Write the backend URL and anonymous key into the static pages
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory holding index.html, upload.html and login.html
    #[arg(default_value = ".")]
    site_dir: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    telemetry::init();

    let site_dir = args.site_dir;

    info!("Injecting backend globals into {}", site_dir.display());

    let globals = globals_from_env();
    let report = inject_site(&site_dir, &globals)?;

    info!(
        "Done: {} injected, {} already present, {} without </head>, {} missing",
        report.count(PageOutcome::Injected),
        report.count(PageOutcome::AlreadyPresent),
        report.count(PageOutcome::NoHead),
        report.count(PageOutcome::Missing)
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_dir_defaults_to_current_directory() {
        let args = Args::try_parse_from(["injector"]).unwrap();
        assert_eq!(args.site_dir, PathBuf::from("."));

        let args = Args::try_parse_from(["injector", "dist"]).unwrap();
        assert_eq!(args.site_dir, PathBuf::from("dist"));
    }
}
