//! Deploy-time injection of the backend globals into the static pages
//!
//! Each page gets a `<script>` block defining the backend URL and anonymous
//! key right before `</head>`. Pages that already define them are left
//! alone, so running the injector twice changes nothing.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use common::page::{Injection, PageGlobals, inject_globals};
use thiserror::Error;
use tracing::{info, warn};

/// Pages processed in the site directory
pub const PAGES: [&str; 3] = ["index.html", "upload.html", "login.html"];

/// Failure to read or write a page
#[derive(Error, Debug)]
pub enum InjectError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// What happened to one page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Injected,
    AlreadyPresent,
    NoHead,
    Missing,
}

/// Per-page outcomes of one run, in processing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InjectionReport {
    pub pages: Vec<(String, PageOutcome)>,
}

impl InjectionReport {
    pub fn outcome(&self, page: &str) -> Option<PageOutcome> {
        self.pages
            .iter()
            .find(|(name, _)| name == page)
            .map(|(_, outcome)| *outcome)
    }

    pub fn count(&self, outcome: PageOutcome) -> usize {
        self.pages.iter().filter(|(_, o)| *o == outcome).count()
    }
}

/// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY`; a missing value becomes empty
pub fn globals_from_env() -> PageGlobals {
    let read = |name: &str| match std::env::var(name) {
        Ok(value) => value,
        Err(_) => {
            warn!("{} is not set, injecting an empty value", name);
            String::new()
        }
    };

    PageGlobals {
        url: read("SUPABASE_URL"),
        anon_key: read("SUPABASE_ANON_KEY"),
    }
}

/// Inject the globals into every page of `site_dir`
pub fn inject_site(site_dir: &Path, globals: &PageGlobals) -> Result<InjectionReport, InjectError> {
    let mut report = InjectionReport::default();

    for page in PAGES {
        let outcome = inject_page(&site_dir.join(page), globals)?;
        report.pages.push((page.to_string(), outcome));
    }

    Ok(report)
}

/// Inject the globals into one page file
pub fn inject_page(path: &Path, globals: &PageGlobals) -> Result<PageOutcome, InjectError> {
    let html = match fs::read_to_string(path) {
        Ok(html) => html,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("{} not found, skipping", path.display());
            return Ok(PageOutcome::Missing);
        }
        Err(source) => {
            return Err(InjectError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match inject_globals(&html, globals) {
        Injection::Injected(updated) => {
            fs::write(path, updated).map_err(|source| InjectError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Injected backend globals into {}", path.display());
            Ok(PageOutcome::Injected)
        }
        Injection::AlreadyPresent => {
            info!("{} already has the backend globals", path.display());
            Ok(PageOutcome::AlreadyPresent)
        }
        Injection::NoHead => {
            warn!("{} has no </head>, left unchanged", path.display());
            Ok(PageOutcome::NoHead)
        }
    }
}
