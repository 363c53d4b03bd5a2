//! Restricted models catalog.
//!
//! Fetches the provider-keyed catalog from models.dev (or a compatible
//! service), keeps only the allow-listed providers and writes the result as
//! the artifact the launcher points the agent at.

use crate::error::{OpenduoError, Result};
use crate::version;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Inputs of a catalog run
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    pub base_url: String,
    pub allowed_providers: Vec<String>,
    pub output: PathBuf,
}

/// A kept provider and how many models it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeptProvider {
    pub id: String,
    pub model_count: usize,
}

/// Result of filtering an upstream catalog against the allow-list
#[derive(Debug, Clone, Default)]
pub struct FilteredCatalog {
    pub providers: Map<String, Value>,
    /// Kept providers, in allow-list order
    pub kept: Vec<KeptProvider>,
    /// Allow-listed providers the upstream catalog does not have
    pub missing: Vec<String>,
    /// Upstream providers outside the allow-list
    pub skipped: Vec<String>,
}

/// URL of the catalog document for a service base URL
pub fn catalog_url(base_url: &str) -> String {
    format!("{}/api.json", base_url.trim_end_matches('/'))
}

/// Fetch the full upstream catalog as a provider-keyed JSON object.
pub fn fetch_catalog(base_url: &str) -> Result<Map<String, Value>> {
    let url = catalog_url(base_url);
    tracing::debug!(%url, "fetching models catalog");

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(format!("{}/{}", version::PKG_NAME, version::VERSION))
        .build()?;
    let response = client.get(&url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(OpenduoError::CatalogFetch {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        });
    }

    let body = response.text()?;
    parse_catalog(&body)
}

/// Parse a raw catalog document; only a top-level JSON object is accepted.
pub fn parse_catalog(raw_json: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(raw_json)? {
        Value::Object(map) => Ok(map),
        _ => Err(OpenduoError::CatalogNotAnObject),
    }
}

/// Keep only the allow-listed providers, copying each descriptor verbatim.
///
/// Allow-listed providers missing upstream are reported, never synthesized.
pub fn filter_catalog(upstream: &Map<String, Value>, allowed: &[String]) -> FilteredCatalog {
    let mut filtered = FilteredCatalog::default();

    for id in allowed {
        if filtered.providers.contains_key(id) || filtered.missing.contains(id) {
            continue;
        }
        match upstream.get(id) {
            // Only object descriptors count; `null` or scalars are treated as absent
            Some(descriptor) if descriptor.is_object() => {
                filtered.kept.push(KeptProvider {
                    id: id.clone(),
                    model_count: model_count(descriptor),
                });
                filtered.providers.insert(id.clone(), descriptor.clone());
            }
            _ => filtered.missing.push(id.clone()),
        }
    }

    filtered.skipped = upstream
        .keys()
        .filter(|id| !allowed.contains(id))
        .cloned()
        .collect();

    filtered
}

fn model_count(descriptor: &Value) -> usize {
    descriptor
        .get("models")
        .and_then(Value::as_object)
        .map_or(0, Map::len)
}

/// Produce the pretty-printed artifact text.
///
/// Providers keep allow-list order and descriptors keep upstream key order and
/// number text, with 2-space indentation and a trailing newline.
pub fn canonicalize_json(providers: &Map<String, Value>) -> Result<String> {
    let json = serde_json::to_string_pretty(providers)?;
    Ok(format!("{json}\n"))
}

/// Write the artifact, replacing any existing file.
pub fn write_catalog(canonical_json: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, canonical_json)?;
    Ok(())
}

/// Fetch, filter and write the restricted catalog.
pub fn run_generate(options: &CatalogOptions) -> Result<FilteredCatalog> {
    println!(
        "Fetching models catalog from {} ...",
        catalog_url(&options.base_url)
    );
    let upstream = fetch_catalog(&options.base_url)?;

    let filtered = filter_catalog(&upstream, &options.allowed_providers);
    print_summary(&filtered);

    let canonical = canonicalize_json(&filtered.providers)?;
    write_catalog(&canonical, &options.output)?;
    println!("\nWritten to {}", options.output.display());

    Ok(filtered)
}

/// Check that the artifact on disk matches a fresh fetch. Writes nothing.
pub fn run_check(options: &CatalogOptions) -> Result<bool> {
    println!(
        "Fetching models catalog from {} for verification ...",
        catalog_url(&options.base_url)
    );
    let upstream = fetch_catalog(&options.base_url)?;
    let filtered = filter_catalog(&upstream, &options.allowed_providers);
    let fresh = canonicalize_json(&filtered.providers)?;

    let up_to_date = match fs::read_to_string(&options.output) {
        Ok(committed) => snapshot_matches(&fresh, &committed),
        Err(e) => {
            tracing::debug!(path = %options.output.display(), error = %e, "no catalog to compare");
            false
        }
    };

    if up_to_date {
        println!("{} is up to date.", options.output.display());
    } else {
        eprintln!(
            "{} has drifted from the upstream catalog. Regenerate it with openduo-generate-models.",
            options.output.display()
        );
    }

    Ok(up_to_date)
}

/// Byte comparison of a fresh canonical catalog against a committed one
pub fn snapshot_matches(fresh_canonical: &str, committed: &str) -> bool {
    fresh_canonical == committed
}

fn print_summary(filtered: &FilteredCatalog) {
    for kept in &filtered.kept {
        println!("  ✓ {}: {} models", kept.id, kept.model_count);
    }
    for id in &filtered.missing {
        eprintln!("  ⚠ Provider '{}' not found in catalog", id);
    }
    println!(
        "  ✗ Skipped {} providers: {}",
        filtered.skipped.len(),
        filtered.skipped.join(", ")
    );
}
