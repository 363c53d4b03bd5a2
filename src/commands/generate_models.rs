use crate::catalog::{self, CatalogOptions};
use crate::cli::GenerateModelsCli;
use crate::error::Result;
use crate::layout::InstallLayout;
use crate::policy::HardeningPolicy;

/// Options for a catalog run: CLI values first, then the policy defaults
pub fn options(cli: &GenerateModelsCli, policy: &HardeningPolicy) -> CatalogOptions {
    let base_url = cli
        .base_url
        .clone()
        .filter(|url| !url.is_empty())
        .unwrap_or_else(|| policy.catalog.source_url.clone());

    CatalogOptions {
        base_url,
        allowed_providers: policy.catalog.allowed_providers.clone(),
        output: InstallLayout::new(&cli.root, policy).catalog().to_path_buf(),
    }
}

/// Generate (or with `--check`, verify) the restricted catalog.
///
/// Returns `false` when a check finds drift.
pub fn execute(cli: &GenerateModelsCli) -> Result<bool> {
    let policy = HardeningPolicy::load()?;
    let options = options(cli, &policy);

    if cli.check {
        return catalog::run_check(&options);
    }

    catalog::run_generate(&options)?;
    Ok(true)
}
