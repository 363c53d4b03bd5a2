use crate::error::OpenduoError;
use crate::launcher;
use crate::layout::InstallLayout;
use crate::policy::HardeningPolicy;
use anyhow::{anyhow, Result};
use std::convert::Infallible;
use std::ffi::OsString;

/// Launch the hardened agent with `args`. Only returns on failure.
pub fn execute(args: &[OsString]) -> Result<Infallible> {
    let policy = HardeningPolicy::load()?;
    let layout = InstallLayout::discover(&policy)?;

    match launcher::run(&policy, &layout, args) {
        Err(e @ (OpenduoError::BinaryNotFound { .. } | OpenduoError::NotExecutable { .. })) => {
            match policy.reinstall_hint() {
                Some(hint) => Err(anyhow!("{} (try reinstalling: {})", e, hint)),
                None => Err(e.into()),
            }
        }
        other => Ok(other?),
    }
}
