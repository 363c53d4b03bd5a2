//! Hardened launch of the wrapped agent.
//!
//! The launcher exports the policy's fixed flags, replaces the agent's inline
//! configuration with the effective configuration and then hands the process
//! over to the agent with the original arguments.

use crate::config;
use crate::error::{OpenduoError, Result};
use crate::layout::InstallLayout;
use crate::policy::HardeningPolicy;
use std::convert::Infallible;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

/// Variables to set on the agent's environment, in the order they are applied.
///
/// `user_config` is the caller's raw inline configuration, if any.
pub fn launch_env(
    policy: &HardeningPolicy,
    layout: &InstallLayout,
    user_config: Option<&str>,
) -> Vec<(String, String)> {
    let mut vars: Vec<(String, String)> = policy
        .env
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    vars.push((
        policy.catalog.path_env.clone(),
        layout.catalog().to_string_lossy().to_string(),
    ));

    let effective = config::effective_config(user_config, &policy.config);
    vars.push((
        policy.agent.config_env.clone(),
        config::to_env_value(&effective),
    ));

    vars
}

/// Build the agent command: resolved binary, forwarded arguments, hardened environment.
///
/// Fails before anything is spawned when the agent binary is missing.
pub fn command(
    policy: &HardeningPolicy,
    layout: &InstallLayout,
    args: &[OsString],
    user_config: Option<&str>,
) -> Result<Command> {
    let binary = layout.resolve_agent_binary(&policy.agent.name)?;
    tracing::debug!(binary = %binary.display(), args = args.len(), "launching agent");

    let mut cmd = Command::new(binary);
    cmd.args(args);
    // Applied over the inherited environment, so caller values never survive
    for (key, value) in launch_env(policy, layout, user_config) {
        cmd.env(key, value);
    }
    Ok(cmd)
}

/// Replace the current process with the agent. Only returns on failure.
pub fn run(
    policy: &HardeningPolicy,
    layout: &InstallLayout,
    args: &[OsString],
) -> Result<Infallible> {
    // A non-UTF-8 value is treated like an absent one: security config only
    let user_config = std::env::var(&policy.agent.config_env).ok();
    let cmd = command(policy, layout, args, user_config.as_deref())?;
    exec(cmd)
}

#[cfg(unix)]
fn exec(mut cmd: Command) -> Result<Infallible> {
    use std::os::unix::process::CommandExt;

    let path = PathBuf::from(cmd.get_program());
    let source = cmd.exec();
    Err(OpenduoError::Exec { path, source })
}

#[cfg(not(unix))]
fn exec(mut cmd: Command) -> Result<Infallible> {
    let path = PathBuf::from(cmd.get_program());
    let status = cmd
        .status()
        .map_err(|source| OpenduoError::Exec { path, source })?;
    std::process::exit(status.code().unwrap_or(1));
}
