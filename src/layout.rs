//! Installation layout: where the wrapped agent and the catalog live.

use crate::error::{OpenduoError, Result};
use crate::policy::HardeningPolicy;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Installation root baked in by the packaging build, if any
const BUILD_ROOT: Option<&str> = option_env!("OPENDUO_ROOT");

/// Files of an installation, resolved against its root
#[derive(Debug, Clone)]
pub struct InstallLayout {
    root: PathBuf,
    agent_binary: PathBuf,
    catalog: PathBuf,
}

impl InstallLayout {
    pub fn new(root: impl Into<PathBuf>, policy: &HardeningPolicy) -> Self {
        let root = root.into();
        Self {
            agent_binary: root.join(&policy.agent.binary),
            catalog: root.join(&policy.catalog.path),
            root,
        }
    }

    /// Locate the installation this launcher belongs to.
    ///
    /// Uses the build-time root when set, otherwise the `libexec` directory
    /// next to the launcher's `bin` directory.
    pub fn discover(policy: &HardeningPolicy) -> Result<Self> {
        if let Some(root) = BUILD_ROOT.filter(|r| !r.is_empty()) {
            return Ok(Self::new(root, policy));
        }

        let exe = std::env::current_exe()?;
        let root = root_for_executable(&exe)?;
        tracing::debug!(root = %root.display(), "installation root");
        Ok(Self::new(root, policy))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Expected path of the wrapped agent executable
    pub fn agent_binary(&self) -> &Path {
        &self.agent_binary
    }

    /// Path of the restricted models catalog
    pub fn catalog(&self) -> &Path {
        &self.catalog
    }

    /// Return the agent executable if it is present and executable.
    pub fn resolve_agent_binary(&self, agent: &str) -> Result<&Path> {
        let path = self.agent_binary();

        // Follows symlinks: npm installs .bin entries as links
        let metadata = match fs::metadata(path) {
            Ok(m) if m.is_file() => m,
            _ => {
                return Err(OpenduoError::BinaryNotFound {
                    agent: agent.to_string(),
                    path: path.to_path_buf(),
                })
            }
        };

        if !is_executable(&metadata) {
            return Err(OpenduoError::NotExecutable {
                agent: agent.to_string(),
                path: path.to_path_buf(),
            });
        }

        Ok(path)
    }
}

/// `<prefix>/bin/openduo` -> `<prefix>/libexec`
fn root_for_executable(exe: &Path) -> Result<PathBuf> {
    let exe = fs::canonicalize(exe).unwrap_or_else(|_| exe.to_path_buf());
    let prefix = exe
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| OpenduoError::InstallRoot(format!("{} has no prefix", exe.display())))?;
    Ok(prefix.join("libexec"))
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    metadata.permissions().mode() & 0o111 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    true
}
