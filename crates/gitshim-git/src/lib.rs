//! System-git runner: every operation shells out to the `git` binary.

mod scope;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    sync::Arc,
};
use log::{debug, error, trace};
use gitshim_core::settings::{ScopeMode, ToolConfig};
use gitshim_core::{CommandOutput, Invocation, Repo, Result, ToolError};

pub use crate::scope::CwdGuard;

/* ============================== constructors ============================== */

/// Handle on `dir` driven by system git, configured from the user's config file.
pub fn repo(dir: impl Into<PathBuf>) -> Repo {
    repo_with(dir, &ToolConfig::load_or_default())
}

pub fn repo_with(dir: impl Into<PathBuf>, cfg: &ToolConfig) -> Repo {
    Repo::new(dir, Arc::new(SystemGit::new(cfg)))
}

/* ============================== implementation ============================== */

pub struct SystemGit {
    program: String,
    env: BTreeMap<String, String>,
    scope: ScopeMode,
}

impl SystemGit {
    pub fn new(cfg: &ToolConfig) -> Self {
        Self { program: cfg.program.clone(), env: cfg.env.clone(), scope: cfg.scope }
    }

    fn launch(&self, inv: &Invocation, cwd: Option<&Path>) -> Result<CommandOutput> {
        let mut cmd = Command::new(&self.program);
        if let Some(c) = cwd { cmd.current_dir(c); }
        cmd.arg(&inv.subcommand)
            .args(&inv.args)
            .envs(&self.env)
            .stdin(Stdio::null());

        debug!("gitshim-git: {} {} {:?} (cwd={:?})", self.program, inv.subcommand, inv.args, inv.cwd);

        let out = cmd.output().map_err(|e| {
            let output = match cwd {
                Some(c) => format!("{e} (cwd={})", c.display()),
                None => e.to_string(),
            };
            error!("gitshim-git: could not launch {}: {output}", self.program);
            ToolError::Tool { subcommand: inv.subcommand.clone(), output }
        })?;
        let captured = CommandOutput { stdout: out.stdout, stderr: out.stderr };
        trace!(
            "gitshim-git: {} exited with {} ({} bytes stdout, {} bytes stderr)",
            inv.subcommand, out.status, captured.stdout.len(), captured.stderr.len()
        );

        if out.status.success() {
            Ok(captured)
        } else {
            let output = captured.combined();
            error!("gitshim-git: {} exited with {}: {}", inv.subcommand, out.status, output.trim_end());
            Err(ToolError::Tool { subcommand: inv.subcommand.clone(), output })
        }
    }
}

impl gitshim_core::Runner for SystemGit {
    fn run(&self, inv: &Invocation) -> Result<CommandOutput> {
        match (inv.cwd.as_deref(), self.scope) {
            (Some(dir), ScopeMode::ProcessCwd) => {
                let _guard = CwdGuard::enter(dir)?;
                self.launch(inv, None)
            }
            (cwd, _) => self.launch(inv, cwd),
        }
    }
}
