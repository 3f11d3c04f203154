//! gitshim core: the repository handle, errors, the runner seam, config and logging setup.

pub mod models;
pub mod settings;
pub mod logging;

use std::{path::{Path, PathBuf}, sync::Arc};
use log::{debug, trace};
pub use crate::models::{CommandOutput, Invocation};

#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// The tool exited non-zero or could not be launched. `output` is its verbatim diagnostic text.
    #[error("{subcommand} failed: {output}")]
    Tool { subcommand: String, output: String },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("non-utf8 path: {}", .0.display())]
    NonUtf8Path(PathBuf),
}

pub type Result<T> = std::result::Result<T, ToolError>;

/// Launches the external tool. Implementations block until the child exits.
pub trait Runner: Send + Sync {
    fn run(&self, inv: &Invocation) -> Result<CommandOutput>;
}

/// A directory understood to hold a working copy, plus the runner used to drive it.
///
/// Creating a handle touches nothing on disk; the directory need not exist yet.
#[derive(Clone)]
pub struct Repo {
    dir: PathBuf,
    runner: Arc<dyn Runner>,
}

impl Repo {
    pub fn new(dir: impl Into<PathBuf>, runner: Arc<dyn Runner>) -> Self {
        let dir = dir.into();
        debug!("gitshim-core: Repo created for {}", dir.display());
        Self { dir, runner }
    }

    #[inline]
    pub fn dir(&self) -> &Path { &self.dir }

    fn path_str(p: &Path) -> Result<&str> {
        p.to_str().ok_or_else(|| ToolError::NonUtf8Path(p.to_path_buf()))
    }

    fn run_scoped<I, S>(&self, subcommand: &str, args: I) -> Result<CommandOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.runner.run(&Invocation::new(subcommand, args).scoped(&self.dir))
    }

    /// `clone <dir> <extra...>`, run from the caller's working directory.
    ///
    /// Returns a handle on the new working copy: the first extra argument when it
    /// names a destination, otherwise the directory git derives from the source.
    /// Options therefore go after the destination.
    pub fn clone_repo<I, S>(&self, extra: I) -> Result<(Repo, CommandOutput)>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let source = Self::path_str(&self.dir)?;
        let extra: Vec<String> = extra.into_iter().map(|s| s.as_ref().to_string()).collect();
        let mut args = Vec::with_capacity(extra.len() + 1);
        args.push(source.to_string());
        args.extend(extra.iter().cloned());

        let out = self.runner.run(&Invocation::new("clone", &args))?;
        let dest = clone_destination(source, &extra);
        debug!("gitshim-core: cloned {} -> {}", self.dir.display(), dest.display());
        Ok((Repo { dir: dest, runner: Arc::clone(&self.runner) }, out))
    }

    /// Stage `paths` in this working copy.
    pub fn add<I, S>(&self, paths: I) -> Result<CommandOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run_scoped("add", paths)
    }

    pub fn commit(&self, message: &str) -> Result<CommandOutput> {
        self.run_scoped("commit", ["-m", message])
    }

    /// Stage every file git does not track yet, honouring ignore rules.
    /// Returns the staged paths.
    pub fn add_untracked(&self) -> Result<Vec<String>> {
        self.add_listed(["--others", "--exclude-standard"])
    }

    /// Stage every tracked file with unstaged modifications. Returns the staged paths.
    pub fn add_modified(&self) -> Result<Vec<String>> {
        self.add_listed(["-m"])
    }

    fn add_listed<const N: usize>(&self, list_args: [&str; N]) -> Result<Vec<String>> {
        let listing = self.run_scoped("ls-files", list_args)?;
        let files = models::split_lines(&listing.stdout_str());
        trace!("gitshim-core: ls-files {:?} -> {} paths", list_args, files.len());
        if files.is_empty() {
            return Ok(files);
        }
        self.add(&files)?;
        Ok(files)
    }
}

/// Where `git clone <source> <extra...>` puts the working copy.
fn clone_destination(source: &str, extra: &[String]) -> PathBuf {
    match extra.first() {
        Some(first) if !first.starts_with('-') => PathBuf::from(first),
        _ => PathBuf::from(humanish(source)),
    }
}

// git's rule: last path component, without a trailing "/", "/.git" or ".git".
fn humanish(source: &str) -> &str {
    let s = source.trim_end_matches('/');
    let s = s.strip_suffix("/.git").unwrap_or(s);
    let s = s.trim_end_matches('/');
    let base = s.rsplit(['/', ':']).next().unwrap_or(s);
    base.strip_suffix(".git").unwrap_or(base)
}
