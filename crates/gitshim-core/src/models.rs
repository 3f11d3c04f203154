use std::path::{Path, PathBuf};

/// One launch of the external tool: `<program> <subcommand> <args...>`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub subcommand: String,
    pub args: Vec<String>,
    /// Working directory the child must start in. `None` = inherit the caller's.
    pub cwd: Option<PathBuf>,
}

impl Invocation {
    pub fn new<I, S>(subcommand: &str, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            subcommand: subcommand.to_string(),
            args: args.into_iter().map(|s| s.as_ref().to_string()).collect(),
            cwd: None,
        }
    }

    pub fn scoped(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }
}

/// Captured output of a finished invocation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn stdout_str(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    /// stdout followed by stderr, as the tool would have printed them to a terminal.
    pub fn combined(&self) -> String {
        let mut s = String::from_utf8_lossy(&self.stdout).into_owned();
        s.push_str(&String::from_utf8_lossy(&self.stderr));
        s
    }
}

/// Split line-oriented listing output into paths.
///
/// The final `\n` terminates the last entry rather than opening an empty one.
/// Blank lines anywhere are skipped, so an empty path is never produced.
pub fn split_lines(text: &str) -> Vec<String> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n')
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_newline_does_not_yield_empty_path() {
        assert_eq!(split_lines("a.txt\nb.txt\n"), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn missing_trailing_newline_keeps_last_entry() {
        assert_eq!(split_lines("a.txt\nb.txt"), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn empty_listing_yields_nothing() {
        assert!(split_lines("").is_empty());
        assert!(split_lines("\n").is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(split_lines("a.txt\n\nb.txt\n\n"), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn paths_with_spaces_survive() {
        assert_eq!(split_lines("dir/my file.txt\n"), vec!["dir/my file.txt"]);
    }

    #[test]
    fn combined_puts_stdout_first() {
        let out = CommandOutput { stdout: b"out\n".to_vec(), stderr: b"err\n".to_vec() };
        assert_eq!(out.combined(), "out\nerr\n");
    }

    #[test]
    fn scoped_invocation_records_dir() {
        let inv = Invocation::new("add", ["a"]).scoped(Path::new("/tmp/x"));
        assert_eq!(inv.cwd.as_deref(), Some(Path::new("/tmp/x")));
        assert_eq!(inv.args, vec!["a"]);
    }
}
