//! Compiler option configuration

/// Options every compile gets unless configured otherwise
pub const DEFAULT_OPTIONS: &[&str] = &["--target", "ES5", "--noImplicitAny"];

/// Process-wide compiler options, fixed once the orchestrator is built.
///
/// Per-call options are appended after these; nothing is removed, so a
/// repeated flag is left to the compiler (last one wins for `tsc`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    args: Vec<String>,
}

impl CompilerOptions {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// No default options at all
    pub fn empty() -> Self {
        Self { args: Vec::new() }
    }

    pub fn with_option(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Defaults followed by `overrides`
    pub fn merged(&self, overrides: &[String]) -> Vec<String> {
        self.args.iter().chain(overrides).cloned().collect()
    }
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self::new(DEFAULT_OPTIONS.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(
            CompilerOptions::default().args(),
            ["--target", "ES5", "--noImplicitAny"]
        );
    }

    #[test]
    fn test_merge_appends_overrides() {
        let options = CompilerOptions::default().with_option("--strict");
        let merged = options.merged(&["--target".to_string(), "ES2015".to_string()]);
        assert_eq!(
            merged,
            ["--target", "ES5", "--noImplicitAny", "--strict", "--target", "ES2015"]
        );
    }

    #[test]
    fn test_empty() {
        assert!(CompilerOptions::empty().merged(&[]).is_empty());
    }
}
