use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A single element of an argument vector.
///
/// git and rsync are order sensitive, so a [`CommandLine`] keeps its
/// arguments in insertion order and renders each variant to exactly the
/// argv elements it stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Arg {
    /// A positional value, passed through unchanged (`origin`, a path, a ref).
    Value(String),
    /// A bare flag (`--prune`, `-ar`).
    Flag(String),
    /// A flag whose value is joined with `=` into one element (`--max-count=1`).
    Joined { flag: String, value: String },
    /// A flag followed by its value as a separate element (`--format tar`).
    Separate { flag: String, value: String },
    /// A positional value that carries secrets; rendered verbatim into argv
    /// but shown as `redacted` in logs and error messages.
    Sensitive { value: String, redacted: String },
}

impl Arg {
    fn push_argv(&self, argv: &mut Vec<String>) {
        match self {
            Arg::Value(v) | Arg::Flag(v) => argv.push(v.clone()),
            Arg::Joined { flag, value } => argv.push(format!("{flag}={value}")),
            Arg::Separate { flag, value } => {
                argv.push(flag.clone());
                argv.push(value.clone());
            }
            Arg::Sensitive { value, .. } => argv.push(value.clone()),
        }
    }

    fn push_display(&self, out: &mut Vec<String>) {
        match self {
            Arg::Sensitive { redacted, .. } => out.push(redacted.clone()),
            other => other.push_argv(out),
        }
    }
}

/// Typed description of one external command: program, ordered arguments,
/// working directory and extra environment.
///
/// This is a command *intent*; a [`CommandRunner`](super::CommandRunner)
/// decides where and how it actually runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<Arg>,
    current_dir: Option<PathBuf>,
    env: BTreeMap<String, String>,
}

impl CommandLine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            env: BTreeMap::new(),
        }
    }

    /// Shorthand for `CommandLine::new("git")`.
    pub fn git() -> Self {
        Self::new("git")
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.args.push(Arg::Value(value.into()));
        self
    }

    /// Append a path as a positional value.
    pub fn path(self, path: impl AsRef<Path>) -> Self {
        let rendered = path.as_ref().to_string_lossy().into_owned();
        self.value(rendered)
    }

    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.args.push(Arg::Flag(flag.into()));
        self
    }

    pub fn joined(mut self, flag: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(Arg::Joined {
            flag: flag.into(),
            value: value.into(),
        });
        self
    }

    pub fn separate(mut self, flag: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(Arg::Separate {
            flag: flag.into(),
            value: value.into(),
        });
        self
    }

    pub fn sensitive(mut self, value: impl Into<String>, redacted: impl Into<String>) -> Self {
        self.args.push(Arg::Sensitive {
            value: value.into(),
            redacted: redacted.into(),
        });
        self
    }

    /// Run the command inside `dir`.
    pub fn within(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in vars {
            self.env.insert(k.into(), v.into());
        }
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[Arg] {
        &self.args
    }

    pub fn current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }

    pub fn env_vars(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    /// Arguments exactly as they are handed to the process (program excluded).
    pub fn to_argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        for arg in &self.args {
            arg.push_argv(&mut argv);
        }
        argv
    }

    /// Program followed by its arguments, secrets included.
    pub fn to_full_argv(&self) -> Vec<String> {
        let mut argv = vec![self.program.clone()];
        argv.extend(self.to_argv());
        argv
    }

    /// Arguments with sensitive values redacted.
    pub fn display_argv(&self) -> Vec<String> {
        let mut out = vec![self.program.clone()];
        for arg in &self.args {
            arg.push_display(&mut out);
        }
        out
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_argv().join(" "))
    }
}
