//! Process-launch descriptor.
//!
//! A [`Launch`] is built from an argument vector and stream destinations.
//! [`Launch::prepare`] decides console detachment and replaces the argument
//! vector with the quoted command line handed to `CreateProcessW`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::name::display_name;
use crate::quote::quote;

/// `DETACHED_PROCESS`: the child does not inherit the parent's console.
pub const DETACHED_PROCESS: u32 = 0x0000_0008;

/// Where a child's standard stream goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stdio {
    /// The parent's own stream.
    Inherit,
    /// The null device.
    #[default]
    Null,
    /// A file: read for stdin, created or appended for stdout and stderr.
    File(PathBuf),
}

impl Stdio {
    pub fn is_inherit(&self) -> bool {
        matches!(self, Stdio::Inherit)
    }
}

/// True when none of the three streams is the parent's own, in which case
/// the child has no use for the parent's console.
pub fn should_detach(stdin: &Stdio, stdout: &Stdio, stderr: &Stdio) -> bool {
    !stdin.is_inherit() && !stdout.is_inherit() && !stderr.is_inherit()
}

/// A process to launch. The first argument is the program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Launch {
    pub args: Vec<String>,
    #[serde(default)]
    pub stdin: Stdio,
    #[serde(default)]
    pub stdout: Stdio,
    #[serde(default)]
    pub stderr: Stdio,
    #[serde(default)]
    pub creation_flags: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl Launch {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn stdin(mut self, stdio: Stdio) -> Self {
        self.stdin = stdio;
        self
    }

    pub fn stdout(mut self, stdio: Stdio) -> Self {
        self.stdout = stdio;
        self
    }

    pub fn stderr(mut self, stdio: Stdio) -> Self {
        self.stderr = stdio;
        self
    }

    pub fn creation_flags(mut self, flags: u32) -> Self {
        self.creation_flags = flags;
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Display name of the program, if there is one.
    pub fn name(&self) -> Option<&str> {
        self.args.first().map(|program| display_name(program))
    }

    pub fn detaches(&self) -> bool {
        should_detach(&self.stdin, &self.stdout, &self.stderr)
    }

    /// Fold the detachment decision into the creation flags and quote the
    /// argument vector into the command line.
    pub fn prepare(self) -> Prepared {
        let mut creation_flags = self.creation_flags;
        if self.detaches() {
            creation_flags |= DETACHED_PROCESS;
        }

        let name = self.name().unwrap_or_default().to_owned();
        let cmdline = quote(&self.args);
        debug!(
            name = %name,
            cmdline = %cmdline,
            creation_flags,
            "prepared launch"
        );

        Prepared {
            name,
            cmdline,
            creation_flags,
            stdin: self.stdin,
            stdout: self.stdout,
            stderr: self.stderr,
            cwd: self.cwd,
        }
    }
}

/// A launch whose command line has been computed. The argument vector is
/// gone; [`Prepared::argstring`] is the only source of arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prepared {
    name: String,
    cmdline: String,
    creation_flags: u32,
    stdin: Stdio,
    stdout: Stdio,
    stderr: Stdio,
    cwd: Option<PathBuf>,
}

impl Prepared {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The command line to hand to the process-creation call.
    pub fn argstring(&self) -> &str {
        &self.cmdline
    }

    pub fn creation_flags(&self) -> u32 {
        self.creation_flags
    }

    pub fn is_detached(&self) -> bool {
        self.creation_flags & DETACHED_PROCESS != 0
    }

    pub fn stdin(&self) -> &Stdio {
        &self.stdin
    }

    pub fn stdout(&self) -> &Stdio {
        &self.stdout
    }

    pub fn stderr(&self) -> &Stdio {
        &self.stderr
    }

    pub fn cwd(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }
}
