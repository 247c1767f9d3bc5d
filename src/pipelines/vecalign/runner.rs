/*! External tool invocation

[ToolCommand] describes a command line, [ToolRunner] runs it and reports its exit code.
[ProcessRunner] is the real thing, blocking until the child exits.
!*/
use std::{
    ffi::{OsStr, OsString},
    fmt,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use itertools::Itertools;
use log::debug;

use super::Stage;
use crate::error::Error;

/// What to do with a child output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Discard,
    Inherit,
}

impl From<Output> for Stdio {
    fn from(o: Output) -> Stdio {
        match o {
            Output::Discard => Stdio::null(),
            Output::Inherit => Stdio::inherit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: PathBuf,
    args: Vec<OsString>,
    stdout: Output,
    stderr: Output,
}

impl ToolCommand {
    pub fn new(program: &Path) -> Self {
        Self {
            program: program.to_path_buf(),
            args: Vec::new(),
            stdout: Output::Inherit,
            stderr: Output::Inherit,
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn stdout(mut self, o: Output) -> Self {
        self.stdout = o;
        self
    }

    pub fn stderr(mut self, o: Output) -> Self {
        self.stderr = o;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Arguments as lossy strings, handy for assertions and logs.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.program.display(),
            self.args_lossy().iter().join(" ")
        )
    }
}

/// Runs a tool to completion and returns its exit code (`None` when killed by a signal).
pub trait ToolRunner {
    fn run(&mut self, stage: Stage, cmd: &ToolCommand) -> Result<Option<i32>, Error>;
}

/// Spawns tools as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl ToolRunner for ProcessRunner {
    fn run(&mut self, stage: Stage, cmd: &ToolCommand) -> Result<Option<i32>, Error> {
        debug!("[{}] spawning {}", stage, cmd);
        let status = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdin(Stdio::null())
            .stdout(cmd.stdout)
            .stderr(cmd.stderr)
            .status()
            .map_err(|source| Error::Launch { stage, source })?;
        Ok(status.code())
    }
}
