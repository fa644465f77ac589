// presto-rs: Presto Build process engine - Rust Port
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Spawning children with combined, redirected output.
//!
//! ```text
//! spawn(command_line, env)
//!   which(shell)            --> ShellNotFound
//!   OutputChannel::open()   --> Pipe | Duplicate | Register
//!   Command  shell args.. command_line
//!            stdin=null  stdout=w  stderr=w.clone()
//!            env_clear() + env          (only if env given)
//!   spawn(); drop(Command)  --> Spawn
//!       parent write ends closed, child holds the only writers
//!   --> ProcessHandle
//! ```

use std::path::PathBuf;
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};

use bon::Builder;
use tokio::process::Command;
use tracing::{debug, trace};

use super::handle::OutputSettings;
use super::lines::{DEFAULT_MAX_LINE_LENGTH, LineAssembler, LineEndings};
use super::{OutputChannel, ProcessHandle, ProcessId};
use crate::config::types::{ProcessConfig, default_shell, default_shell_args};
use crate::core::env::Env;
use crate::error::LaunchError;
use crate::utility::encoding::Encoding;

/// Default size of a single non-blocking read.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// Starts command lines through a shell.
///
/// # Example
///
/// ```no_run
/// use presto_rs::core::process::{ProcessLauncher, PumpStatus, wait};
///
/// # async fn demo() -> anyhow::Result<()> {
/// let launcher = ProcessLauncher::builder().build();
/// let mut handle = launcher.spawn("cc -c main.c", None)?;
/// loop {
///     wait([&handle]).await?;
///     if let PumpStatus::Terminated(code) = handle.pump(|line| Ok(println!("{line}"))).await? {
///         println!("exit {code}");
///         break;
///     }
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Builder)]
pub struct ProcessLauncher {
    #[builder(setters(name = with_shell), into, default = default_shell().to_string())]
    shell: String,
    #[builder(
        setters(name = with_shell_args),
        default = default_shell_args().iter().map(ToString::to_string).collect()
    )]
    shell_args: Vec<String>,
    #[builder(setters(name = with_cwd), into)]
    cwd: Option<PathBuf>,
    #[builder(setters(name = with_read_buffer_size), default = DEFAULT_READ_BUFFER_SIZE)]
    read_buffer_size: usize,
    #[builder(setters(name = with_max_line_length), default = DEFAULT_MAX_LINE_LENGTH)]
    max_line_length: usize,
    #[builder(setters(name = with_line_endings), default)]
    line_endings: LineEndings,
    #[builder(setters(name = with_encoding), default)]
    encoding: Encoding,
    #[builder(skip)]
    next_id: AtomicU64,
}

impl Default for ProcessLauncher {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ProcessLauncher {
    /// Creates a launcher from the `[process]` configuration section.
    #[must_use]
    pub fn from_config(config: &ProcessConfig) -> Self {
        Self::builder()
            .with_shell(config.shell.clone())
            .with_shell_args(config.shell_args.clone())
            .with_read_buffer_size(config.read_buffer_size)
            .with_max_line_length(config.max_line_length)
            .with_line_endings(config.line_endings)
            .with_encoding(config.encoding)
            .build()
    }

    #[must_use]
    pub fn shell(&self) -> &str {
        &self.shell
    }

    #[must_use]
    pub const fn line_endings(&self) -> LineEndings {
        self.line_endings
    }

    /// Spawns `command_line` through the shell.
    ///
    /// When `env` is given it replaces the inherited environment entirely.
    /// The child's stdin is the null device; stdout and stderr share one
    /// stream read by the returned handle.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns a [`LaunchError`] if the shell cannot be found, the output
    /// pipe cannot be set up, or the OS refuses to create the process. All
    /// resources acquired for the attempt are released first.
    pub fn spawn(&self, command_line: &str, env: Option<&Env>) -> Result<ProcessHandle, LaunchError> {
        let shell = which::which(&self.shell).map_err(|_| LaunchError::ShellNotFound {
            shell: self.shell.clone(),
        })?;
        let (channel, output) = OutputChannel::open(command_line)?;

        let mut command = Command::new(&shell);
        command.args(&self.shell_args).arg(command_line);

        if let Some(cwd) = &self.cwd {
            debug!(cwd = %cwd.display(), "cd");
            command.current_dir(cwd);
        }

        if let Some(env) = env {
            command.env_clear();
            for (key, value) in env.iter() {
                command.env(key, value);
            }
        }

        command
            .stdin(Stdio::null())
            .stdout(output.stdout)
            .stderr(output.stderr);

        debug!(cmd = %command_line, shell = %shell.display(), "exec");
        let spawned = command.spawn();
        // The command still owns the parent's copies of the write ends.
        drop(command);
        let child = spawned.map_err(|source| LaunchError::Spawn {
            command: command_line.to_string(),
            source,
        })?;

        let id = ProcessId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        trace!(process = %id, pid = ?child.id(), "spawned");

        Ok(ProcessHandle::new(
            id,
            command_line.to_string(),
            child,
            channel,
            OutputSettings {
                assembler: LineAssembler::new(self.line_endings, self.max_line_length),
                encoding: self.encoding,
                read_buffer_size: self.read_buffer_size,
            },
        ))
    }
}
