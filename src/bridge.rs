//! Boundary between the control server and the input-simulation command.
//!
//! The server only talks to [`InputCapability`]. [`ProcessCapability`] runs
//! the `mouseclick` command as a child process for each call and reads its
//! text output back.

use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::OnceLock;
use std::time::Duration;
use tokio::process::Command;

use crate::config::ServerConfig;
use crate::error::BridgeError;
use crate::event::{ClickRequest, PointerPosition};

#[async_trait]
pub trait InputCapability: Send + Sync {
    async fn pointer_position(&self) -> Result<PointerPosition, BridgeError>;
    async fn click(&self, request: &ClickRequest) -> Result<(), BridgeError>;
}

pub struct ProcessCapability {
    program: PathBuf,
    working_dir: PathBuf,
    /// Forwarded to the child as `--config` so it shares the simulation settings.
    config_file: Option<PathBuf>,
    position_timeout: Duration,
    click_timeout: Duration,
}

struct CommandOutput {
    success: bool,
    stdout: String,
    stderr: String,
}

impl ProcessCapability {
    pub fn new(program: PathBuf, working_dir: PathBuf) -> Self {
        let defaults = ServerConfig::default();
        Self {
            program,
            working_dir,
            config_file: None,
            position_timeout: defaults.position_timeout(),
            click_timeout: defaults.click_timeout(),
        }
    }

    pub fn from_config(config: &ServerConfig, base_dir: &Path) -> std::io::Result<Self> {
        let program = resolve_command(base_dir, &config.command_path)?;
        log::info!("Using input command {}", program.display());
        Ok(Self {
            program,
            working_dir: base_dir.to_path_buf(),
            config_file: None,
            position_timeout: config.position_timeout(),
            click_timeout: config.click_timeout(),
        })
    }

    pub fn with_timeouts(mut self, position: Duration, click: Duration) -> Self {
        self.position_timeout = position;
        self.click_timeout = click;
        self
    }

    pub fn with_config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    async fn run(&self, args: &[String], timeout: Duration) -> Result<CommandOutput, BridgeError> {
        log::debug!("Running {} {:?}", self.program.display(), args);

        let mut command = Command::new(&self.program);
        if let Some(config_file) = &self.config_file {
            command.arg("--config").arg(config_file);
        }
        command
            .args(args)
            .current_dir(&self.working_dir)
            // keep the child's stderr free of log lines
            .env("RUST_LOG", "off")
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = tokio::time::timeout(timeout, command.output())
            .await
            .map_err(|_| BridgeError::Timeout(timeout))?
            .map_err(|source| BridgeError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[async_trait]
impl InputCapability for ProcessCapability {
    async fn pointer_position(&self) -> Result<PointerPosition, BridgeError> {
        let output = self
            .run(&["--show-position".to_string()], self.position_timeout)
            .await?;
        if !output.success {
            return Err(command_failed(&output.stderr, "Failed to get position"));
        }
        parse_position(&output.stdout).ok_or(BridgeError::Parse)
    }

    async fn click(&self, request: &ClickRequest) -> Result<(), BridgeError> {
        request.validate()?;
        let output = self.run(&click_args(request), self.click_timeout).await?;
        if !output.success {
            return Err(command_failed(&output.stderr, "Click failed"));
        }
        log::debug!("Click command output: {}", output.stdout.trim());
        Ok(())
    }
}

fn command_failed(stderr: &str, fallback: &str) -> BridgeError {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        BridgeError::CommandFailed(fallback.to_string())
    } else {
        BridgeError::CommandFailed(stderr.to_string())
    }
}

/// Prefers `base_dir/command_path` and falls back to the running executable.
pub fn resolve_command(base_dir: &Path, command_path: &Path) -> std::io::Result<PathBuf> {
    let local = base_dir.join(command_path);
    if local.is_file() {
        return Ok(local);
    }
    std::env::current_exe()
}

pub fn click_args(request: &ClickRequest) -> Vec<String> {
    let mut args = vec![
        "--button".to_string(),
        request.button.to_string(),
        "--clicks".to_string(),
        request.clicks.to_string(),
    ];
    if let (Some(x), Some(y)) = (request.x, request.y) {
        args.extend([
            "--x".to_string(),
            x.to_string(),
            "--y".to_string(),
            y.to_string(),
        ]);
    }
    if let Some(interval) = request.interval {
        args.extend(["--interval".to_string(), interval.to_string()]);
    }
    args
}

fn position_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\((\d+),\s*(\d+)\)").expect("valid position pattern"))
}

/// Extracts the first `(X, Y)` pair from the command's stdout.
pub fn parse_position(stdout: &str) -> Option<PointerPosition> {
    let captures = position_pattern().captures(stdout)?;
    let x = captures[1].parse().ok()?;
    let y = captures[2].parse().ok()?;
    Some(PointerPosition::new(x, y))
}
