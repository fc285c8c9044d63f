// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SandboxError {
    #[error("failed to exec docker: {0}")]
    DockerExec(String),
    #[error("docker {args} failed: {stderr}")]
    DockerCommand { args: String, stderr: String },
    #[error("image pull failed for {image}: {source}")]
    ImagePull { image: String, #[source] source: Box<SandboxError> },
    #[error("container create/start failed: {0}")]
    ContainerStart(String),
    #[error("container init failed (exit {exit_code}): {stderr}")]
    InitFailed { exit_code: i32, stderr: String },
    #[error("background process died unexpectedly: {tail}")]
    BackgroundDied { tail: String },
    #[error("timed out after {0}ms waiting for the ready pattern")]
    BackgroundReadyTimeout(u64),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown sandbox instance: {0}")]
    UnknownInstance(String),
}
