// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `mission-runtime`: drives one mission to completion against an in-memory
//! Store and a real Docker sandbox. The multi-tenant CRUD surface and HTTP
//! transport a production deployment would put in front of this are out of
//! scope; this binary is the Mission Controller's host process.

use std::sync::Arc;

use clap::Parser;
use mission_core::{Clock, Job, JobId, JobPayload, Mission, MissionId, SystemClock};
use mission_engine::Controller;
use mission_sandbox::SandboxDriver;
use mission_store::{InMemoryStore, Store};
use tracing_subscriber::EnvFilter;

/// Run a single mission end-to-end and print its resulting patch.
#[derive(Parser, Debug)]
#[command(name = "mission-runtime", version)]
struct Cli {
    /// Natural-language goal for the mission.
    goal: String,

    /// Project id the mission and its settings belong to.
    #[arg(long, default_value = "default")]
    project_id: String,

    /// Optional repository URL to check out before planning.
    #[arg(long)]
    repo_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))).init();

    let cli = Cli::parse();

    let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
    let sandbox = Arc::new(SandboxDriver::default());
    let clock = SystemClock;

    let mut mission = Mission::new(MissionId::new(), &cli.project_id, &cli.goal);
    mission.repo_url = cli.repo_url;
    let mission_id = mission.id;
    store.put_mission(mission, clock_epoch_ms()).await?;

    let mut job = Job::new(JobId::new(), &cli.project_id, JobPayload::default());
    job.mission_id = Some(mission_id);
    let job_id = job.id;
    store.put_job(job, clock_epoch_ms()).await?;

    let heartbeat = tokio::spawn(mission_engine::heartbeat_loop(store.clone(), job_id, SystemClock));

    let controller = Controller::new(store.clone(), sandbox, clock);
    let result = controller.run_job(&job_id).await;
    heartbeat.abort();

    let mission = store.get_mission(mission_id.as_str()).await?;
    tracing::info!(status = %mission.status, "mission finished");

    if let Some(job) = store.get_job_by_mission(&mission_id).await? {
        if let Some(result) = &job.result {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }

    result?;
    Ok(())
}

fn clock_epoch_ms() -> u64 {
    SystemClock.epoch_ms()
}
