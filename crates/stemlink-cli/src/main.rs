//! stemlink command-line client.
//!
//! Reads `config.toml` (or the path given with `--config`), connects to the
//! mentorship backend, and drives the lifecycle manager from subcommands.
//! With `--offline` everything runs against the in-memory reference service
//! instead — useful for trying the ranking and lifecycle flows without a
//! backend.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use stemlink_client::{ApiClient, ApiConfig};
use stemlink_core::{
  Error,
  candidate::{MentorCandidate, SortKey},
  manager::MentorshipManager,
  mentorship::{Mentorship, MentorshipStatus},
  service::MentorshipService,
};
use stemlink_service_mem::MemoryService;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(author, version, about = "StemLink mentorship client")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Run against the in-memory reference service instead of the backend.
  #[arg(long)]
  offline: bool,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Show ranked mentor recommendations.
  Recommendations {
    /// Sort key: matchScore or name.
    #[arg(long, default_value = "matchScore")]
    sort: String,
  },
  /// List my mentorships, optionally filtered by status.
  Mentorships {
    /// PENDING, ACCEPTED, ACTIVE, DECLINED, or COMPLETED.
    #[arg(long)]
    status: Option<String>,
  },
  /// Send a mentorship request to a mentor.
  Request {
    mentor_id: Uuid,
    /// Why you'd like to connect.
    #[arg(short, long)]
    message:   Option<String>,
  },
  /// Accept a pending request (mentor side).
  Accept { mentorship_id: Uuid },
  /// Decline a pending request (mentor side).
  Decline { mentorship_id: Uuid },
  /// End an active mentorship.
  End { mentorship_id: Uuid },
}

/// Settings read from `config.toml` / `STEMLINK_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
struct CliConfig {
  base_url:     String,
  #[serde(default)]
  bearer_token: Option<String>,
  /// The calling student's account id.
  student_id:   Uuid,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.offline {
    tracing::info!("running offline against the in-memory reference service");
    let service = MemoryService::new();
    seed_demo_candidates(&service).await;
    let manager = MentorshipManager::new(service, Uuid::new_v4());
    return run(manager, cli.command).await;
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("STEMLINK"))
    .build()
    .context("failed to read config file")?;

  let cfg: CliConfig = settings
    .try_deserialize()
    .context("failed to deserialise configuration")?;

  let client = ApiClient::new(ApiConfig {
    base_url:     cfg.base_url,
    bearer_token: cfg.bearer_token,
  })?;

  run(MentorshipManager::new(client, cfg.student_id), cli.command).await
}

async fn run<S>(
  mut manager: MentorshipManager<S>,
  command: Command,
) -> anyhow::Result<()>
where
  S: MentorshipService,
  S::Error: Into<Error>,
{
  manager.sync().await.context("failed to sync mentorships")?;

  match command {
    Command::Recommendations { sort } => {
      let sort_key: SortKey =
        sort.parse().map_err(|e: String| anyhow::anyhow!(e))?;
      let ranked = manager.ranked_recommendations(sort_key).await?;
      if ranked.is_empty() {
        println!("no recommendations available");
      }
      for candidate in &ranked {
        print_candidate(candidate);
      }
    }
    Command::Mentorships { status } => {
      let filter = status
        .map(|s| s.parse::<MentorshipStatus>())
        .transpose()
        .map_err(|e| anyhow::anyhow!(e))?;
      let records: Vec<_> = manager
        .records()
        .iter()
        .filter(|m| filter.is_none_or(|f| m.status == f))
        .cloned()
        .collect();
      if records.is_empty() {
        println!("no mentorships found");
      }
      for record in &records {
        print_mentorship(record);
      }
    }
    Command::Request { mentor_id, message } => {
      let record = manager.send_request(mentor_id, message).await?;
      println!("request sent — mentorship {}", record.mentorship_id);
      print_mentorship(&record);
    }
    Command::Accept { mentorship_id } => {
      let record = manager.accept(mentorship_id).await?;
      println!("accepted — now {}", record.status);
    }
    Command::Decline { mentorship_id } => {
      let record = manager.decline(mentorship_id).await?;
      println!("declined — now {}", record.status);
    }
    Command::End { mentorship_id } => {
      let record = manager.end(mentorship_id).await?;
      println!("ended — now {}", record.status);
    }
  }

  Ok(())
}

fn print_mentorship(m: &Mentorship) {
  println!(
    "{}  {:9}  mentor {}  created {}",
    m.mentorship_id,
    m.status.to_string(),
    m.mentor_id,
    m.created_at.format("%Y-%m-%d %H:%M"),
  );
}

fn print_candidate(c: &MentorCandidate) {
  let annotation = match c.request_status {
    Some(status) => format!("  [{status}]"),
    None => String::new(),
  };
  println!(
    "{:3.0}%  {}  ({}){annotation}",
    c.match_score,
    c.display_name(),
    c.user_id,
  );
  for reason in &c.match_criteria {
    println!("       - {reason}");
  }
}

/// Sample candidates for `--offline` runs.
async fn seed_demo_candidates(service: &MemoryService) {
  let candidate = |name: &str, score: f64, criteria: &[&str]| {
    let (first, last) = name.split_once(' ').unwrap_or((name, ""));
    MentorCandidate {
      user_id:        Uuid::new_v4(),
      first_name:     first.to_string(),
      last_name:      last.to_string(),
      match_score:    score,
      match_criteria: criteria.iter().map(|s| s.to_string()).collect(),
      request_status: None,
    }
  };

  service
    .seed_candidates(vec![
      candidate(
        "Grace Hopper",
        92.0,
        &["shared field: computer science", "same availability"],
      ),
      candidate("Katherine Johnson", 88.0, &["shared field: mathematics"]),
      candidate("Ada Lovelace", 75.0, &["nearby location"]),
    ])
    .await;
}
