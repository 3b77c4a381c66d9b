//! Drives a feed through a script and reports what happened.

use crate::config::{Config, OutputFormat};
use crate::error::Result;
use crate::script::{load_script, load_seed, ScriptEvent};
use nailfeed_engine::{FeedChange, FeedReconciler, FeedView, PostRecord};
use serde::Serialize;
use tracing::{debug, info};

/// Outcome of one script line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub line: usize,
    pub event: &'static str,
    pub change: FeedChange,
    pub revision: u64,
}

/// Outcome of a whole replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayReport {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepReport>,
    pub view: FeedView,
}

/// Apply `events` to a feed seeded with `seed`.
pub fn replay(seed: Vec<PostRecord>, events: Vec<ScriptEvent>) -> ReplayReport {
    let mut feed = FeedReconciler::with_posts(seed);
    let mut steps = Vec::with_capacity(events.len());

    for ScriptEvent { line, event } in events {
        let kind = event.kind();
        let change = feed.apply(event);
        debug!(line, event = kind, ?change, "applied");

        steps.push(StepReport {
            line,
            event: kind,
            change,
            revision: feed.revision(),
        });
    }

    ReplayReport {
        steps,
        view: feed.view(),
    }
}

/// Load the configured inputs and replay them.
pub fn run(config: &Config) -> Result<ReplayReport> {
    let seed = match &config.seed {
        Some(path) => load_seed(path)?,
        None => Vec::new(),
    };
    let events = load_script(&config.script)?;
    info!(
        script = %config.script.display(),
        seed = seed.len(),
        events = events.len(),
        "replaying script"
    );

    let mut report = replay(seed, events);
    info!(
        posts = report.view.posts.len(),
        optimistic = report.view.optimistic_posts_count,
        revision = report.view.revision,
        "replay finished"
    );

    if !config.steps {
        report.steps.clear();
    }
    Ok(report)
}

/// Encode a report as JSON.
pub fn render(report: &ReplayReport, format: OutputFormat) -> Result<String> {
    let json = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(report)?,
        OutputFormat::Compact => serde_json::to_string(report)?,
    };
    Ok(json)
}
