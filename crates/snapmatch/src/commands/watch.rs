use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use image::RgbaImage;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::compare::{MatchStatus, diff};
use crate::config::ResolvedConfig;
use crate::report::terminal;
use crate::source;

/// Tracks the last capture and verdict between polls.
#[derive(Default)]
struct WatchState {
    last_bytes: Option<Vec<u8>>,
    last_match: Option<bool>,
    polls: u64,
    changes: u64,
    errors: u64,
}

impl WatchState {
    /// Record a verdict; returns true when it differs from the previous one.
    fn record(&mut self, status: &MatchStatus) -> bool {
        let is_match = status.is_match();
        let changed = self.last_match != Some(is_match);
        if changed {
            self.changes += 1;
            self.last_match = Some(is_match);
        }
        changed
    }
}

/// `snapmatch watch` — poll `current` and report match/mismatch changes.
/// Returns exit code: 0 = last verdict was a match, 1 otherwise.
///
/// The reference is loaded and cropped once; failures there are fatal.
pub async fn watch(
    config: ResolvedConfig,
    reference: String,
    current: String,
    polls: Option<u64>,
) -> Result<i32> {
    let region = config.region;
    let reference_src = reference.clone();
    let reference_img = blocking(move || {
        let img = source::load(&reference_src).context("Failed to load reference image")?;
        match region {
            Some(region) => region.crop(&img).context("Failed to crop reference image"),
            None => Ok(img),
        }
    })
    .await?;
    let reference_img = Arc::new(reference_img);
    info!(
        reference = %source::describe(&reference),
        current = %source::describe(&current),
        interval_ms = config.interval.as_millis() as u64,
        "watching"
    );

    let start = Instant::now();
    let mut state = WatchState::default();
    let mut ticker = tokio::time::interval(config.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("interrupted");
                break;
            }
        }

        state.polls += 1;
        let poll = state.polls;

        let current_src = current.clone();
        let bytes = match blocking(move || source::read(&current_src)).await {
            Ok(bytes) => bytes,
            Err(e) => {
                state.errors += 1;
                warn!(poll, "capture unavailable: {e:#}");
                if polls.is_some_and(|n| poll >= n) {
                    break;
                }
                continue;
            }
        };

        // Byte-identical capture: the verdict cannot change.
        if state.last_bytes.as_deref() == Some(bytes.as_slice()) {
            debug!(poll, "capture unchanged");
        } else {
            let status = poll_once(&config, Arc::clone(&reference_img), bytes.clone()).await;
            if let MatchStatus::Error(msg) = &status {
                state.errors += 1;
                warn!(poll, "comparison failed: {msg}");
            } else {
                state.last_bytes = Some(bytes);
                if state.record(&status) {
                    terminal::print_transition(poll, &status, config.tolerance);
                } else {
                    debug!(poll, ?status, "state unchanged");
                }
            }
        }

        if polls.is_some_and(|n| poll >= n) {
            break;
        }
    }

    terminal::print_watch_summary(state.polls, state.changes, state.errors, start.elapsed());
    Ok(if state.last_match == Some(true) { 0 } else { 1 })
}

/// Run file and decode work off the async runtime.
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .context("Blocking task panicked")?
}

/// Compare one capture against the already cropped reference.
async fn poll_once(
    config: &ResolvedConfig,
    reference: Arc<RgbaImage>,
    bytes: Vec<u8>,
) -> MatchStatus {
    let options = config.options;
    let region = config.region;
    let tolerance = config.tolerance;

    let result = blocking(move || {
        let current = source::decode(&bytes)?;
        let current = match region {
            Some(region) => region.crop(&current).context("Failed to crop current image")?,
            None => current,
        };
        diff::compare(&reference, &current, None, &options, tolerance)
    })
    .await;

    match result {
        Ok(result) => result.status(),
        Err(e) => MatchStatus::Error(format!("{e:#}")),
    }
}
