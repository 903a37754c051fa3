use std::sync::Arc;
use std::time::Duration;

use common::Submission;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::config::PollConfig;
use crate::error::ClientError;
use crate::source::SnapshotSource;

/// Delay between poll attempts.
pub const POLL_INTERVAL: Duration = Duration::from_millis(2000);
/// Poll attempts before a session gives up on a queued submission.
pub const MAX_ATTEMPTS: u32 = 20;

/// One update from a poll session.
///
/// `Final`, `TimedOut`, and `Error` end the session; the event channel
/// closes after delivering them.
#[derive(Debug)]
pub enum PollEvent {
    /// Judging still in progress; partial snapshot with the test cases
    /// completed so far.
    Progress(Submission),
    /// Terminal snapshot. The submission will not change again.
    Final(Submission),
    /// The submission stayed queued for the whole attempt budget.
    TimedOut { attempts: u32 },
    /// A fetch failed. No automatic retry; re-watching is the caller's call.
    Error(ClientError),
}

#[derive(Clone, Copy, Debug)]
pub struct PollOptions {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: POLL_INTERVAL,
            max_attempts: MAX_ATTEMPTS,
        }
    }
}

impl From<&PollConfig> for PollOptions {
    fn from(config: &PollConfig) -> Self {
        Self {
            interval: Duration::from_millis(config.interval_ms),
            max_attempts: config.max_attempts,
        }
    }
}

/// Watches submissions until they reach a terminal state.
///
/// At most one session is live per poller. Each session is a spawned task
/// owning its own attempt counter and timer; cancelling (explicitly, by
/// watching a different id, or by dropping the poller) aborts the task, so
/// no event is delivered after cancellation.
pub struct SubmissionPoller {
    source: Arc<dyn SnapshotSource>,
    options: PollOptions,
    active: Option<ActiveSession>,
}

struct ActiveSession {
    submission_id: String,
    task: JoinHandle<()>,
}

impl Drop for ActiveSession {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl SubmissionPoller {
    pub fn new(source: Arc<dyn SnapshotSource>, options: PollOptions) -> Self {
        Self {
            source,
            options,
            active: None,
        }
    }

    /// Start watching a submission, cancelling any session for a different
    /// id. Returns `None` if a session for this id is already live, so a
    /// repeated watch never creates a duplicate timer.
    pub fn watch(&mut self, submission_id: &str) -> Option<mpsc::Receiver<PollEvent>> {
        if let Some(active) = &self.active {
            if active.submission_id == submission_id && !active.task.is_finished() {
                debug!(submission_id, "Already watching; ignoring repeated watch");
                return None;
            }
        }

        // Dropping the previous session aborts its task before the new one
        // starts, so its pending timer can never fire into the new session.
        self.active = None;

        let (tx, rx) = mpsc::channel(16);
        let task = tokio::spawn(run_session(
            Arc::clone(&self.source),
            submission_id.to_string(),
            self.options,
            tx,
        ));
        self.active = Some(ActiveSession {
            submission_id: submission_id.to_string(),
            task,
        });
        Some(rx)
    }

    /// Abort the live session, if any. The session's event channel closes
    /// without a further event.
    pub fn cancel(&mut self) {
        if let Some(active) = self.active.take() {
            debug!(submission_id = %active.submission_id, "Cancelling poll session");
        }
    }

    /// Id of the live session, if any.
    pub fn watched_id(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.submission_id.as_str())
    }
}

async fn run_session(
    source: Arc<dyn SnapshotSource>,
    submission_id: String,
    options: PollOptions,
    tx: mpsc::Sender<PollEvent>,
) {
    let mut attempts: u32 = 0;
    loop {
        let snapshot = match source.fetch(&submission_id).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(submission_id, error = %e, "Poll fetch failed; stopping session");
                let _ = tx.send(PollEvent::Error(e)).await;
                return;
            }
        };

        if snapshot.is_final() {
            debug!(submission_id, result = %snapshot.result, "Submission reached terminal state");
            let _ = tx.send(PollEvent::Final(snapshot)).await;
            return;
        }

        attempts += 1;
        if attempts >= options.max_attempts {
            warn!(submission_id, attempts, "Submission still queued; giving up");
            let _ = tx.send(PollEvent::TimedOut { attempts }).await;
            return;
        }

        // Surface the partial snapshot right away instead of waiting out the
        // interval.
        if tx.send(PollEvent::Progress(snapshot)).await.is_err() {
            // Receiver gone; nobody is watching anymore.
            return;
        }
        tokio::time::sleep(options.interval).await;
    }
}
