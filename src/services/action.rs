//! Simulated async actions.
//!
//! DESIGN
//! ======
//! Every button in the console that "does something" is a fixed timer: the
//! action is recorded as in progress, a tokio task sleeps for the action's
//! delay, then a completion closure decides the outcome and may push a
//! toast. The closure is synchronous and runs only after the timer fires.
//!
//! Timers belong to a view scope. Closing a scope aborts its pending timers,
//! marks their actions cancelled and runs each action's cancel hook, so a
//! torn-down view never receives a late completion and busy flags raised
//! for it fall back. Actions started without an explicit scope live in the
//! root scope, which `main` closes on shutdown.
//!
//! A fired timer claims its action by removing it from the scope's pending
//! set under the scopes lock. `close_scope` only cancels what is still
//! pending, so exactly one of completion and cancellation wins.
//!
//! Memory is capped: at most `MAX_VIEW_SCOPES` view scopes stay open (the
//! oldest is closed to make room) and at most `MAX_FINISHED_ACTIONS`
//! settled records are kept for polling.
//!
//! INVARIANTS
//! ==========
//! - An action leaves `InProgress` exactly once.
//! - A cancelled action's completion closure never runs; a completed
//!   action's cancel hook never runs.
//! - Lock order is scopes before actions; neither lock is held across an
//!   await or while a completion closure or cancel hook runs.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tokio::task::AbortHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::clock;
use crate::config::ActionDelays;
use crate::notify::{Notification, Notifier};
use crate::services::bounded::BoundedMap;

/// Scope that owns actions started without an explicit view.
pub const ROOT_SCOPE: Uuid = Uuid::nil();

pub const DIAGNOSTIC_STEPS: u8 = 10;

pub const MAX_VIEW_SCOPES: usize = 256;

pub const MAX_FINISHED_ACTIONS: usize = 512;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("scope not found: {0}")]
    ScopeClosed(Uuid),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    SuspendBot,
    ActivateBot,
    SuspendUser,
    ActivateUser,
    ResolveIssue,
    SyncLogs,
    ValidateToken,
    RunDiagnostics,
    RefreshPreview,
    ExportLogs,
    SendTranscript,
    GenerateReply,
    CloseModal,
}

impl ActionKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SuspendBot => "suspend_bot",
            Self::ActivateBot => "activate_bot",
            Self::SuspendUser => "suspend_user",
            Self::ActivateUser => "activate_user",
            Self::ResolveIssue => "resolve_issue",
            Self::SyncLogs => "sync_logs",
            Self::ValidateToken => "validate_token",
            Self::RunDiagnostics => "run_diagnostics",
            Self::RefreshPreview => "refresh_preview",
            Self::ExportLogs => "export_logs",
            Self::SendTranscript => "send_transcript",
            Self::GenerateReply => "generate_reply",
            Self::CloseModal => "close_modal",
        }
    }

    /// Default timer for this kind.
    #[must_use]
    pub fn schedule(self, delays: &ActionDelays) -> Schedule {
        match self {
            Self::SuspendBot | Self::ActivateBot | Self::SuspendUser | Self::ActivateUser | Self::ResolveIssue => {
                Schedule::Once(delays.admin_action)
            }
            Self::SyncLogs => Schedule::Once(delays.sync),
            Self::ValidateToken => Schedule::Once(delays.validate),
            Self::RefreshPreview => Schedule::Once(delays.preview_refresh),
            Self::RunDiagnostics => Schedule::Stepped { steps: DIAGNOSTIC_STEPS, interval: delays.diagnostic_step },
            Self::ExportLogs | Self::SendTranscript => Schedule::Immediate,
            Self::GenerateReply => Schedule::Once(delays.chat_reply),
            Self::CloseModal => Schedule::Once(delays.modal_close),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    InProgress,
    Succeeded,
    Failed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Complete inline, no timer.
    Immediate,
    Once(Duration),
    /// `steps` ticks of `interval`, progress advancing evenly to 100.
    Stepped { steps: u8, interval: Duration },
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionRecord {
    pub id: Uuid,
    pub kind: ActionKind,
    pub subject: Option<String>,
    pub scope: Uuid,
    pub status: ActionStatus,
    pub progress: u8,
    pub started_at: String,
    pub finished_at: Option<String>,
}

/// What a completion closure decided.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: ActionStatus,
    pub toast: Option<Notification>,
}

impl Outcome {
    #[must_use]
    pub fn succeeded(toast: Notification) -> Self {
        Self { status: ActionStatus::Succeeded, toast: Some(toast) }
    }

    #[must_use]
    pub fn failed(toast: Notification) -> Self {
        Self { status: ActionStatus::Failed, toast: Some(toast) }
    }

    /// Success without a toast (preview refresh, modal close, chat reply).
    #[must_use]
    pub fn silent() -> Self {
        Self { status: ActionStatus::Succeeded, toast: None }
    }

    /// The work was overtaken before the timer fired; no toast.
    #[must_use]
    pub fn superseded() -> Self {
        Self { status: ActionStatus::Cancelled, toast: None }
    }
}

// =============================================================================
// RUNNER
// =============================================================================

type CancelHook = Box<dyn FnOnce() + Send>;

/// A timer that has not fired yet.
struct Pending {
    handle: AbortHandle,
    on_cancel: Option<CancelHook>,
}

type PendingSet = HashMap<Uuid, Pending>;

struct Scopes {
    root: Option<PendingSet>,
    views: BoundedMap<Uuid, PendingSet>,
}

impl Scopes {
    fn contains(&self, scope: Uuid) -> bool {
        if scope == ROOT_SCOPE { self.root.is_some() } else { self.views.contains_key(&scope) }
    }

    fn pending_mut(&mut self, scope: Uuid) -> Option<&mut PendingSet> {
        if scope == ROOT_SCOPE { self.root.as_mut() } else { self.views.get_mut(&scope) }
    }

    fn remove(&mut self, scope: Uuid) -> Option<PendingSet> {
        if scope == ROOT_SCOPE { self.root.take() } else { self.views.remove(&scope) }
    }
}

/// Action records, with settled ids in the order they settled.
#[derive(Default)]
struct Ledger {
    records: HashMap<Uuid, ActionRecord>,
    settled: VecDeque<Uuid>,
}

impl Ledger {
    /// Move `id` out of `InProgress`. `None` if it already left.
    fn settle(&mut self, id: Uuid, status: ActionStatus) -> Option<ActionKind> {
        let record = self.records.get_mut(&id)?;
        if record.status != ActionStatus::InProgress {
            return None;
        }
        record.status = status;
        if status == ActionStatus::Succeeded {
            record.progress = 100;
        }
        record.finished_at = Some(clock::timestamp());
        let kind = record.kind;

        self.settled.push_back(id);
        while self.settled.len() > MAX_FINISHED_ACTIONS {
            if let Some(oldest) = self.settled.pop_front() {
                self.records.remove(&oldest);
            }
        }
        Some(kind)
    }
}

struct Inner {
    actions: Mutex<Ledger>,
    scopes: Mutex<Scopes>,
    notifier: Notifier,
    delays: ActionDelays,
}

#[derive(Clone)]
pub struct ActionRunner {
    inner: Arc<Inner>,
}

impl ActionRunner {
    #[must_use]
    pub fn new(notifier: Notifier, delays: ActionDelays) -> Self {
        let scopes = Scopes { root: Some(HashMap::new()), views: BoundedMap::new(MAX_VIEW_SCOPES) };
        Self {
            inner: Arc::new(Inner {
                actions: Mutex::new(Ledger::default()),
                scopes: Mutex::new(scopes),
                notifier,
                delays,
            }),
        }
    }

    #[must_use]
    pub fn delays(&self) -> &ActionDelays {
        &self.inner.delays
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }

    /// Start `kind` with its default timer.
    ///
    /// # Errors
    ///
    /// Returns `ScopeClosed` if `scope` is unknown or already closed.
    pub fn start<F>(
        &self,
        scope: Uuid,
        kind: ActionKind,
        subject: Option<String>,
        complete: F,
    ) -> Result<ActionRecord, ActionError>
    where
        F: FnOnce() -> Outcome + Send + 'static,
    {
        let schedule = kind.schedule(&self.inner.delays);
        self.spawn(scope, kind, subject, schedule, complete, None)
    }

    /// Start an action on an explicit timer. `on_cancel` runs instead of
    /// `complete` if the scope closes before the timer fires; it lowers
    /// busy flags the caller raised for the action.
    ///
    /// # Errors
    ///
    /// Returns `ScopeClosed` if `scope` is unknown or already closed;
    /// neither closure runs.
    pub fn start_guarded<F, C>(
        &self,
        scope: Uuid,
        kind: ActionKind,
        subject: Option<String>,
        schedule: Schedule,
        complete: F,
        on_cancel: C,
    ) -> Result<ActionRecord, ActionError>
    where
        F: FnOnce() -> Outcome + Send + 'static,
        C: FnOnce() + Send + 'static,
    {
        self.spawn(scope, kind, subject, schedule, complete, Some(Box::new(on_cancel)))
    }

    fn spawn<F>(
        &self,
        scope: Uuid,
        kind: ActionKind,
        subject: Option<String>,
        schedule: Schedule,
        complete: F,
        on_cancel: Option<CancelHook>,
    ) -> Result<ActionRecord, ActionError>
    where
        F: FnOnce() -> Outcome + Send + 'static,
    {
        let record = ActionRecord {
            id: Uuid::new_v4(),
            kind,
            subject,
            scope,
            status: ActionStatus::InProgress,
            progress: 0,
            started_at: clock::timestamp(),
            finished_at: None,
        };
        let id = record.id;

        if schedule == Schedule::Immediate {
            if !self.scope_is_open(scope) {
                return Err(ActionError::ScopeClosed(scope));
            }
            self.lock_actions().records.insert(id, record.clone());
            info!(action = %kind, %id, "action started");
            self.finish(id, complete());
            return Ok(self.get(id).unwrap_or(record));
        }

        let mut scopes = self.lock_scopes();
        let pending = scopes.pending_mut(scope).ok_or(ActionError::ScopeClosed(scope))?;
        self.lock_actions().records.insert(id, record.clone());

        let runner = self.clone();
        let task = tokio::spawn(async move {
            match schedule {
                Schedule::Immediate => {}
                Schedule::Once(delay) => tokio::time::sleep(delay).await,
                Schedule::Stepped { steps, interval } => {
                    for step in 1..=steps {
                        tokio::time::sleep(interval).await;
                        runner.set_progress(id, step_progress(step, steps));
                    }
                }
            }
            if runner.claim(scope, id) {
                runner.finish(id, complete());
            }
        });
        // Registered before the scopes lock drops, so the task cannot claim
        // an id that is not there yet.
        pending.insert(id, Pending { handle: task.abort_handle(), on_cancel });
        info!(action = %kind, %id, %scope, ?schedule, "action started");
        Ok(record)
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<ActionRecord> {
        self.lock_actions().records.get(&id).cloned()
    }

    // -------------------------------------------------------------------------
    // Scopes
    // -------------------------------------------------------------------------

    /// Open a view scope. Past `MAX_VIEW_SCOPES` the oldest view scope is
    /// closed first.
    #[must_use]
    pub fn open_scope(&self) -> Uuid {
        let id = Uuid::new_v4();
        let evicted = self.lock_scopes().views.insert(id, HashMap::new());
        for (old, pending) in evicted {
            let cancelled = self.cancel(pending);
            info!(scope = %old, cancelled, "oldest scope closed");
        }
        debug!(scope = %id, "scope opened");
        id
    }

    /// Open a scope that closes itself when dropped.
    #[cfg(test)]
    #[must_use]
    pub fn view_scope(&self) -> ViewScope {
        ViewScope { id: self.open_scope(), runner: self.clone() }
    }

    /// Guard over the root scope, for the process lifetime.
    #[must_use]
    pub fn root_scope(&self) -> ViewScope {
        let mut scopes = self.lock_scopes();
        if scopes.root.is_none() {
            scopes.root = Some(HashMap::new());
        }
        drop(scopes);
        ViewScope { id: ROOT_SCOPE, runner: self.clone() }
    }

    #[must_use]
    pub fn scope_is_open(&self, scope: Uuid) -> bool {
        self.lock_scopes().contains(scope)
    }

    /// Abort every pending timer in `scope`, mark those actions cancelled
    /// and run their cancel hooks. Returns how many were cancelled, or
    /// `None` for an unknown scope.
    pub fn close_scope(&self, scope: Uuid) -> Option<usize> {
        let pending = self.lock_scopes().remove(scope)?;
        let cancelled = self.cancel(pending);
        info!(%scope, cancelled, "scope closed");
        Some(cancelled)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Take `id` out of its scope's pending set. Whoever removes it owns the
    /// outcome: the timer task here, or `close_scope`.
    fn claim(&self, scope: Uuid, id: Uuid) -> bool {
        self.lock_scopes().pending_mut(scope).and_then(|pending| pending.remove(&id)).is_some()
    }

    fn cancel(&self, pending: PendingSet) -> usize {
        let mut hooks = Vec::new();
        let mut cancelled = 0;
        {
            let mut ledger = self.lock_actions();
            for (id, entry) in pending {
                entry.handle.abort();
                if ledger.settle(id, ActionStatus::Cancelled).is_some() {
                    cancelled += 1;
                }
                hooks.extend(entry.on_cancel);
            }
        }
        for hook in hooks {
            hook();
        }
        cancelled
    }

    fn set_progress(&self, id: Uuid, progress: u8) {
        if let Some(record) = self.lock_actions().records.get_mut(&id) {
            if record.status == ActionStatus::InProgress {
                record.progress = progress;
            }
        }
    }

    fn finish(&self, id: Uuid, outcome: Outcome) {
        let Some(kind) = self.lock_actions().settle(id, outcome.status) else {
            return;
        };
        info!(action = %kind, %id, status = ?outcome.status, "action finished");
        if let Some(toast) = outcome.toast {
            self.inner.notifier.push(toast);
        }
    }

    fn lock_actions(&self) -> std::sync::MutexGuard<'_, Ledger> {
        self.inner.actions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_scopes(&self) -> std::sync::MutexGuard<'_, Scopes> {
        self.inner.scopes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn step_progress(step: u8, steps: u8) -> u8 {
    let pct = u16::from(step) * 100 / u16::from(steps.max(1));
    u8::try_from(pct.min(100)).unwrap_or(100)
}

// =============================================================================
// VIEW SCOPE
// =============================================================================

/// A mounted view's lifetime. Dropping it cancels the view's pending timers.
pub struct ViewScope {
    id: Uuid,
    runner: ActionRunner,
}

#[cfg(test)]
impl ViewScope {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// # Errors
    ///
    /// Returns `ScopeClosed` once the scope has been closed.
    pub fn start<F>(&self, kind: ActionKind, subject: Option<String>, complete: F) -> Result<ActionRecord, ActionError>
    where
        F: FnOnce() -> Outcome + Send + 'static,
    {
        self.runner.start(self.id, kind, subject, complete)
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        let _ = self.runner.close_scope(self.id);
    }
}

#[cfg(test)]
#[path = "action_test.rs"]
mod tests;
