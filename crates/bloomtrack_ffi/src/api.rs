//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose tracker intents and snapshots to Dart via FRB.
//! - Own the single process-wide tracker session.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Intents are serialized through one session lock, in arrival order.
//! - Invalid intents come back as `ok == false`, never as errors.

use bloomtrack_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    ping as ping_inner, validate_sign_up, Intent, IntentOutcome, LevelUpEvent, LevelUpQueue,
    LoginGate, TaskId, TrackerConfig, TrackerSession, TrackerSnapshot,
};
use log::warn;
use std::sync::{Mutex, MutexGuard, OnceLock};

static SESSION: OnceLock<Mutex<FfiSession>> = OnceLock::new();

struct FfiSession {
    tracker: TrackerSession,
    level_ups: LevelUpQueue,
    gate: LoginGate,
}

impl FfiSession {
    fn new(config: TrackerConfig) -> Self {
        let level_ups = LevelUpQueue::new();
        let gate = LoginGate::new(config.credentials.clone());
        let tracker = TrackerSession::new(config).with_notifier(level_ups.clone());
        Self {
            tracker,
            level_ups,
            gate,
        }
    }
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive);
///   blank selects the build default (`debug` or `info`).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = match level.trim() {
        "" => default_log_level(),
        explicit => explicit,
    };
    match init_logging_inner(level, log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Task row rendered by the checklist window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub task_id: String,
    pub name: String,
    pub completed: bool,
}

/// Everything the main screen renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerView {
    /// `submit|auto`.
    pub policy: String,
    pub tasks: Vec<TaskItem>,
    pub points: u32,
    pub level: u32,
    pub points_per_level: u32,
    pub can_add_task: bool,
    pub progress_segments: Vec<bool>,
    pub tasks_until_next_level: u32,
    pub flower_asset: String,
    /// "Month D" label; `None` under the auto policy.
    pub day_label: Option<String>,
    /// Milliseconds until `tracker_poll` should be called.
    pub settle_pending_ms: Option<u64>,
}

/// Level-up notification for the host to surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUpItem {
    pub previous_level: u32,
    pub new_level: u32,
    pub levels_gained: u32,
}

/// Result envelope for every tracker intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerActionResponse {
    /// Whether the intent changed anything.
    pub ok: bool,
    /// Created task ID for `tracker_add_task`.
    pub task_id: Option<String>,
    pub leveled_up: bool,
    pub view: TrackerView,
}

/// Replaces the session with one built from JSON config.
///
/// An empty string restores defaults.
///
/// # FFI contract
/// - Discards current tasks, progress and queued level-ups.
/// - Returns empty string on success and error message on failure; the
///   previous session is kept on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_configure(config_json: String) -> String {
    let config = if config_json.trim().is_empty() {
        TrackerConfig::default()
    } else {
        match TrackerConfig::from_json_str(config_json.as_str()) {
            Ok(config) => config,
            Err(err) => return format!("tracker_configure failed: {err}"),
        }
    };
    *lock_session() = FfiSession::new(config);
    String::new()
}

#[flutter_rust_bridge::frb(sync)]
pub fn tracker_snapshot() -> TrackerView {
    to_view(lock_session().tracker.snapshot())
}

#[flutter_rust_bridge::frb(sync)]
pub fn tracker_add_task(name: String) -> TrackerActionResponse {
    apply_intent(Intent::AddTask(name))
}

#[flutter_rust_bridge::frb(sync)]
pub fn tracker_toggle_task(task_id: String) -> TrackerActionResponse {
    match parse_task_id(&task_id) {
        Some(id) => apply_intent(Intent::ToggleTask(id)),
        None => ignored_response(),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn tracker_remove_task(task_id: String) -> TrackerActionResponse {
    match parse_task_id(&task_id) {
        Some(id) => apply_intent(Intent::RemoveTask(id)),
        None => ignored_response(),
    }
}

/// Submits the current day. `ok == false` under the auto policy.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_submit_day() -> TrackerActionResponse {
    apply_intent(Intent::SubmitDay)
}

/// Commits a pending auto level-up whose settle delay has elapsed.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_poll() -> TrackerActionResponse {
    let mut session = lock_session();
    let level_up = session.tracker.poll();
    TrackerActionResponse {
        ok: level_up.is_some(),
        task_id: None,
        leveled_up: level_up.is_some(),
        view: to_view(session.tracker.snapshot()),
    }
}

/// Drains level-up events not yet shown to the user, oldest first.
#[flutter_rust_bridge::frb(sync)]
pub fn tracker_take_level_ups() -> Vec<LevelUpItem> {
    lock_session()
        .level_ups
        .drain()
        .into_iter()
        .map(to_level_up_item)
        .collect()
}

/// Checks the fixed login pair. Not a security boundary.
#[flutter_rust_bridge::frb(sync)]
pub fn auth_login(username: String, password: String) -> bool {
    lock_session().gate.check(username.as_str(), password.as_str())
}

#[flutter_rust_bridge::frb(sync)]
pub fn auth_sign_up(username: String, password: String, confirm_password: String) -> bool {
    validate_sign_up(
        username.as_str(),
        password.as_str(),
        confirm_password.as_str(),
    )
}

fn apply_intent(intent: Intent) -> TrackerActionResponse {
    let mut session = lock_session();
    let outcome = session.tracker.apply(intent);
    to_response(outcome, session.tracker.snapshot())
}

fn ignored_response() -> TrackerActionResponse {
    let session = lock_session();
    to_response(IntentOutcome::default(), session.tracker.snapshot())
}

fn lock_session() -> MutexGuard<'static, FfiSession> {
    SESSION
        .get_or_init(|| Mutex::new(FfiSession::new(TrackerConfig::default())))
        .lock()
        .unwrap_or_else(|poisoned| {
            warn!("event=session_lock module=ffi status=recovered");
            poisoned.into_inner()
        })
}

fn parse_task_id(raw: &str) -> Option<TaskId> {
    TaskId::parse_str(raw.trim()).ok()
}

fn to_response(outcome: IntentOutcome, snapshot: TrackerSnapshot) -> TrackerActionResponse {
    TrackerActionResponse {
        ok: outcome.applied,
        task_id: outcome.task_id.map(|id| id.to_string()),
        leveled_up: outcome.level_up.is_some(),
        view: to_view(snapshot),
    }
}

fn to_view(snapshot: TrackerSnapshot) -> TrackerView {
    TrackerView {
        policy: policy_label(snapshot.policy).to_string(),
        tasks: snapshot
            .tasks
            .into_iter()
            .map(|task| TaskItem {
                task_id: task.id.to_string(),
                name: task.name,
                completed: task.completed,
            })
            .collect(),
        points: snapshot.points,
        level: snapshot.level,
        points_per_level: snapshot.points_per_level,
        can_add_task: snapshot.can_add_task,
        progress_segments: snapshot.progress_segments,
        tasks_until_next_level: snapshot.tasks_until_next_level,
        flower_asset: snapshot.flower_asset,
        day_label: snapshot.day_label,
        settle_pending_ms: snapshot.settle_pending_ms,
    }
}

fn to_level_up_item(event: LevelUpEvent) -> LevelUpItem {
    LevelUpItem {
        previous_level: event.previous_level,
        new_level: event.new_level,
        levels_gained: event.levels_gained,
    }
}

fn policy_label(policy: bloomtrack_core::CompletionPolicy) -> &'static str {
    match policy {
        bloomtrack_core::CompletionPolicy::Submit => "submit",
        bloomtrack_core::CompletionPolicy::Auto => "auto",
    }
}
