//! Example note-taking backend wired with graft.
//!
//! ```text
//!              ┌──────────────┐      ┌──────────────┐
//!              │ NotesService │      │ AuditService │
//!              └──┬───┬───┬───┘      └───┬──────┬───┘
//!     standard    │   │   │ private      │      │ private
//!        ┌────────┘   │   └──────┐       │      └──────┐
//!        ▼            ▼          ▼       ▼             ▼
//!   ┌─────────┐  ┌─────────┐  ┌────────────┐     ┌────────────┐
//!   │  Store  │◀─┤dyn Clock│  │ RequestLog │     │ RequestLog │
//!   └─────────┘  └─────────┘  └────────────┘     └────────────┘
//!        ▲  (shared by both services; Settings is injected by name)
//! ```
//!
//! `Store` is created by the resolver and shared. Each service gets its own
//! `RequestLog`. The clock is found through the `Clock` capability, and the
//! settings object is looked up under the name `"settings"`.

pub mod logging;

use std::time::{SystemTime, UNIX_EPOCH};

use graft::prelude::*;

/// Name under which [`Settings`] is registered.
pub const SETTINGS: &str = "settings";

/// Source of timestamps.
#[capability]
pub trait Clock: Send + Sync {
    /// Seconds since the Unix epoch.
    fn now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Default, Injectable)]
#[injectable(provides(Clock))]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default()
    }
}

/// A clock that always returns the same instant.
#[derive(Debug, Default, Injectable)]
#[injectable(provides(Clock))]
pub struct FixedClock {
    /// The instant returned by [`Clock::now`].
    pub at: u64,
}

impl Clock for FixedClock {
    fn now(&self) -> u64 {
        self.at
    }
}

/// Deployment settings. Must be provided by the caller.
#[derive(Debug, Injectable)]
#[injectable(no_default)]
pub struct Settings {
    /// Largest accepted note body, in bytes.
    pub max_note_len: usize,
    /// Label attached to audit lines.
    pub environment: String,
}

/// One stored note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Creation time.
    pub created_at: u64,
    /// Note body.
    pub body: String,
}

/// In-memory note storage.
#[derive(Debug, Default, Injectable)]
pub struct Store {
    notes: Vec<Note>,
}

impl Store {
    /// Returns every stored note.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }
}

/// Per-service request log.
#[derive(Debug, Default, Injectable)]
pub struct RequestLog {
    lines: Vec<String>,
}

impl RequestLog {
    /// Returns the recorded lines.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Accepts notes.
#[derive(Default, Injectable)]
pub struct NotesService {
    #[inject]
    store: Dep<Store>,
    #[inject]
    clock: Dep<dyn Clock>,
    #[inject(name = "settings")]
    settings: Dep<Settings>,
    #[inject(private)]
    log: Dep<RequestLog>,
}

impl NotesService {
    /// Stores a note, returning `false` if it is too long.
    pub fn add(&self, body: &str) -> bool {
        let limit = self.settings.read().max_note_len;
        if body.len() > limit {
            self.log.write().lines.push(format!("rejected {} bytes", body.len()));
            tracing::warn!(len = body.len(), limit, "note rejected");
            return false;
        }

        let created_at = self.clock.read().now();
        self.store.write().notes.push(Note {
            created_at,
            body: body.to_string(),
        });
        self.log.write().lines.push(format!("stored {} bytes", body.len()));
        true
    }

    /// Returns the service's own request log.
    #[must_use]
    pub fn log(&self) -> &Dep<RequestLog> {
        &self.log
    }
}

/// Reports on stored notes.
#[derive(Default, Injectable)]
pub struct AuditService {
    #[inject]
    store: Dep<Store>,
    #[inject = "settings"]
    settings: Dep<Settings>,
    #[inject = "private"]
    log: Dep<RequestLog>,
}

impl AuditService {
    /// Summarises the store.
    #[must_use]
    pub fn report(&self) -> String {
        let count = self.store.read().notes().len();
        let line = format!("[{}] {count} notes", self.settings.read().environment);
        self.log.write().lines.push(line.clone());
        line
    }

    /// Returns the service's own request log.
    #[must_use]
    pub fn log(&self) -> &Dep<RequestLog> {
        &self.log
    }
}

/// The wired application.
pub struct App {
    /// Note intake.
    pub notes: Shared<NotesService>,
    /// Reporting.
    pub audit: Shared<AuditService>,
}

/// Wires the application around the given settings and clock.
///
/// Resolver progress is forwarded to `tracing` at info level.
///
/// # Errors
///
/// Returns the resolver's error if the graph cannot be completed.
pub fn wire<C>(settings: Settings, clock: Shared<C>, config: ResolverConfig) -> Result<App, InjectError>
where
    C: Injectable + Clock,
{
    let notes = shared(NotesService::default());
    let audit = shared(AuditService::default());

    let mut graph = Graph::with_config(config).with_logger(|message: core::fmt::Arguments<'_>| {
        tracing::info!(target: "wire", "{message}");
    });
    graph.provide_all([
        Object::new(shared(settings)).named(SETTINGS),
        Object::new(clock),
        Object::new(notes.clone()),
        Object::new(audit.clone()),
    ])?;
    graph.resolve()?;

    tracing::info!(objects = graph.len(), "application wired");
    Ok(App { notes, audit })
}
