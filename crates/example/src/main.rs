//! Example wiring CLI.
//!
//! Wires the note-taking backend, stores every argument as a note, and
//! logs an audit report.
//!
//! # Usage
//!
//! ```bash
//! GRAFT_LOG=debug GRAFT_LOG_FORMAT=compact wire "buy milk" "call mum"
//! ```

use std::process::ExitCode;

use example::logging::LogSettings;
use example::{Settings, SystemClock, wire};
use graft::prelude::*;

fn main() -> ExitCode {
    LogSettings::from_env().init();

    let settings = Settings {
        max_note_len: 280,
        environment: "demo".to_string(),
    };

    let app = match wire(settings, shared(SystemClock), ResolverConfig::default()) {
        Ok(app) => app,
        Err(err) => {
            tracing::error!(%err, "wiring failed");
            return ExitCode::FAILURE;
        }
    };

    for body in std::env::args().skip(1) {
        let accepted = app.notes.read().add(&body);
        tracing::info!(accepted, body = %body, "note submitted");
    }

    let report = app.audit.read().report();
    tracing::info!(report = %report, "audit");

    ExitCode::SUCCESS
}
