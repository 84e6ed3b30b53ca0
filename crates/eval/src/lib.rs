//! quire-eval: the dynamic side of the contract engine.
//!
//! Turns templates plus bindings into documents and tracks how bindings
//! change between contract versions:
//!
//! - [`render`] -- pure template rendering for the interactive and PDF modes
//! - [`flow`] -- the question flow state machine used to fill in bindings
//! - [`revision`] -- change records and versioned contract revisions
//! - [`authoring`] -- create-mode sessions producing version-1 drafts
//!
//! Rendering and traversal are total functions. Only the steps that look up
//! a template or call the [`quire_storage::ContractStore`] can fail, with a
//! [`RevisionError`].

pub mod authoring;
pub mod error;
pub mod flow;
pub mod numeric;
pub mod render;
pub mod revision;

pub use authoring::CreateSession;
pub use error::RevisionError;
pub use flow::{find_next_question_index, AnswerState, FlowPhase, QuestionSession, SessionMode};
pub use render::{render, render_contract, render_page, RenderMode, TEMPLATE_NOT_FOUND};
pub use revision::{diff_bindings, ChangeSet, RevisionSession};

use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// RFC 3339 form of `at`, as stored on contracts and audit events.
pub fn format_timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339)
        .unwrap_or_else(|_| at.unix_timestamp().to_string())
}
