//! quire-core: contract template model and markup front end.
//!
//! Provides the static side of the contract engine: typed variables and
//! templates, contract records with their version history, the markup lexer
//! and parser, question-flow items, and the template registry.
//!
//! # Public API
//!
//! Key types are re-exported at the crate root for convenience:
//!
//! - [`Template`], [`VariableDefinition`], [`ContractType`] -- template model
//! - [`Contract`], [`ContractVersion`], [`ChangeRecord`] -- contract records
//! - [`parse()`] / [`Document`] / [`Node`] -- markup parsing
//! - [`QuestionFlowItem`], [`Condition`] -- question flows
//! - [`TemplateRegistry`] -- contract type lookup
//! - [`validate_template()`] -- authoring checks

pub mod bindings;
pub mod builtin;
pub mod contract;
pub mod error;
pub mod lexer;
pub mod model;
pub mod parser;
pub mod question;
pub mod registry;
pub mod validate;

// ── Convenience re-exports: key types ────────────────────────────────

pub use contract::{
    AuditEvent, AuditKind, ChangeRecord, Contract, ContractStatus, ContractVersion, FieldKind,
    Party, SignatureField,
};
pub use error::RegistryError;
pub use model::{
    Bindings, ClauseDefinition, ContractType, Template, VariableDefinition, VariableType,
    COMPUTED_FLAGS, ENGAGEMENT_TYPE_KEY,
};
pub use parser::{parse, Document, Node};
pub use question::{Condition, QuestionFlowItem};
pub use registry::{TemplateEntry, TemplateRegistry};
pub use validate::{validate_questions, validate_template, IssueKind, Severity, TemplateIssue};
