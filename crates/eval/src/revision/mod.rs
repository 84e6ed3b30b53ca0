//! Revision tracking for existing contracts.
//!
//! A [`RevisionSession`] drives an edit-mode question flow over a stored
//! contract and turns the resulting change set into the next version. The
//! session's baseline only moves once the store has accepted the new
//! version, so a failed save can simply be retried.

mod changes;

use quire_core::bindings::stringify;
use quire_core::{
    AuditEvent, AuditKind, ChangeRecord, Contract, ContractStatus, ContractVersion,
    TemplateRegistry,
};
use quire_storage::ContractStore;
use serde_json::json;
use time::OffsetDateTime;

use crate::error::RevisionError;
use crate::flow::QuestionSession;
use crate::format_timestamp;

pub use changes::{diff_bindings, ChangeSet};

const CLIENT_NAME_KEY: &str = "client_name";
const CLIENT_EMAIL_KEY: &str = "client_email";

/// An edit-mode session over one stored contract.
#[derive(Debug, Clone)]
pub struct RevisionSession {
    original: Contract,
    flow: QuestionSession,
}

impl RevisionSession {
    /// Start revising `original` with the flow registered for its type.
    pub fn new(original: Contract, registry: &TemplateRegistry) -> Result<Self, RevisionError> {
        let entry = registry
            .entry(original.contract_type)
            .ok_or(RevisionError::TemplateNotFound(original.contract_type))?;
        let flow = QuestionSession::edit(&entry.template, &entry.questions, &original);
        Ok(RevisionSession { original, flow })
    }

    /// Load contract `id` from the store and start revising it.
    pub async fn open<S>(
        store: &S,
        registry: &TemplateRegistry,
        id: &str,
    ) -> Result<Self, RevisionError>
    where
        S: ContractStore + ?Sized,
    {
        let original = store
            .get_contract(id)
            .await?
            .ok_or_else(|| RevisionError::ContractNotFound { id: id.to_string() })?;
        RevisionSession::new(original, registry)
    }

    /// The contract as last loaded or saved.
    pub fn original(&self) -> &Contract {
        &self.original
    }

    pub fn flow(&self) -> &QuestionSession {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut QuestionSession {
        &mut self.flow
    }

    pub fn changes(&self) -> Vec<ChangeRecord> {
        self.flow.changes()
    }

    pub fn has_changes(&self) -> bool {
        !self.flow.change_set().is_empty()
    }

    /// The next version of the contract, or `None` when nothing changed.
    ///
    /// The new version is a draft: captured signatures and field placements
    /// are cleared, since they were given for the previous text. The
    /// pre-revision bindings are appended to the history.
    pub fn build_revision(&self, actor: &str, at: OffsetDateTime) -> Option<Contract> {
        let changes = self.flow.change_set();
        if changes.is_empty() {
            return None;
        }
        let timestamp = format_timestamp(at);
        let bindings = self.flow.bindings();
        let mut next = self.original.clone();

        if changes.contains(CLIENT_NAME_KEY) {
            let client_name = bindings.get(CLIENT_NAME_KEY).map(stringify).unwrap_or_default();
            next.title = self.flow.template().contract_title(&client_name);
            next.client_name = client_name;
        }
        if changes.contains(CLIENT_EMAIL_KEY) {
            next.client_email = bindings
                .get(CLIENT_EMAIL_KEY)
                .map(stringify)
                .unwrap_or_default();
        }

        next.variables = bindings.clone();
        next.version = self.original.version.saturating_add(1);
        next.status = ContractStatus::Draft;
        next.field_values.clear();
        next.signature_fields.clear();
        next.updated_at = timestamp.clone();

        next.history.push(ContractVersion {
            version: self.original.version,
            created_at: timestamp.clone(),
            modified_by: actor.to_string(),
            changes: Vec::new(),
            variables: self.original.variables.clone(),
        });
        next.audit_trail.push(AuditEvent {
            kind: AuditKind::Revised,
            at: timestamp,
            actor: actor.to_string(),
            details: json!({
                "from_version": self.original.version,
                "to_version": next.version,
                "change_count": changes.len(),
                "fields": changes.iter().map(|c| c.field.as_str()).collect::<Vec<_>>(),
            }),
        });
        Some(next)
    }

    /// Persist the next version.
    ///
    /// Returns `Ok(None)` without touching the store when nothing changed.
    /// On failure the session is left as it was.
    pub async fn save<S>(
        &mut self,
        store: &S,
        actor: &str,
        at: OffsetDateTime,
    ) -> Result<Option<Contract>, RevisionError>
    where
        S: ContractStore + ?Sized,
    {
        let Some(next) = self.build_revision(actor, at) else {
            tracing::debug!(id = %self.original.id, "revision has no changes, nothing saved");
            return Ok(None);
        };
        let change_count = self.flow.change_set().len();
        let stored = store.update_contract(next, self.original.version).await?;
        tracing::info!(
            id = %stored.id,
            version = stored.version,
            change_count,
            actor,
            "saved contract revision"
        );
        self.original = stored.clone();
        self.flow.rebase();
        Ok(Some(stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::ContractType;
    use serde_json::Value;
    use time::macros::datetime;

    fn stored_contract() -> Contract {
        let registry = TemplateRegistry::builtin();
        let template = registry.template(ContractType::Photography).unwrap();
        let mut variables = template.default_values.clone();
        variables.insert("client_name".into(), Value::from("Ada Park"));
        variables.insert("client_email".into(), Value::from("ada@example.com"));
        variables.insert("coverage_hours".into(), Value::from(6));
        variables.insert("base_fee".into(), Value::from(2400));
        Contract {
            id: "c-1".into(),
            contract_type: ContractType::Photography,
            title: template.contract_title("Ada Park"),
            client_name: "Ada Park".into(),
            client_email: "ada@example.com".into(),
            status: ContractStatus::Sent,
            version: 3,
            variables,
            field_values: [("sig".to_string(), "data:image/png;base64,AA".to_string())]
                .into_iter()
                .collect(),
            signature_fields: vec![],
            history: vec![],
            audit_trail: vec![],
            created_at: "2026-01-01T00:00:00Z".into(),
            updated_at: "2026-01-01T00:00:00Z".into(),
        }
    }

    #[test]
    fn no_changes_builds_nothing() {
        let session = RevisionSession::new(stored_contract(), &TemplateRegistry::builtin()).unwrap();
        assert!(session
            .build_revision("studio", datetime!(2026-02-01 10:00 UTC))
            .is_none());
    }

    #[test]
    fn revision_bumps_version_and_snapshots_history() {
        let original = stored_contract();
        let mut session = RevisionSession::new(original.clone(), &TemplateRegistry::builtin()).unwrap();
        session
            .flow_mut()
            .commit_answer("coverage_hours", "8", Some(quire_core::VariableType::Number));
        session.flow_mut().commit_answer("event_location", "Harbor Hall", None);

        let next = session
            .build_revision("studio", datetime!(2026-02-01 10:00 UTC))
            .unwrap();
        assert_eq!(next.version, 4);
        assert_eq!(next.status, ContractStatus::Draft);
        assert!(next.field_values.is_empty());
        assert_eq!(next.history.len(), 1);
        assert_eq!(next.history[0].version, 3);
        assert_eq!(next.history[0].variables, original.variables);
        assert!(next.history[0].changes.is_empty());
        assert_eq!(next.variables.get("coverage_hours"), Some(&Value::from(8)));
        assert_eq!(next.title, original.title);
        assert_eq!(next.updated_at, "2026-02-01T10:00:00Z");

        let event = next.audit_trail.last().unwrap();
        assert_eq!(event.kind, AuditKind::Revised);
        assert_eq!(event.details["from_version"], 3);
        assert_eq!(event.details["to_version"], 4);
        assert_eq!(event.details["change_count"], 2);
    }

    #[test]
    fn client_name_change_retitles() {
        let mut session = RevisionSession::new(stored_contract(), &TemplateRegistry::builtin()).unwrap();
        session.flow_mut().commit_answer("client_name", "Ada Park-Lee", None);
        session
            .flow_mut()
            .commit_answer("client_email", "ada@parklee.com", None);
        let next = session
            .build_revision("studio", datetime!(2026-02-01 10:00 UTC))
            .unwrap();
        assert_eq!(next.client_name, "Ada Park-Lee");
        assert_eq!(next.client_email, "ada@parklee.com");
        assert!(next.title.ends_with(" - Ada Park-Lee"));
    }

    #[test]
    fn unknown_type_has_no_template() {
        let mut contract = stored_contract();
        contract.contract_type = ContractType::Unknown;
        let err = RevisionSession::new(contract, &TemplateRegistry::builtin()).unwrap_err();
        assert!(matches!(err, RevisionError::TemplateNotFound(ContractType::Unknown)));
    }
}
