//! Create-mode authoring of new contracts.

use quire_core::bindings::stringify;
use quire_core::{AuditEvent, AuditKind, Contract, ContractStatus, ContractType, TemplateRegistry};
use quire_storage::ContractStore;
use serde_json::json;
use time::OffsetDateTime;

use crate::error::RevisionError;
use crate::flow::QuestionSession;
use crate::format_timestamp;

/// A create-mode question flow that ends in a version-1 draft.
#[derive(Debug, Clone)]
pub struct CreateSession {
    contract_type: ContractType,
    flow: QuestionSession,
}

impl CreateSession {
    pub fn new(registry: &TemplateRegistry, contract_type: ContractType) -> Result<Self, RevisionError> {
        let entry = registry
            .entry(contract_type)
            .ok_or(RevisionError::TemplateNotFound(contract_type))?;
        Ok(CreateSession {
            contract_type,
            flow: QuestionSession::create(&entry.template, &entry.questions),
        })
    }

    pub fn contract_type(&self) -> ContractType {
        self.contract_type
    }

    pub fn flow(&self) -> &QuestionSession {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut QuestionSession {
        &mut self.flow
    }

    /// Build the draft contract from a completed flow.
    ///
    /// Fails with [`RevisionError::Incomplete`] before the flow reaches
    /// review and with [`RevisionError::MissingRequired`] while visible
    /// required questions are unanswered.
    pub fn finish(&self, id: &str, actor: &str, at: OffsetDateTime) -> Result<Contract, RevisionError> {
        if !self.flow.is_complete() {
            return Err(RevisionError::Incomplete);
        }
        let missing = self.flow.missing_required();
        if !missing.is_empty() {
            return Err(RevisionError::MissingRequired(missing));
        }

        let bindings = self.flow.bindings();
        let field = |key: &str| bindings.get(key).map(stringify).unwrap_or_default();
        let client_name = field("client_name");
        let timestamp = format_timestamp(at);

        Ok(Contract {
            id: id.to_string(),
            contract_type: self.contract_type,
            title: self.flow.template().contract_title(&client_name),
            client_email: field("client_email"),
            client_name,
            status: ContractStatus::Draft,
            version: 1,
            variables: bindings.clone(),
            field_values: Default::default(),
            signature_fields: Vec::new(),
            history: Vec::new(),
            audit_trail: vec![AuditEvent {
                kind: AuditKind::Created,
                at: timestamp.clone(),
                actor: actor.to_string(),
                details: json!({ "version": 1 }),
            }],
            created_at: timestamp.clone(),
            updated_at: timestamp,
        })
    }

    /// Finish the flow and insert the draft into the store.
    pub async fn save<S>(
        &self,
        store: &S,
        id: &str,
        actor: &str,
        at: OffsetDateTime,
    ) -> Result<Contract, RevisionError>
    where
        S: ContractStore + ?Sized,
    {
        let contract = self.finish(id, actor, at)?;
        let stored = store.insert_contract(contract).await?;
        tracing::info!(id = %stored.id, contract_type = %stored.contract_type, actor, "created contract");
        Ok(stored)
    }
}
