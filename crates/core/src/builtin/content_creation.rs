use serde_json::json;

use super::{defaults, DEFAULT_PROVIDER_NAME};
use crate::model::{ContractType, Template, VariableDefinition, VariableType};
use crate::question::{Condition, QuestionFlowItem};
use crate::registry::TemplateEntry;

const BODY: &str = r#"# Content Creation Agreement

This agreement is between {{creator_name}} (the "Creator") and {{client_name}} (the "Client"), reachable at {{client_email}}, on behalf of {{brand_name}}.

## 1. Campaign

The Creator will produce {{deliverable_count}} pieces of original content for the {{campaign_name}} campaign, for publication on {{platforms}}.
First drafts are due by {{draft_due_date}}. The fee covers {{revision_rounds}} rounds of revisions.

## 2. Usage Rights

The Client may use the content in paid and organic channels for {{usage_months}} months from first publication.
{{#if exclusivity}}
For {{exclusivity_months}} months from first publication, the Creator will not produce sponsored content for a direct competitor of {{brand_name}}.
{{else}}
The Creator is free to work with other brands, including competitors of {{brand_name}}.
{{/if}}

## 3. Compensation

The Client will pay a fee of ${{creator_fee}} within {{payment_terms_days}} days of final delivery.

---

### CONTENT CREATOR

{{creator_name}}
Signature: {{signature_placeholder_provider}}
Date: {{date_placeholder_provider}}

### CLIENT

{{client_name}}
Signature: {{signature_placeholder_client}}
Date: {{date_placeholder_client}}
"#;

fn template() -> Template {
    use VariableType::*;
    Template {
        id: "content-creation-v1".to_string(),
        contract_type: ContractType::ContentCreation,
        name: "Content Creation Agreement".to_string(),
        body_markup: BODY.to_string(),
        variables: vec![
            VariableDefinition::new("creator_name", "Creator", Text),
            VariableDefinition::new("client_name", "Client name", Text),
            VariableDefinition::new("client_email", "Client email", Text),
            VariableDefinition::new("brand_name", "Brand", Text),
            VariableDefinition::new("campaign_name", "Campaign", Text),
            VariableDefinition::new("deliverable_count", "Deliverables", Number),
            VariableDefinition::new("platforms", "Platforms", Text),
            VariableDefinition::new("draft_due_date", "Draft due date", Date),
            VariableDefinition::new("revision_rounds", "Revision rounds", Number),
            VariableDefinition::new("usage_months", "Usage period (months)", Number),
            VariableDefinition::new("exclusivity", "Exclusivity", Text),
            VariableDefinition::new("exclusivity_months", "Exclusivity period (months)", Number),
            VariableDefinition::new("creator_fee", "Creator fee", Number),
            VariableDefinition::new("payment_terms_days", "Payment terms (days)", Number),
        ],
        default_values: defaults(json!({
            "creator_name": DEFAULT_PROVIDER_NAME,
            "payment_terms_days": 30,
            "revision_rounds": 2,
            "exclusivity": "no",
        })),
        clauses: vec![],
    }
}

fn questions() -> Vec<QuestionFlowItem> {
    vec![
        QuestionFlowItem::new("client_name", "Who is signing for the client?").required(),
        QuestionFlowItem::new("client_email", "What is their email address?").required(),
        QuestionFlowItem::new("brand_name", "Which brand is the content for?").required(),
        QuestionFlowItem::new("campaign_name", "What is the campaign called?").required(),
        QuestionFlowItem::new("deliverable_count", "How many pieces of content?")
            .required()
            .default_value(3),
        QuestionFlowItem::new("platforms", "Which platforms will it be published on?")
            .default_value("Instagram and TikTok"),
        QuestionFlowItem::new("draft_due_date", "When are first drafts due?").required(),
        QuestionFlowItem::new("revision_rounds", "How many revision rounds are included?")
            .default_value(2),
        QuestionFlowItem::new("usage_months", "For how many months may the client use the content?")
            .default_value(12),
        QuestionFlowItem::new("exclusivity", "Is there a competitor exclusivity period?")
            .options(&["yes", "no"])
            .default_value("no"),
        QuestionFlowItem::new("exclusivity_months", "How many months of exclusivity?")
            .default_value(3)
            .when(Condition::equals("exclusivity", "yes")),
        QuestionFlowItem::new("creator_fee", "What is the creator fee?").required(),
    ]
}

pub(super) fn entry() -> TemplateEntry {
    TemplateEntry {
        template: template(),
        questions: questions(),
    }
}
