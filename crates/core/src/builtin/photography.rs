use serde_json::json;

use super::{defaults, DEFAULT_PROVIDER_NAME};
use crate::model::{ContractType, Template, VariableDefinition, VariableType};
use crate::question::{Condition, QuestionFlowItem};
use crate::registry::TemplateEntry;

const BODY: &str = r#"# Photography Services Agreement

This agreement is made on {{contract_date}} between {{provider_name}} (the "Photographer") and {{client_name}} (the "Client"), reachable at {{client_email}}.

## 1. Engagement

The Photographer will photograph the {{event_type}} on {{event_date}} at {{event_location}}.
Coverage is {{coverage_hours}} hours{{#if second_shooter}}, with a second photographer for the full coverage period{{/if}}.

## 2. Deliverables

The Client will receive at least {{image_count}} edited images in an online gallery within {{delivery_weeks}} weeks of the event.

## 3. Fees and Payment

The total fee is ${{base_fee}}. A non-refundable retainer of {{retainer_percentage}}% is due on signing and the balance is due {{balance_due_days}} days before the event.
{{#if travel_fee}}
A travel fee of ${{travel_fee}} is added to the total fee.
{{/if}}

## 4. Portfolio Use

{{#if portfolio_use}}The Photographer may use images from the engagement for portfolio and promotion ({{portfolio_rights}} release){{#if embargo_days}}, but not before {{embargo_days}} days after the event{{/if}}.{{else}}The Photographer will not publish images from the engagement.{{/if}}

## 5. Cancellation

If the Client cancels, the retainer is kept by the Photographer. If the Photographer cannot attend, all payments are refunded in full.

---

### PROVIDER

{{provider_name}}
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
        id: "photography-v1".to_string(),
        contract_type: ContractType::Photography,
        name: "Photography Services Agreement".to_string(),
        body_markup: BODY.to_string(),
        variables: vec![
            VariableDefinition::new("provider_name", "Photographer", Text),
            VariableDefinition::new("contract_date", "Contract date", Date),
            VariableDefinition::new("client_name", "Client name", Text),
            VariableDefinition::new("client_email", "Client email", Text),
            VariableDefinition::new("event_type", "Event type", Text),
            VariableDefinition::new("event_date", "Event date", Date),
            VariableDefinition::new("event_location", "Event location", Text),
            VariableDefinition::new("coverage_hours", "Coverage hours", Number),
            VariableDefinition::new("second_shooter", "Second photographer", Text),
            VariableDefinition::new("image_count", "Minimum edited images", Number),
            VariableDefinition::new("delivery_weeks", "Delivery time (weeks)", Number),
            VariableDefinition::new("base_fee", "Total fee", Number),
            VariableDefinition::new("retainer_percentage", "Retainer", Percentage),
            VariableDefinition::new("balance_due_days", "Balance due (days before event)", Number),
            VariableDefinition::new("travel_fee", "Travel fee", Number),
            VariableDefinition::new("portfolio_use", "Portfolio use", Text),
            VariableDefinition::new("portfolio_rights", "Portfolio release", Text),
            VariableDefinition::new("embargo_days", "Embargo (days)", Number),
        ],
        default_values: defaults(json!({
            "provider_name": DEFAULT_PROVIDER_NAME,
            "balance_due_days": 14,
            "retainer_percentage": 30,
            "second_shooter": "no",
            "portfolio_use": "yes",
            "portfolio_rights": "immediate",
        })),
        clauses: vec![],
    }
}

fn questions() -> Vec<QuestionFlowItem> {
    vec![
        QuestionFlowItem::new("client_name", "What is the client's full name?").required(),
        QuestionFlowItem::new("client_email", "What is the client's email address?").required(),
        QuestionFlowItem::new("contract_date", "What date should the contract carry?").required(),
        QuestionFlowItem::new("event_type", "What kind of event is being photographed?")
            .required()
            .default_value("wedding"),
        QuestionFlowItem::new("event_date", "When is the event?").required(),
        QuestionFlowItem::new("event_location", "Where is the event?").required(),
        QuestionFlowItem::new("coverage_hours", "How many hours of coverage?")
            .required()
            .default_value(8),
        QuestionFlowItem::new("second_shooter", "Is a second photographer included?")
            .options(&["yes", "no"])
            .default_value("no"),
        QuestionFlowItem::new("image_count", "How many edited images at minimum?")
            .default_value(400),
        QuestionFlowItem::new("delivery_weeks", "How many weeks until gallery delivery?")
            .default_value(6),
        QuestionFlowItem::new("base_fee", "What is the total fee?").required(),
        QuestionFlowItem::new("retainer_percentage", "What retainer percentage is due on signing?")
            .default_value(30),
        QuestionFlowItem::new("travel_fee", "Is there a travel fee? Leave blank for none."),
        QuestionFlowItem::new("portfolio_use", "May the images be used in your portfolio?")
            .options(&["yes", "no"])
            .default_value("yes"),
        QuestionFlowItem::new("portfolio_rights", "Can they be published right away or after an embargo?")
            .options(&["immediate", "embargo"])
            .default_value("immediate")
            .when(Condition::truthy("portfolio_use")),
        QuestionFlowItem::new("embargo_days", "How many days should the embargo last?")
            .default_value(30)
            .when(Condition::All {
                conditions: vec![
                    Condition::truthy("portfolio_use"),
                    Condition::equals("portfolio_rights", "embargo"),
                ],
            }),
    ]
}

pub(super) fn entry() -> TemplateEntry {
    TemplateEntry {
        template: template(),
        questions: questions(),
    }
}
