use serde_json::json;

use super::{defaults, DEFAULT_PROVIDER_NAME};
use crate::model::{ContractType, Template, VariableDefinition, VariableType, ENGAGEMENT_TYPE_KEY};
use crate::question::{Condition, QuestionFlowItem};
use crate::registry::TemplateEntry;

const BODY: &str = r#"# Web Development Agreement

This agreement is between {{developer_name}} (the "Developer") and {{client_name}} (the "Client"), reachable at {{client_email}}, for work on {{project_name}} starting {{start_date}}.

{{#if is_project}}
## 1. Project Scope

The Developer will deliver the following: {{project_scope}}.
The work is split into {{milestone_count}} milestones and is expected to take {{estimated_weeks}} weeks.

## 2. Budget

The fixed project budget is ${{project_budget}}, invoiced in equal parts at each milestone.
{{else}}
## 1. Subscription Services

The Developer will provide ongoing development, maintenance and support for a monthly rate of ${{monthly_rate}}, covering up to {{included_hours}} hours each month.

## 2. Term

The subscription renews monthly. Either party may cancel with {{notice_days}} days written notice.
{{/if}}

## 3. Additional Work

Work outside the agreed scope is billed at ${{hourly_rate}} per hour after written approval by the Client.
{{#if hosting_included}}
Hosting and domain management are included for the term of this agreement.
{{/if}}

## 4. Ownership

On full payment, the Client owns the delivered code and content. The Developer may reuse general-purpose tools and libraries.

---

### DEVELOPER

{{developer_name}}
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
        id: "web-development-v1".to_string(),
        contract_type: ContractType::WebDevelopment,
        name: "Web Development Agreement".to_string(),
        body_markup: BODY.to_string(),
        variables: vec![
            VariableDefinition::new("developer_name", "Developer", Text),
            VariableDefinition::new("client_name", "Client name", Text),
            VariableDefinition::new("client_email", "Client email", Text),
            VariableDefinition::new("project_name", "Project", Text),
            VariableDefinition::new("start_date", "Start date", Date),
            VariableDefinition::new(ENGAGEMENT_TYPE_KEY, "Engagement type", Text),
            VariableDefinition::new("project_scope", "Scope", Text),
            VariableDefinition::new("milestone_count", "Milestones", Number),
            VariableDefinition::new("estimated_weeks", "Estimated duration (weeks)", Number),
            VariableDefinition::new("project_budget", "Project budget", Number),
            VariableDefinition::new("monthly_rate", "Monthly rate", Number),
            VariableDefinition::new("included_hours", "Included hours per month", Number),
            VariableDefinition::new("notice_days", "Cancellation notice (days)", Number),
            VariableDefinition::new("hourly_rate", "Hourly rate", Number),
            VariableDefinition::new("hosting_included", "Hosting included", Text),
        ],
        default_values: defaults(json!({
            "developer_name": DEFAULT_PROVIDER_NAME,
            "engagement_type": "project",
            "hourly_rate": 120,
            "notice_days": 30,
            "hosting_included": "no",
        })),
        clauses: vec![],
    }
}

fn questions() -> Vec<QuestionFlowItem> {
    let project = || Condition::equals(ENGAGEMENT_TYPE_KEY, "project");
    let subscription = || Condition::equals(ENGAGEMENT_TYPE_KEY, "subscription");
    vec![
        QuestionFlowItem::new("client_name", "Who is the client?").required(),
        QuestionFlowItem::new("client_email", "What is the client's email address?").required(),
        QuestionFlowItem::new("project_name", "What is the project or site called?").required(),
        QuestionFlowItem::new("start_date", "When does the work start?").required(),
        QuestionFlowItem::new(ENGAGEMENT_TYPE_KEY, "Is this a fixed project or a monthly subscription?")
            .required()
            .options(&["project", "subscription"])
            .default_value("project"),
        QuestionFlowItem::new("project_scope", "Describe the deliverables.")
            .required()
            .when(project()),
        QuestionFlowItem::new("milestone_count", "How many milestones?")
            .default_value(3)
            .when(project()),
        QuestionFlowItem::new("estimated_weeks", "How many weeks will it take?")
            .default_value(8)
            .when(project()),
        QuestionFlowItem::new("project_budget", "What is the fixed budget?")
            .required()
            .when(project()),
        QuestionFlowItem::new("monthly_rate", "What is the monthly rate?")
            .required()
            .when(subscription()),
        QuestionFlowItem::new("included_hours", "How many hours are included each month?")
            .default_value(10)
            .when(subscription()),
        QuestionFlowItem::new("notice_days", "How many days notice to cancel?")
            .default_value(30)
            .when(subscription()),
        QuestionFlowItem::new("hourly_rate", "What hourly rate applies to extra work?")
            .default_value(120),
        QuestionFlowItem::new("hosting_included", "Is hosting included?")
            .options(&["yes", "no"])
            .default_value("no"),
    ]
}

pub(super) fn entry() -> TemplateEntry {
    TemplateEntry {
        template: template(),
        questions: questions(),
    }
}
