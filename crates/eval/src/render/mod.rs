//! Template renderer.
//!
//! `render(template, contract, mode)` is a pure function: the same inputs
//! always produce byte-identical markup. The pipeline is
//!
//! 1. display variables: template defaults layered under contract variables,
//!    plus the computed `is_project` / `is_subscription` flags;
//! 2. evaluation of the parsed body: conditionals, interpolation (escaped,
//!    with numbers spelled out where appropriate) and signing anchors;
//! 3. markdown-lite structuring into HTML lines.
//!
//! Nothing here fails: a missing template renders [`TEMPLATE_NOT_FOUND`],
//! missing values render empty, unresolved conditionals are false.

mod anchors;
mod escape;
mod markup;

use std::fmt;
use std::str::FromStr;

use quire_core::bindings::{is_truthy, lookup, resolve_layers, stringify};
use quire_core::{
    Bindings, Contract, Node, Template, TemplateRegistry, VariableType, ENGAGEMENT_TYPE_KEY,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::numeric::{is_spelling_excluded, spelled_display};

pub use anchors::{resolve_anchor, SIGNATURE_IMAGE_HEIGHT_PX};
pub use escape::escape_html;
pub use markup::{structure, SIGNATURE_HEADERS};

/// Rendered in place of a contract whose type has no registered template.
pub const TEMPLATE_NOT_FOUND: &str = r#"<p class="template-missing">Template not found</p>"#;

/// Rendering context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Live editing and client preview: anchors become measurable markers.
    #[default]
    Interactive,
    /// Print/PDF: captured signatures are embedded, the rest left blank.
    Pdf,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Interactive => "interactive",
            RenderMode::Pdf => "pdf",
        }
    }
}

impl fmt::Display for RenderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interactive" => Ok(RenderMode::Interactive),
            "pdf" => Ok(RenderMode::Pdf),
            other => Err(format!(
                "unknown render mode '{}' (expected 'interactive' or 'pdf')",
                other
            )),
        }
    }
}

/// Variables visible to the template body.
pub fn display_variables(template: &Template, contract: &Contract) -> Bindings {
    let mut vars = resolve_layers(&[&template.default_values, &contract.variables]);
    let engagement = vars
        .get(ENGAGEMENT_TYPE_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    vars.insert(
        "is_project".to_string(),
        Value::Bool(engagement == "project"),
    );
    vars.insert(
        "is_subscription".to_string(),
        Value::Bool(engagement == "subscription"),
    );
    vars
}

/// Display form of one bound value: escaped, with number-typed counts spelled
/// out unless the name marks a money amount.
pub fn display_value(template: &Template, name: &str, value: &Value) -> String {
    let spell = template
        .variable(name)
        .is_some_and(|def| def.var_type == VariableType::Number)
        && !is_spelling_excluded(name);
    if spell {
        if let Some(spelled) = spelled_display(value) {
            return spelled;
        }
    }
    match value {
        Value::String(s) => escape_html(s),
        other => escape_html(&stringify(other)),
    }
}

struct Expander<'a> {
    template: &'a Template,
    contract: &'a Contract,
    vars: &'a Bindings,
    mode: RenderMode,
}

impl Expander<'_> {
    fn expand(&self, nodes: &[Node], out: &mut String) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Var(name) => self.interpolate(name, out),
                Node::Conditional {
                    var,
                    then_branch,
                    else_branch,
                } => {
                    let branch = if is_truthy(lookup(self.vars, var)) {
                        then_branch
                    } else {
                        else_branch
                    };
                    self.expand(branch, out);
                }
                Node::Anchor { party, kind } => {
                    out.push_str(&resolve_anchor(party, *kind, self.contract, self.mode))
                }
            }
        }
    }

    fn interpolate(&self, name: &str, out: &mut String) {
        match self.vars.get(name) {
            Some(value) => out.push_str(&display_value(self.template, name, value)),
            // Declared but unanswered
            None if self.template.variable(name).is_some() => {}
            None => {
                out.push_str("{{");
                out.push_str(name);
                out.push_str("}}");
            }
        }
    }
}

/// Expand the template body for `contract` without HTML structuring.
pub fn substitute(template: &Template, contract: &Contract, mode: RenderMode) -> String {
    let vars = display_variables(template, contract);
    let document = template.document();
    let mut text = String::with_capacity(template.body_markup.len());
    Expander {
        template,
        contract,
        vars: &vars,
        mode,
    }
    .expand(&document.nodes, &mut text);
    text
}

/// Render a contract body to HTML.
pub fn render(template: &Template, contract: &Contract, mode: RenderMode) -> String {
    let html = structure(&substitute(template, contract, mode));
    tracing::debug!(
        contract_id = %contract.id,
        template_id = %template.id,
        mode = mode.as_str(),
        bytes = html.len(),
        "rendered contract"
    );
    html
}

/// Render a contract using the template registered for its type.
pub fn render_contract(registry: &TemplateRegistry, contract: &Contract, mode: RenderMode) -> String {
    match registry.template(contract.contract_type) {
        Some(template) => render(template, contract, mode),
        None => {
            tracing::warn!(
                contract_id = %contract.id,
                contract_type = %contract.contract_type,
                "no template registered for contract type"
            );
            TEMPLATE_NOT_FOUND.to_string()
        }
    }
}

/// A standalone HTML page: the template title followed by the rendered body.
///
/// This is the document handed to the PDF rasterizer.
pub fn render_page(template: &Template, contract: &Contract, mode: RenderMode) -> String {
    let title = escape_html(&template.name);
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\" />\n<title>{title}</title>\n<style>{PAGE_STYLE}</style>\n</head>\n<body class=\"contract contract-{mode}\">\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = title,
        mode = mode.as_str(),
        body = render(template, contract, mode),
    )
}

const PAGE_STYLE: &str = "body{font-family:Georgia,serif;max-width:720px;margin:40px auto;line-height:1.5}.signature-block{display:inline-block;width:48%;vertical-align:top}";

#[cfg(test)]
mod tests {
    use super::*;
    use quire_core::{
        ContractStatus, ContractType, FieldKind, Party, SignatureField, VariableDefinition,
    };
    use serde_json::json;

    fn template(body: &str, vars: &[(&str, VariableType)]) -> Template {
        Template {
            id: "t".into(),
            contract_type: ContractType::Photography,
            name: "Test Agreement".into(),
            body_markup: body.to_string(),
            variables: vars
                .iter()
                .map(|(n, t)| VariableDefinition::new(n, n, *t))
                .collect(),
            default_values: Bindings::new(),
            clauses: vec![],
        }
    }

    fn contract(variables: Value) -> Contract {
        Contract {
            id: "c1".into(),
            contract_type: ContractType::Photography,
            title: "Test".into(),
            client_name: String::new(),
            client_email: String::new(),
            status: ContractStatus::Draft,
            version: 1,
            variables: serde_json::from_value(variables).unwrap(),
            field_values: Default::default(),
            signature_fields: vec![],
            history: vec![],
            audit_trail: vec![],
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn hello_example() {
        let t = template(
            "Hello {{name}}, {{#if vip}}welcome back{{else}}welcome{{/if}}.",
            &[("name", VariableType::Text)],
        );
        let vip = contract(json!({"name": "Jo", "vip": true}));
        let regular = contract(json!({"name": "Jo", "vip": false}));
        assert_eq!(
            substitute(&t, &vip, RenderMode::Interactive),
            "Hello Jo, welcome back."
        );
        assert_eq!(
            substitute(&t, &regular, RenderMode::Interactive),
            "Hello Jo, welcome."
        );
        assert_eq!(
            render(&t, &regular, RenderMode::Pdf),
            "<p>Hello Jo, welcome.</p>"
        );
    }

    #[test]
    fn values_are_escaped() {
        let t = template("Note: {{note}}", &[("note", VariableType::Text)]);
        let c = contract(json!({"note": "<script>alert(1)</script>"}));
        let html = render(&t, &c, RenderMode::Interactive);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn counts_are_spelled_but_fees_are_not() {
        let t = template(
            "{{coverage_hours}} hours for {{base_fee}}",
            &[
                ("coverage_hours", VariableType::Number),
                ("base_fee", VariableType::Number),
            ],
        );
        let c = contract(json!({"coverage_hours": 7, "base_fee": 500}));
        assert_eq!(
            substitute(&t, &c, RenderMode::Interactive),
            "7 (seven) hours for 500"
        );
    }

    #[test]
    fn fractional_counts_render_as_entered() {
        let t = template(
            "{{coverage_hours}} hours",
            &[("coverage_hours", VariableType::Number)],
        );
        let hours = quire_core::bindings::coerce_answer("2.1", Some(VariableType::Number));
        let c = contract(json!({ "coverage_hours": hours }));
        assert_eq!(substitute(&t, &c, RenderMode::Pdf), "2.1 hours");

        let c = contract(json!({"coverage_hours": "07.50"}));
        assert_eq!(substitute(&t, &c, RenderMode::Pdf), "07.50 hours");
    }

    #[test]
    fn percentages_and_text_numbers_are_not_spelled() {
        let t = template(
            "{{retainer}}% / {{room}}",
            &[
                ("retainer", VariableType::Percentage),
                ("room", VariableType::Text),
            ],
        );
        let c = contract(json!({"retainer": 30, "room": "12"}));
        assert_eq!(substitute(&t, &c, RenderMode::Interactive), "30% / 12");
    }

    #[test]
    fn missing_values_render_empty_and_unknown_references_stay() {
        let t = template("[{{declared}}] [{{mystery}}]", &[("declared", VariableType::Text)]);
        let c = contract(json!({}));
        assert_eq!(
            substitute(&t, &c, RenderMode::Interactive),
            "[] [{{mystery}}]"
        );
    }

    #[test]
    fn null_values_render_empty() {
        let t = template("[{{a}}]", &[]);
        let c = contract(json!({"a": null}));
        assert_eq!(substitute(&t, &c, RenderMode::Interactive), "[]");
    }

    #[test]
    fn defaults_sit_under_contract_values() {
        let mut t = template("{{a}} {{b}}", &[]);
        t.default_values = serde_json::from_value(json!({"a": "da", "b": "db"})).unwrap();
        let c = contract(json!({"b": "cb"}));
        assert_eq!(substitute(&t, &c, RenderMode::Interactive), "da cb");
    }

    #[test]
    fn engagement_type_drives_computed_flags() {
        let t = template(
            "{{#if is_project}}P{{/if}}{{#if is_subscription}}S{{/if}}",
            &[],
        );
        let project = contract(json!({"engagement_type": "project"}));
        let subscription = contract(json!({"engagement_type": "subscription"}));
        let neither = contract(json!({}));
        assert_eq!(substitute(&t, &project, RenderMode::Interactive), "P");
        assert_eq!(substitute(&t, &subscription, RenderMode::Interactive), "S");
        assert_eq!(substitute(&t, &neither, RenderMode::Interactive), "");
    }

    #[test]
    fn string_truthiness_in_conditionals() {
        let t = template("{{#if flag}}on{{else}}off{{/if}}", &[]);
        for (value, expected) in [
            (json!("yes"), "on"),
            (json!("No"), "off"),
            (json!("off"), "off"),
            (json!(0), "off"),
            (json!(2), "on"),
        ] {
            let c = contract(json!({ "flag": value }));
            assert_eq!(substitute(&t, &c, RenderMode::Interactive), expected);
        }
    }

    #[test]
    fn nested_conditionals_evaluate_inner_blocks() {
        let t = template("{{#if a}}A{{#if b}}B{{else}}b{{/if}}{{/if}}", &[]);
        assert_eq!(
            substitute(&t, &contract(json!({"a": true, "b": false})), RenderMode::Pdf),
            "Ab"
        );
        assert_eq!(
            substitute(&t, &contract(json!({"a": false, "b": true})), RenderMode::Pdf),
            ""
        );
    }

    #[test]
    fn interactive_anchors_are_markers() {
        let t = template("Sign: {{signature_placeholder_client}}", &[]);
        let c = contract(json!({}));
        assert_eq!(
            substitute(&t, &c, RenderMode::Interactive),
            r#"Sign: <span class="signature-anchor" data-party="client" data-field="signature"></span>"#
        );
    }

    #[test]
    fn unknown_party_anchor_keeps_an_empty_marker() {
        let t = template("Witness: {{signature_placeholder_witness}}", &[]);
        let c = contract(json!({}));
        assert_eq!(
            substitute(&t, &c, RenderMode::Interactive),
            r#"Witness: <span class="signature-anchor"></span>"#
        );
        assert!(substitute(&t, &c, RenderMode::Pdf).contains("signature-blank"));
    }

    #[test]
    fn pdf_embeds_captured_values_and_boxes_the_rest() {
        let t = template(
            "{{signature_placeholder_client}}|{{date_placeholder_client}}|{{signature_placeholder_provider}}",
            &[],
        );
        let mut c = contract(json!({}));
        c.signature_fields = vec![
            SignatureField {
                id: "sig".into(),
                party: Party::Client,
                kind: FieldKind::Signature,
                page: 0,
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            },
            SignatureField {
                id: "date".into(),
                party: Party::Client,
                kind: FieldKind::Date,
                page: 0,
                x: 0.0,
                y: 0.0,
                width: 0.0,
                height: 0.0,
            },
        ];
        c.field_values.insert("sig".into(), "data:image/png;base64,QUJD".into());
        c.field_values.insert("date".into(), "2026-03-01".into());

        let out = substitute(&t, &c, RenderMode::Pdf);
        let parts: Vec<&str> = out.split('|').collect();
        assert_eq!(
            parts[0],
            r#"<img class="signature-image" src="data:image/png;base64,QUJD" alt="client signature" style="height:48px;" />"#
        );
        assert_eq!(parts[1], "<strong>2026-03-01</strong>");
        assert!(parts[2].starts_with(r#"<span class="signature-blank" data-field="signature""#));
    }

    #[test]
    fn values_are_not_reparsed_as_markup() {
        let t = template("{{a}}", &[]);
        let c = contract(json!({"a": "{{#if b}}x{{/if}} {{signature_placeholder_client}}"}));
        assert_eq!(
            substitute(&t, &c, RenderMode::Interactive),
            "{{#if b}}x{{/if}} {{signature_placeholder_client}}"
        );
    }

    #[test]
    fn missing_template_renders_sentinel() {
        let registry = TemplateRegistry::new();
        let c = contract(json!({}));
        assert_eq!(
            render_contract(&registry, &c, RenderMode::Interactive),
            TEMPLATE_NOT_FOUND
        );
    }

    #[test]
    fn page_wraps_body_with_escaped_title() {
        let mut t = template("Body", &[]);
        t.name = "R&D Agreement".into();
        let page = render_page(&t, &contract(json!({})), RenderMode::Pdf);
        assert!(page.contains("<h1>R&amp;D Agreement</h1>"));
        assert!(page.contains("<p>Body</p>"));
        assert!(page.contains("contract-pdf"));
    }

    #[test]
    fn render_mode_parses() {
        assert_eq!("PDF".parse::<RenderMode>(), Ok(RenderMode::Pdf));
        assert_eq!("interactive".parse::<RenderMode>(), Ok(RenderMode::Interactive));
        assert!("print".parse::<RenderMode>().is_err());
    }
}
