//! Template and question-flow validation.
//!
//! Rendering soft-fails on every problem reported here, so validation only
//! reports issues for template authors; it never rejects a template.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::contract::Party;
use crate::lexer::{lex, Token};
use crate::model::{Template, COMPUTED_FLAGS, ENGAGEMENT_TYPE_KEY};
use crate::question::QuestionFlowItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    DuplicateVariable,
    UndeclaredReference,
    UnusedVariable,
    StrayElse,
    StrayEndIf,
    UnclosedConditional,
    UnknownAnchorParty,
    UndeclaredQuestionKey,
    DefaultNotInOptions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateIssue {
    pub severity: Severity,
    pub kind: IssueKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    pub message: String,
}

impl TemplateIssue {
    fn error(kind: IssueKind, line: Option<u32>, message: String) -> Self {
        TemplateIssue {
            severity: Severity::Error,
            kind,
            line,
            message,
        }
    }

    fn warning(kind: IssueKind, line: Option<u32>, message: String) -> Self {
        TemplateIssue {
            severity: Severity::Warning,
            kind,
            line,
            message,
        }
    }
}

/// Check a template body against its declared variables.
pub fn validate_template(template: &Template) -> Vec<TemplateIssue> {
    let mut issues = Vec::new();

    let mut declared = BTreeSet::new();
    for var in &template.variables {
        if !declared.insert(var.name.as_str()) {
            issues.push(TemplateIssue::error(
                IssueKind::DuplicateVariable,
                None,
                format!("variable '{}' is declared more than once", var.name),
            ));
        }
    }

    let mut referenced = BTreeSet::new();
    let mut open_blocks: Vec<(u32, bool)> = Vec::new();
    for spanned in lex(&template.body_markup) {
        let line = Some(spanned.line);
        match &spanned.token {
            Token::Var(name) | Token::If(name) => {
                referenced.insert(name.clone());
                let known = declared.contains(name.as_str())
                    || COMPUTED_FLAGS.contains(&name.as_str())
                    || template.default_values.contains_key(name);
                if !known {
                    issues.push(TemplateIssue::warning(
                        IssueKind::UndeclaredReference,
                        line,
                        format!("'{}' is not a declared variable", name),
                    ));
                }
                if matches!(spanned.token, Token::If(_)) {
                    open_blocks.push((spanned.line, false));
                }
            }
            Token::Else => match open_blocks.last_mut() {
                Some((_, seen_else)) if !*seen_else => *seen_else = true,
                _ => issues.push(TemplateIssue::error(
                    IssueKind::StrayElse,
                    line,
                    "{{else}} outside a conditional block".to_string(),
                )),
            },
            Token::EndIf => {
                if open_blocks.pop().is_none() {
                    issues.push(TemplateIssue::error(
                        IssueKind::StrayEndIf,
                        line,
                        "{{/if}} without a matching {{#if}}".to_string(),
                    ));
                }
            }
            Token::Anchor { party, .. } => {
                if Party::parse(party).is_none() {
                    issues.push(TemplateIssue::warning(
                        IssueKind::UnknownAnchorParty,
                        line,
                        format!("anchor for unknown party '{}'", party),
                    ));
                }
            }
            Token::Text(_) => {}
        }
    }

    // Computed flags are derived from the engagement type
    if COMPUTED_FLAGS.iter().any(|f| referenced.contains(*f)) {
        referenced.insert(ENGAGEMENT_TYPE_KEY.to_string());
    }

    for (line, _) in open_blocks {
        issues.push(TemplateIssue::error(
            IssueKind::UnclosedConditional,
            Some(line),
            "{{#if}} is never closed".to_string(),
        ));
    }

    for name in &declared {
        if !referenced.contains(*name) {
            issues.push(TemplateIssue::warning(
                IssueKind::UnusedVariable,
                None,
                format!("variable '{}' is never referenced", name),
            ));
        }
    }

    issues
}

/// Check a question flow against the template it fills.
pub fn validate_questions(
    template: &Template,
    questions: &[QuestionFlowItem],
) -> Vec<TemplateIssue> {
    let mut issues = Vec::new();
    for item in questions {
        if template.variable(&item.key).is_none() {
            issues.push(TemplateIssue::warning(
                IssueKind::UndeclaredQuestionKey,
                None,
                format!("question '{}' binds an undeclared variable", item.key),
            ));
        }
        if let (Some(options), Some(default)) = (&item.enum_options, &item.default) {
            let default = crate::bindings::stringify(default);
            if !options.iter().any(|o| *o == default) {
                issues.push(TemplateIssue::error(
                    IssueKind::DefaultNotInOptions,
                    None,
                    format!(
                        "default '{}' for '{}' is not one of its options",
                        default, item.key
                    ),
                ));
            }
        }
    }
    issues
}

/// Whether any issue is an error.
pub fn has_errors(issues: &[TemplateIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}
