//! Question flow engine.
//!
//! A [`QuestionSession`] walks a contract type's question flow as a state
//! machine:
//!
//! ```text
//! Loading --start()--> Asking(i) --advance()--> Asking(j) ... --> Review
//!                          ^                                        |
//!                          +-------------- revisit(i) --------------+
//! ```
//!
//! Skip logic is re-evaluated against the live bindings on every step, so a
//! question that became hidden by an earlier answer is passed over and one
//! that became visible is asked. The engine never enforces `required`; it
//! reports [`QuestionSession::missing_required`] and leaves the decision to
//! the UI wrapping it.

use quire_core::bindings::{coerce_answer, lookup, same_string_form, stringify};
use quire_core::{Bindings, ChangeRecord, Contract, QuestionFlowItem, Template, VariableType};
use serde::Serialize;
use serde_json::Value;

use crate::revision::ChangeSet;

/// Whether the session authors a new contract or revises an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionMode {
    /// Bindings start from template defaults; every visible question is asked.
    Create,
    /// Bindings start from the contract; each question offers "keep".
    Edit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "index")]
pub enum FlowPhase {
    Loading,
    Asking(usize),
    Review,
}

/// Input state of the question currently shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum AnswerState {
    /// Showing the current value with a "keep" option.
    Viewing,
    /// Accepting a new answer.
    Editing { input: String },
}

/// First index `>= start` whose question is visible for `bindings`.
pub fn find_next_question_index(
    items: &[QuestionFlowItem],
    start: usize,
    bindings: &Bindings,
) -> Option<usize> {
    items
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, item)| item.is_visible(bindings))
        .map(|(index, _)| index)
}

/// One authoring or revision pass over a question flow.
#[derive(Debug, Clone)]
pub struct QuestionSession {
    template: Template,
    questions: Vec<QuestionFlowItem>,
    mode: SessionMode,
    phase: FlowPhase,
    answer: AnswerState,
    baseline: Bindings,
    bindings: Bindings,
    changes: ChangeSet,
}

impl QuestionSession {
    fn with_bindings(
        template: &Template,
        questions: &[QuestionFlowItem],
        mode: SessionMode,
        bindings: Bindings,
    ) -> Self {
        QuestionSession {
            template: template.clone(),
            questions: questions.to_vec(),
            mode,
            phase: FlowPhase::Loading,
            answer: AnswerState::Viewing,
            baseline: bindings.clone(),
            bindings,
            changes: ChangeSet::new(),
        }
    }

    /// A create-mode session seeded with the template's default values.
    ///
    /// Question defaults are offered as suggested input, not pre-bound.
    pub fn create(template: &Template, questions: &[QuestionFlowItem]) -> Self {
        Self::with_bindings(
            template,
            questions,
            SessionMode::Create,
            template.default_values.clone(),
        )
    }

    /// An edit-mode session seeded with an existing contract's variables.
    pub fn edit(template: &Template, questions: &[QuestionFlowItem], existing: &Contract) -> Self {
        Self::with_bindings(
            template,
            questions,
            SessionMode::Edit,
            existing.variables.clone(),
        )
    }

    /// Leave `Loading` for the first visible question, or `Review` when none is.
    pub fn start(&mut self) {
        if self.phase != FlowPhase::Loading {
            return;
        }
        self.move_to(find_next_question_index(&self.questions, 0, &self.bindings));
    }

    /// Move past the current question. A no-op outside `Asking`.
    pub fn advance(&mut self) {
        if let FlowPhase::Asking(current) = self.phase {
            let next = find_next_question_index(&self.questions, current + 1, &self.bindings);
            self.move_to(next);
        }
    }

    fn move_to(&mut self, index: Option<usize>) {
        match index {
            Some(index) => {
                self.phase = FlowPhase::Asking(index);
                self.answer = match self.mode {
                    SessionMode::Create => AnswerState::Editing {
                        input: self.suggested_input_at(index),
                    },
                    SessionMode::Edit => AnswerState::Viewing,
                };
            }
            None => {
                self.phase = FlowPhase::Review;
                self.answer = AnswerState::Viewing;
            }
        }
        tracing::debug!(phase = ?self.phase, "question flow moved");
    }

    /// Return to question `index` from review or mid-flow.
    ///
    /// Returns `false` (and stays put) when the index is out of range, the
    /// question is currently hidden, or the session has not started.
    pub fn revisit(&mut self, index: usize) -> bool {
        if self.phase == FlowPhase::Loading {
            return false;
        }
        match self.questions.get(index) {
            Some(item) if item.is_visible(&self.bindings) => {
                self.move_to(Some(index));
                true
            }
            _ => false,
        }
    }

    /// Bind `raw` (coerced per `var_type`) to `key`.
    ///
    /// Returns `true` when the bound value's string form changed. The change
    /// record for `key` always compares against the session's starting value.
    pub fn commit_answer(&mut self, key: &str, raw: &str, var_type: Option<VariableType>) -> bool {
        let value = coerce_answer(raw, var_type);
        if same_string_form(lookup(&self.bindings, key), &value) {
            return false;
        }
        let before = lookup(&self.baseline, key).clone();
        self.changes
            .record(key, self.template.label_for(key), before, value.clone());
        self.bindings.insert(key.to_string(), value);
        true
    }

    /// Switch the current question to editing, prefilled with its suggestion.
    pub fn begin_edit(&mut self) {
        if let FlowPhase::Asking(index) = self.phase {
            if self.answer == AnswerState::Viewing {
                self.answer = AnswerState::Editing {
                    input: self.suggested_input_at(index),
                };
            }
        }
    }

    pub fn set_input(&mut self, input: &str) {
        if let AnswerState::Editing { input: current } = &mut self.answer {
            *current = input.to_string();
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.answer, AnswerState::Editing { .. }) {
            self.answer = AnswerState::Viewing;
        }
    }

    /// Keep the current value and move on.
    pub fn keep(&mut self) {
        if matches!(self.phase, FlowPhase::Asking(_)) {
            self.answer = AnswerState::Viewing;
            self.advance();
        }
    }

    /// Commit the edited input for the current question and move on.
    ///
    /// In create mode an empty input falls back to the question's default.
    /// Returns whether the binding changed.
    pub fn submit(&mut self) -> bool {
        let FlowPhase::Asking(index) = self.phase else {
            return false;
        };
        let AnswerState::Editing { input } = &self.answer else {
            self.advance();
            return false;
        };
        let Some(item) = self.questions.get(index) else {
            return false;
        };
        let raw = match (&item.default, self.mode) {
            (Some(default), SessionMode::Create) if input.trim().is_empty() => stringify(default),
            _ => input.clone(),
        };
        let key = item.key.clone();
        let var_type = self.template.variable(&key).map(|v| v.var_type);
        let changed = self.commit_answer(&key, &raw, var_type);
        self.advance();
        changed
    }

    /// Answer the current question with `raw` in one step.
    pub fn answer(&mut self, raw: &str) -> bool {
        self.begin_edit();
        self.set_input(raw);
        self.submit()
    }

    fn suggested_input_at(&self, index: usize) -> String {
        let Some(item) = self.questions.get(index) else {
            return String::new();
        };
        match self.bindings.get(&item.key) {
            Some(value) if !value.is_null() => stringify(value),
            _ => item.default.as_ref().map(stringify).unwrap_or_default(),
        }
    }

    /// Prefill for the current question: its bound value, else its default.
    pub fn suggested_input(&self) -> Option<String> {
        match self.phase {
            FlowPhase::Asking(index) => Some(self.suggested_input_at(index)),
            _ => None,
        }
    }

    /// Keys of visible required questions that are unanswered.
    pub fn missing_required(&self) -> Vec<String> {
        self.questions
            .iter()
            .filter(|item| item.required && item.is_visible(&self.bindings))
            .filter(|item| stringify(lookup(&self.bindings, &item.key)).trim().is_empty())
            .map(|item| item.key.clone())
            .collect()
    }

    /// Indices of the questions visible for the current bindings.
    pub fn visible_questions(&self) -> Vec<usize> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(_, item)| item.is_visible(&self.bindings))
            .map(|(index, _)| index)
            .collect()
    }

    pub fn current_question(&self) -> Option<&QuestionFlowItem> {
        match self.phase {
            FlowPhase::Asking(index) => self.questions.get(index),
            _ => None,
        }
    }

    /// The current value bound for `key`, `null` when unbound.
    pub fn value(&self, key: &str) -> &Value {
        lookup(&self.bindings, key)
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn answer_state(&self) -> &AnswerState {
        &self.answer
    }

    pub fn is_complete(&self) -> bool {
        self.phase == FlowPhase::Review
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn questions(&self) -> &[QuestionFlowItem] {
        &self.questions
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn baseline(&self) -> &Bindings {
        &self.baseline
    }

    pub fn change_set(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn changes(&self) -> Vec<ChangeRecord> {
        self.changes.to_vec()
    }

    /// Make the current bindings the new baseline after a successful save.
    pub(crate) fn rebase(&mut self) {
        self.baseline = self.bindings.clone();
        self.changes.clear();
    }

    pub fn into_bindings(self) -> Bindings {
        self.bindings
    }
}
