//! Line-oriented terminal front end for a question flow.
//!
//! Create mode prompts every visible question with its suggestion; an empty
//! line accepts the suggestion. Edit mode shows the current value; an empty
//! line keeps it. After the last question a review step lists the answers
//! and lets the user jump back to any visible question by number.

use std::io::{self, BufRead, Write};

use quire_core::bindings::stringify;
use quire_eval::{FlowPhase, QuestionSession, SessionMode};

/// Read one line; `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn ask_current<R: BufRead, W: Write>(
    flow: &mut QuestionSession,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    let Some(item) = flow.current_question().cloned() else {
        return Ok(());
    };
    let suggestion = flow.suggested_input().unwrap_or_default();
    loop {
        write!(out, "{}", item.question)?;
        if let Some(options) = &item.enum_options {
            write!(out, " [{}]", options.join("/"))?;
        }
        match flow.mode() {
            SessionMode::Create if !suggestion.is_empty() => write!(out, " ({})", suggestion)?,
            SessionMode::Edit => write!(out, "\n  current: {}\n  new value (enter to keep)", suggestion)?,
            _ => {}
        }
        write!(out, ": ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            // End of input: take the current value and move on.
            flow.keep();
            return Ok(());
        };
        let answer = line.trim();

        if flow.mode() == SessionMode::Edit && answer.is_empty() {
            flow.keep();
            return Ok(());
        }
        let candidate = if answer.is_empty() { suggestion.as_str() } else { answer };
        if !item.accepts(candidate) || (item.required && candidate.trim().is_empty()) {
            match &item.enum_options {
                Some(options) => writeln!(out, "  please answer one of: {}", options.join(", "))?,
                None => writeln!(out, "  an answer is required")?,
            }
            continue;
        }
        flow.answer(candidate);
        return Ok(());
    }
}

fn print_review<W: Write>(flow: &QuestionSession, out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Review:")?;
    for index in flow.visible_questions() {
        let item = &flow.questions()[index];
        writeln!(
            out,
            "  {:>2}. {}: {}",
            index + 1,
            flow.template().label_for(&item.key),
            stringify(flow.value(&item.key))
        )?;
    }
    let changes = flow.change_set();
    if flow.mode() == SessionMode::Edit {
        writeln!(out, "{} change(s)", changes.len())?;
        for change in changes.iter() {
            writeln!(
                out,
                "  {}: {} -> {}",
                change.label,
                stringify(&change.before),
                stringify(&change.after)
            )?;
        }
    }
    Ok(())
}

/// Run `flow` from `Loading` to a confirmed review.
pub(crate) fn run_flow<R: BufRead, W: Write>(
    flow: &mut QuestionSession,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    flow.start();
    loop {
        while matches!(flow.phase(), FlowPhase::Asking(_)) {
            ask_current(flow, input, out)?;
        }
        print_review(flow, out)?;
        write!(out, "Question number to revisit, or enter to finish: ")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(());
        };
        let line = line.trim();
        if line.is_empty() {
            return Ok(());
        }
        let revisited = line
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .is_some_and(|index| flow.revisit(index));
        if !revisited {
            writeln!(out, "  no visible question {}", line)?;
        }
    }
}
