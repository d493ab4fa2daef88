//! Line-by-line questionnaire for terminals without full-screen support
//! and for piping answers in from a script.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::output::{render_report, ReportFormat};
use crate::responses::{Answer, ResponseSet};
use crate::scoring::{score, ScoreReport};
use crate::taxonomy::{Pillar, Taxonomy};

enum Reply {
    Answer(Answer),
    EndOfInput,
}

/// Parse a typed reply: y/yes, n/no, or empty/s/skip to leave unanswered.
pub fn parse_answer(input: &str) -> Option<Answer> {
    match input.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(Answer::Yes),
        "n" | "no" => Some(Answer::No),
        "" | "s" | "skip" => Some(Answer::Unanswered),
        _ => None,
    }
}

/// Prompt until a valid reply is read or the input is exhausted.
fn prompt_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<Reply> {
    loop {
        write!(output, "{}", message).context("Failed to write prompt")?;
        output.flush().context("Failed to flush stdout")?;

        // Raw bytes so a non-UTF-8 line is re-prompted rather than fatal
        let mut line = Vec::new();
        let read = input.read_until(b'\n', &mut line).context("Failed to read input")?;
        if read == 0 {
            writeln!(output)?;
            return Ok(Reply::EndOfInput);
        }

        match parse_answer(&String::from_utf8_lossy(&line)) {
            Some(answer) => return Ok(Reply::Answer(answer)),
            None => writeln!(output, "  Please answer y or n (or press Enter to skip).")?,
        }
    }
}

/// Ask every question of `taxonomy` in order and collect the answers.
///
/// If the input ends early the remaining questions stay unanswered.
pub fn run_survey<R: BufRead, W: Write>(
    taxonomy: &Taxonomy,
    title: &str,
    input: &mut R,
    output: &mut W,
) -> Result<ResponseSet> {
    let mut responses = ResponseSet::new();
    let total = taxonomy.len();

    writeln!(output, "{}", title)?;
    writeln!(output, "{}", "=".repeat(title.chars().count()))?;
    writeln!(output, "Answer y or n. Press Enter to skip a question (skipped counts as No).")?;

    let mut asked = 0;
    for category in taxonomy.categories() {
        writeln!(output)?;
        writeln!(output, "{}", category.name())?;
        for pillar in Pillar::ALL {
            let questions = category.questions(pillar);
            if questions.is_empty() {
                continue;
            }
            writeln!(output, "  [{}]", pillar)?;
            for question in questions {
                asked += 1;
                let message = format!("  {}/{} {} [y/n]: ", asked, total, question.text());
                match prompt_answer(input, output, &message)? {
                    Reply::Answer(answer) => responses.set(question.id(), answer),
                    Reply::EndOfInput => {
                        tracing::debug!("Input closed after {} of {} questions", asked - 1, total);
                        writeln!(output, "Input ended; remaining questions left unanswered.")?;
                        return Ok(responses);
                    }
                }
            }
        }
    }

    Ok(responses)
}

/// Run the survey, then write the scored report to `out`.
///
/// Title, prompts and notices all go to `prompts`, so `out` holds only the
/// report and stays parseable in JSON mode.
pub fn run_ask<R: BufRead, P: Write, O: Write>(
    taxonomy: &Taxonomy,
    title: &str,
    format: ReportFormat,
    use_colors: bool,
    input: &mut R,
    prompts: &mut P,
    out: &mut O,
) -> Result<ScoreReport> {
    let responses = run_survey(taxonomy, title, input, prompts)?;
    writeln!(prompts)?;

    let report = score(taxonomy, &responses);
    let rendered = render_report(&report, title, format, use_colors, chrono::Utc::now())?;
    writeln!(out, "{}", rendered).context("Failed to write report")?;
    out.flush().context("Failed to flush report")?;

    Ok(report)
}
