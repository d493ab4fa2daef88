use std::io::IsTerminal;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{CategoryScore, Rating, ScoreReport};
use crate::taxonomy::{Pillar, Taxonomy};

/// Bar width used when stdout is not a terminal
const DEFAULT_BAR_WIDTH: usize = 36;
const MAX_BAR_WIDTH: usize = 54;
const MIN_BAR_WIDTH: usize = 10;
const MAX_LABEL_WIDTH: usize = 32;

/// Output format for the final report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Headline, rating badge and category chart
    #[default]
    Text,
    /// Pretty JSON for scripting
    Json,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate a label to fit available width, accounting for Unicode
fn truncate_label(label: &str, max_width: usize) -> String {
    let chars: Vec<char> = label.chars().collect();
    if chars.len() <= max_width {
        label.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// "Your product scored: 20 out of 27 (74.07%)"
pub fn format_headline(report: &ScoreReport) -> String {
    format!("Your product scored: {}", report.headline())
}

/// "Sustainability Rating: Silver - Moderately Sustainable", in the rating colour
pub fn format_rating_badge(rating: Rating, use_colors: bool) -> String {
    let text = format!("Sustainability Rating: {}", rating);
    if use_colors {
        let (r, g, b) = rating.rgb();
        text.truecolor(r, g, b).bold().to_string()
    } else {
        text
    }
}

fn pillar_segment(pillar: Pillar, cells: usize, use_colors: bool) -> String {
    if cells == 0 {
        return String::new();
    }
    if use_colors {
        let block = "█".repeat(cells);
        match pillar {
            Pillar::Environmental => block.green().to_string(),
            Pillar::Social => block.blue().to_string(),
            Pillar::Governance => block.magenta().to_string(),
        }
    } else {
        let letter = match pillar {
            Pillar::Environmental => "E",
            Pillar::Social => "S",
            Pillar::Governance => "G",
        };
        letter.repeat(cells)
    }
}

/// Scale `value` onto `width` cells where `max` fills the whole width
fn scale(value: usize, max: usize, width: usize) -> usize {
    if max == 0 {
        0
    } else {
        ((value * width) as f64 / max as f64).round() as usize
    }
}

/// One stacked bar: Environmental, Social and Governance yes counts side by
/// side, then the category's unanswered/No share as empty cells.
fn format_category_bar(category: &CategoryScore, max_total: usize, width: usize, use_colors: bool) -> String {
    let mut bar = String::new();
    let mut cumulative = 0;
    let mut drawn = 0;
    for pillar in Pillar::ALL {
        cumulative += category.yes.get(pillar);
        let upto = scale(cumulative, max_total, width);
        bar.push_str(&pillar_segment(pillar, upto - drawn, use_colors));
        drawn = upto;
    }

    let total_cells = scale(category.category_total, max_total, width);
    let empty = total_cells.saturating_sub(drawn);
    if empty > 0 {
        let rest = "░".repeat(empty);
        if use_colors {
            bar.push_str(&rest.bright_black().to_string());
        } else {
            bar.push_str(&rest);
        }
    }
    bar.push_str(&" ".repeat(width.saturating_sub(drawn + empty)));
    bar
}

/// Stacked bar chart of per-category yes counts, axis capped at the largest
/// category total.
pub fn format_category_chart(report: &ScoreReport, use_colors: bool, bar_width: usize) -> String {
    if report.max_category_total == 0 {
        return "No questions to chart.".to_string();
    }

    let label_width = report
        .categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_WIDTH);

    let mut lines: Vec<String> = report
        .categories
        .iter()
        .map(|category| {
            let label = truncate_label(&category.name, label_width);
            let bar = format_category_bar(category, report.max_category_total, bar_width, use_colors);
            format!(
                "{:<width$}  {}  {}/{}",
                label,
                bar,
                category.category_yes,
                category.category_total,
                width = label_width
            )
        })
        .collect();

    let legend: Vec<String> = Pillar::ALL
        .iter()
        .map(|pillar| format!("{} {}", pillar_segment(*pillar, 1, use_colors), pillar.name()))
        .collect();
    lines.push(format!("{:<width$}  {}", "", legend.join("  "), width = label_width));

    lines.join("\n")
}

/// Bar width that fits the current terminal next to the category labels
pub fn chart_width(report: &ScoreReport) -> usize {
    let label_width = report
        .categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_WIDTH);
    // label + two gaps + "NN/NN"
    let fixed = label_width + 4 + 6;
    match get_terminal_width() {
        Some(width) => width.saturating_sub(fixed).clamp(MIN_BAR_WIDTH, MAX_BAR_WIDTH),
        None => DEFAULT_BAR_WIDTH,
    }
}

/// Full text report: headline, rating badge and category chart
pub fn format_report(report: &ScoreReport, use_colors: bool, bar_width: usize) -> String {
    let heading = |s: &str| {
        if use_colors {
            s.bold().to_string()
        } else {
            s.to_string()
        }
    };

    let mut out = vec![heading("Sustainability Score"), format_headline(report)];
    if report.unanswered > 0 {
        let note = format!(
            "({} of {} questions unanswered, counted as No)",
            report.unanswered, report.total_questions
        );
        out.push(if use_colors { note.dimmed().to_string() } else { note });
    }
    out.push(format_rating_badge(report.rating, use_colors));
    out.push(String::new());
    out.push(heading("Score by Category"));
    out.push(format_category_chart(report, use_colors, bar_width));
    out.join("\n")
}

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    assessed_at: DateTime<Utc>,
    percentage_display: String,
    rating_description: &'static str,
    rating_color: &'static str,
    #[serde(flatten)]
    report: &'a ScoreReport,
}

/// Pretty JSON document for scripting (`--format json`)
pub fn format_json(report: &ScoreReport, title: &str, assessed_at: DateTime<Utc>) -> anyhow::Result<String> {
    let doc = JsonReport {
        title,
        assessed_at,
        percentage_display: report.percentage_display(),
        rating_description: report.rating.description(),
        rating_color: report.rating.color(),
        report,
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Render `report` in the requested format
pub fn render_report(
    report: &ScoreReport,
    title: &str,
    format: ReportFormat,
    use_colors: bool,
    assessed_at: DateTime<Utc>,
) -> anyhow::Result<String> {
    match format {
        ReportFormat::Text => Ok(format_report(report, use_colors, chart_width(report))),
        ReportFormat::Json => format_json(report, title, assessed_at),
    }
}

/// List every question of the taxonomy grouped by category and pillar
pub fn format_taxonomy(taxonomy: &Taxonomy, use_colors: bool) -> String {
    if taxonomy.is_empty() {
        return "The questionnaire has no questions.".to_string();
    }

    let mut lines = Vec::new();
    for category in taxonomy.categories() {
        if !lines.is_empty() {
            lines.push(String::new());
        }
        if use_colors {
            lines.push(category.name().bold().to_string());
        } else {
            lines.push(category.name().to_string());
        }
        for pillar in Pillar::ALL {
            let questions = category.questions(pillar);
            if questions.is_empty() {
                continue;
            }
            lines.push(format!("  {}", pillar_label(pillar, use_colors)));
            for question in questions {
                lines.push(format!("    {:>4}. {}", question.id(), question.text()));
            }
        }
    }
    lines.join("\n")
}

fn pillar_label(pillar: Pillar, use_colors: bool) -> String {
    if !use_colors {
        return pillar.name().to_string();
    }
    match pillar {
        Pillar::Environmental => pillar.name().green().to_string(),
        Pillar::Social => pillar.name().blue().to_string(),
        Pillar::Governance => pillar.name().magenta().to_string(),
    }
}
