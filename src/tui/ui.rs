use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, List, ListItem, Paragraph};

use crate::scoring::{CategoryScore, ScoreReport};
use crate::taxonomy::Pillar;
use crate::tui::app::{App, InputMode};
use crate::tui::theme::ThemeColors;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 10 || area.width < 50 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    let body = Layout::horizontal([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(chunks[1]);

    let report = app.report();

    render_title(frame, chunks[0], app);
    render_questions(frame, body[0], app);
    render_score(frame, body[1], app, &report);
    render_status_bar(frame, chunks[2], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, &app.theme);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(Span::styled(
        app.title.clone(),
        Style::default().fg(app.theme.title_color).bold(),
    ));
    frame.render_widget(Paragraph::new(title), area);
}

fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn render_questions(frame: &mut Frame, area: Rect, app: &mut App) {
    let theme = &app.theme;
    let block = Block::bordered().title(" Questions ");
    let inner_width = block.inner(area).width as usize;

    if app.taxonomy.is_empty() {
        let empty_msg = Paragraph::new("The questionnaire has no questions")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty_msg, area);
        return;
    }

    let mut items = Vec::new();
    let mut selected_item = None;
    let mut position = 0;

    for category in app.taxonomy.categories() {
        items.push(ListItem::new(Line::from(Span::styled(
            truncate_text(category.name(), inner_width),
            theme.category_style,
        ))));
        for pillar in Pillar::ALL {
            let questions = category.questions(pillar);
            if questions.is_empty() {
                continue;
            }
            items.push(ListItem::new(Line::from(Span::styled(
                format!("  {}", pillar),
                Style::default().fg(theme.pillar_color(pillar)).italic(),
            ))));
            for question in questions {
                if position == app.selected {
                    selected_item = Some(items.len());
                }
                position += 1;

                let answer = app.responses.get(question.id());
                let marker = Span::styled(
                    format!("    [{}] ", answer.marker()),
                    Style::default().fg(theme.answer_color(answer)).bold(),
                );
                let text = truncate_text(question.text(), inner_width.saturating_sub(8));
                items.push(ListItem::new(Line::from(vec![marker, Span::raw(text)])));
            }
        }
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(theme.row_selected);

    app.list_state.select(selected_item);
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

/// Scale `value` onto `width` cells where `max` fills the whole width
fn scale(value: usize, max: usize, width: usize) -> usize {
    if max == 0 {
        0
    } else {
        ((value * width) as f64 / max as f64).round() as usize
    }
}

/// Stacked bar of one category's yes counts per pillar, followed by the
/// remaining questions as empty cells.
fn stacked_bar(category: &CategoryScore, max_total: usize, width: usize, theme: &ThemeColors) -> Line<'static> {
    let mut spans = Vec::new();
    let mut cumulative = 0;
    let mut drawn = 0;

    for pillar in Pillar::ALL {
        cumulative += category.yes.get(pillar);
        let upto = scale(cumulative, max_total, width);
        if upto > drawn {
            spans.push(Span::styled(
                "█".repeat(upto - drawn),
                Style::default().fg(theme.pillar_color(pillar)),
            ));
        }
        drawn = upto;
    }

    let empty = scale(category.category_total, max_total, width).saturating_sub(drawn);
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(theme.bar_empty)));
    }

    Line::from(spans)
}

fn render_score(frame: &mut Frame, area: Rect, app: &App, report: &ScoreReport) {
    let theme = &app.theme;
    let block = Block::bordered().title(" Sustainability Score ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let width = inner.width as usize;
    let rating_color = theme.rating_color(report.rating);

    let mut lines = vec![
        Line::from(vec![
            Span::raw("Your product scored: "),
            Span::styled(report.headline(), Style::default().bold()),
        ]),
        if report.unanswered > 0 {
            Line::from(Span::styled(
                format!("{} unanswered (counted as No)", report.unanswered),
                Style::default().fg(theme.muted),
            ))
        } else {
            Line::from(Span::styled("All questions answered", Style::default().fg(theme.muted)))
        },
        Line::from(""),
        Line::from(vec![
            Span::raw("Rating: "),
            Span::styled(
                format!(" {} ", report.rating),
                Style::default().fg(Color::Black).bg(rating_color).bold(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("Score by Category", Style::default().bold())),
    ];

    if report.max_category_total == 0 {
        lines.push(Line::from(Span::styled(
            "No questions to chart",
            Style::default().fg(theme.muted),
        )));
    } else {
        // "  NN/NN" after each bar
        let bar_width = width.saturating_sub(7).max(1);
        for category in &report.categories {
            lines.push(Line::from(truncate_text(&category.name, width)));
            let mut bar = stacked_bar(category, report.max_category_total, bar_width, theme);
            let drawn: usize = bar.spans.iter().map(|s| s.content.chars().count()).sum();
            bar.spans.push(Span::raw(" ".repeat(bar_width.saturating_sub(drawn))));
            bar.spans.push(Span::styled(
                format!("  {}/{}", category.category_yes, category.category_total),
                Style::default().fg(theme.muted),
            ));
            lines.push(bar);
        }

        // axis: 0 .. max category total
        let max_label = report.max_category_total.to_string();
        lines.push(Line::from(Span::styled(
            format!(
                "0{}{}",
                " ".repeat(bar_width.saturating_sub(1 + max_label.len())),
                max_label
            ),
            Style::default().fg(theme.muted),
        )));

        let mut legend = Vec::new();
        for pillar in Pillar::ALL {
            if !legend.is_empty() {
                legend.push(Span::raw("  "));
            }
            legend.push(Span::styled("█ ", Style::default().fg(theme.pillar_color(pillar))));
            legend.push(Span::raw(pillar.name()));
        }
        lines.push(Line::from(legend));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let text = if let Some((ref msg, _)) = app.flash_message {
        Line::from(Span::styled(msg.clone(), Style::default().fg(theme.flash)))
    } else {
        let progress = format!(
            "{}/{} answered",
            app.responses.answered_count(&app.taxonomy),
            app.taxonomy.len()
        );

        let hints = [
            ("j/k", ":nav "),
            ("y/n", ":answer "),
            ("Space", ":clear "),
            ("Tab", ":next unanswered "),
            ("?", ":help "),
            ("q", ":quit"),
        ];

        let mut spans = vec![
            Span::styled(progress, Style::default().fg(theme.muted)),
            Span::raw("  "),
        ];
        for (key, label) in hints {
            spans.push(Span::styled(key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Render the help overlay popup
fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(50, 14, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(Span::styled(" Keyboard Shortcuts ", theme.popup_title))
        .border_style(Style::default().fg(theme.popup_border));
    frame.render_widget(block.clone(), popup_area);

    let inner = block.inner(popup_area);

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let shortcuts = [
        ("j / Down      ", "Next question"),
        ("k / Up        ", "Previous question"),
        ("y             ", "Answer Yes and advance"),
        ("n             ", "Answer No and advance"),
        ("Space / u     ", "Clear answer"),
        ("Tab           ", "Jump to next unanswered"),
        ("R             ", "Clear all answers"),
        ("?             ", "Show/hide this help"),
        ("q / Ctrl-c    ", "Quit and print the report"),
    ];

    let mut help_lines: Vec<Line> = shortcuts
        .iter()
        .map(|(key, action)| Line::from(vec![Span::styled(*key, key_style), Span::raw(*action)]))
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responses::{Answer, ResponseSet};
    use crate::scoring::score;
    use crate::taxonomy::builtin_taxonomy;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_stacked_bar_segments() {
        let taxonomy = builtin_taxonomy();
        let mut responses = ResponseSet::new();
        for q in taxonomy.questions().take(4) {
            responses.set(q.id(), Answer::Yes);
        }
        let report = score(&taxonomy, &responses);
        let bar = stacked_bar(&report.categories[0], 9, 9, &ThemeColors::dark());

        // 3 environmental, 1 social, 5 empty
        let widths: Vec<usize> = bar.spans.iter().map(|s| s.content.chars().count()).collect();
        assert_eq!(widths, vec![3, 1, 5]);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("abcdef", 10), "abcdef");
        assert_eq!(truncate_text("abcdefghijkl", 8), "abcde...");
    }

    #[test]
    fn test_draw_renders_score() {
        let mut app = App::new(builtin_taxonomy(), "ESG Check".to_string(), ThemeColors::dark());
        for _ in 0..20 {
            app.answer_selected(Answer::Yes);
        }

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let buffer = terminal.backend().buffer();
        let content: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(content.contains("ESG Check"));
        assert!(content.contains("20 out of 27 (74.07%)"));
        assert!(content.contains("Silver - Moderately Sustainable"));
        assert!(content.contains("Underwriting & Product Design"));
    }

    #[test]
    fn test_status_bar_shows_flash() {
        let mut app = App::new(builtin_taxonomy(), "ESG".to_string(), ThemeColors::dark());
        app.show_flash("Cleared Q1".to_string());

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let buffer = terminal.backend().buffer();
        let status: String = (0..80u16).map(|x| buffer[(x, 19u16)].symbol().to_string()).collect();
        assert!(status.starts_with("Cleared Q1"));
        assert_eq!(buffer[(0u16, 19u16)].fg, app.theme.flash);
        assert!(!status.contains("answered"));
    }

    #[test]
    fn test_draw_small_terminal() {
        let mut app = App::new(builtin_taxonomy(), "ESG".to_string(), ThemeColors::dark());
        let mut terminal = Terminal::new(TestBackend::new(30, 5)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(content.contains("Terminal too small"));
    }
}
