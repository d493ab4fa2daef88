use std::time::Instant;

use crate::responses::{Answer, ResponseSet};
use crate::scoring::{score, ScoreReport};
use crate::taxonomy::{Question, QuestionId, Taxonomy};
use crate::tui::theme::ThemeColors;

/// Seconds a flash message stays in the status bar
const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

/// State of one assessment session in the full-screen UI.
///
/// Owns the session's responses; the taxonomy is read-only. The score is
/// recomputed from scratch on every call to [`App::report`].
pub struct App {
    pub taxonomy: Taxonomy,
    pub title: String,
    pub responses: ResponseSet,
    /// Position of the highlighted question in taxonomy order
    pub selected: usize,
    pub list_state: ratatui::widgets::ListState,
    pub input_mode: InputMode,
    pub flash_message: Option<(String, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(taxonomy: Taxonomy, title: String, theme: ThemeColors) -> Self {
        Self {
            taxonomy,
            title,
            responses: ResponseSet::new(),
            selected: 0,
            list_state: ratatui::widgets::ListState::default(),
            input_mode: InputMode::Normal,
            flash_message: None,
            should_quit: false,
            theme,
        }
    }

    pub fn report(&self) -> ScoreReport {
        score(&self.taxonomy, &self.responses)
    }

    pub fn selected_question(&self) -> Option<&Question> {
        self.taxonomy.questions().nth(self.selected)
    }

    fn selected_id(&self) -> Option<QuestionId> {
        self.selected_question().map(Question::id)
    }

    pub fn next_question(&mut self) {
        let total = self.taxonomy.len();
        if total == 0 {
            return;
        }
        self.selected = if self.selected + 1 >= total { 0 } else { self.selected + 1 };
    }

    pub fn previous_question(&mut self) {
        let total = self.taxonomy.len();
        if total == 0 {
            return;
        }
        self.selected = if self.selected == 0 { total - 1 } else { self.selected - 1 };
    }

    /// Answer the highlighted question and move to the next one
    pub fn answer_selected(&mut self, answer: Answer) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.responses.set(id, answer);
        if self.selected + 1 < self.taxonomy.len() {
            self.selected += 1;
        } else if self.responses.is_complete(&self.taxonomy) {
            self.show_flash("All questions answered".to_string());
        }
    }

    /// Reset the highlighted question to unanswered
    pub fn clear_selected(&mut self) {
        if let Some(id) = self.selected_id() {
            if self.responses.clear(id) {
                self.show_flash(format!("Cleared {}", id));
            }
        }
    }

    /// Move to the next unanswered question after the current one
    pub fn jump_to_unanswered(&mut self) {
        match self.responses.next_unanswered(&self.taxonomy, self.selected_id()) {
            Some(id) => self.selected = id.index(),
            None => self.show_flash("All questions answered".to_string()),
        }
    }

    /// Forget every answer and start over
    pub fn reset(&mut self) {
        self.responses = ResponseSet::new();
        self.selected = 0;
        self.show_flash("Answers cleared".to_string());
    }

    pub fn update_flash(&mut self) {
        if let Some((_, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }

    pub fn show_flash(&mut self, msg: String) {
        self.flash_message = Some((msg, Instant::now()));
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Rating;
    use crate::taxonomy::builtin_taxonomy;

    fn app() -> App {
        App::new(builtin_taxonomy(), "ESG".to_string(), ThemeColors::dark())
    }

    #[test]
    fn test_navigation_wraps() {
        let mut app = app();
        app.previous_question();
        assert_eq!(app.selected, 26);
        app.next_question();
        assert_eq!(app.selected, 0);
        app.next_question();
        assert_eq!(app.selected, 1);
    }

    #[test]
    fn test_answer_advances_and_scores() {
        let mut app = app();
        app.answer_selected(Answer::Yes);
        app.answer_selected(Answer::No);
        assert_eq!(app.selected, 2);

        let report = app.report();
        assert_eq!(report.total_yes, 1);
        assert_eq!(report.unanswered, 25);
    }

    #[test]
    fn test_answer_last_question_stays() {
        let mut app = app();
        app.selected = 26;
        app.answer_selected(Answer::Yes);
        assert_eq!(app.selected, 26);
        assert!(app.flash_message.is_none());
    }

    #[test]
    fn test_answer_everything_yes_is_green() {
        let mut app = app();
        for _ in 0..27 {
            app.answer_selected(Answer::Yes);
        }
        let report = app.report();
        assert_eq!(report.percentage, 100.0);
        assert_eq!(report.rating, Rating::Green);
        assert_eq!(
            app.flash_message.as_ref().map(|(m, _)| m.as_str()),
            Some("All questions answered")
        );
    }

    #[test]
    fn test_clear_selected() {
        let mut app = app();
        app.answer_selected(Answer::Yes);
        app.previous_question();
        app.clear_selected();
        assert_eq!(app.report().total_yes, 0);
        assert!(app.flash_message.as_ref().unwrap().0.contains("Cleared Q1"));
    }

    #[test]
    fn test_jump_to_unanswered() {
        let mut app = app();
        app.answer_selected(Answer::Yes);
        app.answer_selected(Answer::Yes);
        app.selected = 0;
        app.jump_to_unanswered();
        assert_eq!(app.selected, 2);
    }

    #[test]
    fn test_reset() {
        let mut app = app();
        app.answer_selected(Answer::Yes);
        app.reset();
        assert_eq!(app.selected, 0);
        assert_eq!(app.report().total_yes, 0);
    }

    #[test]
    fn test_empty_taxonomy_is_inert() {
        let mut app = App::new(Taxonomy::empty(), "Empty".to_string(), ThemeColors::dark());
        app.next_question();
        app.previous_question();
        app.answer_selected(Answer::Yes);
        app.jump_to_unanswered();
        assert_eq!(app.selected, 0);
        assert_eq!(app.report().percentage, 0.0);
    }

    #[test]
    fn test_help_mode() {
        let mut app = app();
        app.show_help();
        assert_eq!(app.input_mode, InputMode::Help);
        app.dismiss_help();
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
