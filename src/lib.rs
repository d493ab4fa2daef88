//! Questionnaire-driven ESG sustainability scoring.
//!
//! A [`taxonomy::Taxonomy`] of yes/no questions is answered into a
//! [`responses::ResponseSet`], which [`scoring::score`] turns into a
//! [`scoring::ScoreReport`] with a Bronze/Silver/Green rating.

pub mod config;
pub mod output;
pub mod responses;
pub mod scoring;
pub mod stderr_buffer;
pub mod survey;
pub mod taxonomy;
pub mod tui;
