use serde::{Deserialize, Serialize};

/// Top-level config file.
///
/// Example YAML:
/// ```yaml
/// title: "Motor Insurance ESG Check"
/// questionnaire:
///   - category: "Claims Management"
///     environmental:
///       - "Does the claims process encourage repair over replacement?"
///     social:
///       - "Is there a structured appeal process for denied claims?"
///     governance: []
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Heading shown above the questionnaire
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Custom questionnaire. The built-in one is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questionnaire: Option<Vec<CategoryConfig>>,
}

/// One category of a custom questionnaire, questions listed per pillar.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    pub category: String,

    #[serde(default)]
    pub environmental: Vec<String>,

    #[serde(default)]
    pub social: Vec<String>,

    #[serde(default)]
    pub governance: Vec<String>,
}
