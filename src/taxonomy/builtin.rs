use super::builder::TaxonomyBuilder;
use super::types::{Pillar, Taxonomy};

/// Title shown above the built-in questionnaire
pub const BUILTIN_TITLE: &str = "ESG Sustainability Assessment for Non-Life Insurance Products";

type PillarQuestions = [&'static [&'static str]; 3];

// Environmental, Social, Governance
const BUILTIN: &[(&str, PillarQuestions)] = &[
    (
        "Underwriting & Product Design",
        [
            &[
                "Does the policy exclude fossil-fuel-intensive assets?",
                "Does the policy incentivize low-carbon infrastructure (e.g., green buildings, EVs)?",
                "Does the policy integrate climate adaptation measures?",
            ],
            &[
                "Is the product accessible and affordable for underserved or low-income customers?",
                "Are policy terms written in plain, understandable language?",
                "Does underwriting avoid discriminatory pricing factors?",
            ],
            &[
                "Are ESG criteria formally embedded in underwriting guidelines?",
                "Is there board-level oversight of product sustainability?",
                "Are underwriting decisions on high-ESG-risk clients documented and reviewed?",
            ],
        ],
    ),
    (
        "Claims Management",
        [
            &[
                "Does the claims process encourage repair over replacement?",
                "Are recycled or sustainable materials prioritized in claims?",
                "Are claims handled digitally to reduce paper and travel?",
            ],
            &[
                "Is there a structured appeal process for denied claims?",
                "Are vulnerable customers given priority support during claims?",
                "Are claims settled within published service-level timelines?",
            ],
            &[
                "Are claims-handling procedures subject to independent audit?",
                "Are fraud prevention controls documented and enforced?",
                "Are claims outcomes and complaint statistics publicly reported?",
            ],
        ],
    ),
    (
        "Asset & Premium Management",
        [
            &[
                "Does the company divest from high-carbon investments?",
                "Is a share of premiums invested in green bonds or climate solutions?",
                "Does the company measure the carbon footprint of its investment portfolio?",
            ],
            &[
                "Are investments screened for human rights and labour standards?",
                "Does the company invest in social infrastructure (e.g., affordable housing, healthcare)?",
                "Does the company engage with investees on social issues?",
            ],
            &[
                "Are ESG principles integrated into investment decisions?",
                "Does the company publicly disclose ESG performance?",
                "Is executive remuneration linked to ESG targets?",
            ],
        ],
    ),
];

/// The ESG questionnaire for non-life insurance products:
/// 3 categories x 3 pillars x 3 questions.
pub fn builtin_taxonomy() -> Taxonomy {
    let mut builder = TaxonomyBuilder::new();
    for (category, pillars) in BUILTIN {
        builder = builder.category(*category);
        for (pillar, questions) in Pillar::ALL.into_iter().zip(pillars.iter()) {
            for question in questions.iter() {
                builder = builder.question(pillar, *question);
            }
        }
    }
    builder.assemble()
}
