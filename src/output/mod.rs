pub mod formatter;

pub use formatter::{
    chart_width, format_category_chart, format_headline, format_json, format_rating_badge,
    format_report, format_taxonomy, render_report, should_use_colors, ReportFormat,
};
