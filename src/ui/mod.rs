pub mod metric_formatters;
pub mod template;
pub mod term_bar;

pub use metric_formatters::format_metric;
pub use template::format_by_dict;
pub use term_bar::TermBar;
