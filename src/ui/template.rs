use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Placeholder substitution dictionary, rebuilt per metric per tick.
pub type TemplateDict = HashMap<&'static str, String>;

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9-]+)\}").expect("valid placeholder pattern"));

/// Replace `{name}` placeholders in `template` with values from `dict`.
///
/// Placeholders with no dictionary entry are left verbatim, so the call is
/// idempotent on templates without recognized placeholders.
pub fn format_by_dict(template: &str, dict: &TemplateDict) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            match dict.get(&caps[1]) {
                Some(value) => value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
