use std::collections::HashMap;

use sysbar::ui::format_by_dict;

fn dict(entries: &[(&'static str, &str)]) -> HashMap<&'static str, String> {
    entries
        .iter()
        .map(|(key, value)| (*key, value.to_string()))
        .collect()
}

#[test]
fn full_substitution_when_all_placeholders_present() {
    let dict = dict(&[("up", "1.2"), ("up-unit", "MB/s"), ("down", "0.3"), ("down-unit", "KB/s")]);
    assert_eq!(
        format_by_dict("↑{up}{up-unit} ↓{down}{down-unit}", &dict),
        "↑1.2MB/s ↓0.3KB/s"
    );
}

#[test]
fn idempotent_on_template_without_recognized_placeholders() {
    let dict = dict(&[("percent", "42")]);
    let template = "no placeholders here, {unknown} stays";

    let once = format_by_dict(template, &dict);
    assert_eq!(once, template);

    let twice = format_by_dict(&once, &dict);
    assert_eq!(twice, once);
}

#[test]
fn substitution_result_is_stable_under_reapplication() {
    let dict = dict(&[("days", "2"), ("hours", "3"), ("minutes", "4")]);
    let once = format_by_dict("{days}d {hours}h {minutes}m", &dict);
    assert_eq!(once, "2d 3h 4m");
    assert_eq!(format_by_dict(&once, &dict), once);
}

#[test]
fn empty_template_stays_empty() {
    assert_eq!(format_by_dict("", &dict(&[])), "");
}
