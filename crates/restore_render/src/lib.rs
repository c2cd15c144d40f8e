use std::fmt::Write as _;

use restore_core::core_api::{
    RestoreOutcome, RestoreReport, SectionFailure, Unavailable, UnavailableReason,
};
use restore_core::profile::Profile;
use restore_core::registry::SectionRegistry;
use serde_json::{Map as JsonMap, Value as JsonValue};

const LABEL_WIDTH: usize = 14;
const SECTION_COL_WIDTH: usize = 18;
const REQUIRED_COL_WIDTH: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    #[default]
    CanonicalV1,
}

/// Summary status of a restore, as printed by both renderers.
pub fn outcome_status(outcome: &RestoreOutcome) -> &'static str {
    match outcome {
        RestoreOutcome::Restored(report) if report.is_complete() => "complete",
        RestoreOutcome::Restored(_) => "failed",
        RestoreOutcome::Unavailable(_) => "unavailable",
    }
}

pub fn render_outcome_json(
    subject_id: &str,
    outcome: &RestoreOutcome,
    profile: &Profile,
    style: JsonStyle,
) -> JsonValue {
    match style {
        JsonStyle::CanonicalV1 => JsonValue::Object(outcome_json(subject_id, outcome, profile)),
    }
}

fn outcome_json(
    subject_id: &str,
    outcome: &RestoreOutcome,
    profile: &Profile,
) -> JsonMap<String, JsonValue> {
    let empty = RestoreReport::default();
    let report = outcome.report().unwrap_or(&empty);
    let mut out = JsonMap::new();

    out.insert(
        "subject".to_string(),
        JsonValue::String(subject_id.to_string()),
    );
    out.insert(
        "status".to_string(),
        JsonValue::String(outcome_status(outcome).to_string()),
    );
    out.insert("applied".to_string(), keys_to_json(&report.applied));
    out.insert("skipped".to_string(), keys_to_json(&report.skipped));
    out.insert("not_reached".to_string(), keys_to_json(&report.not_reached));
    out.insert(
        "failure".to_string(),
        match outcome {
            RestoreOutcome::Restored(report) => report
                .failure
                .as_ref()
                .map_or(JsonValue::Null, section_failure_to_json),
            RestoreOutcome::Unavailable(unavailable) => unavailable_to_json(unavailable),
        },
    );
    out.insert("profile".to_string(), profile_to_json(profile));
    out
}

fn keys_to_json(keys: &[&'static str]) -> JsonValue {
    JsonValue::Array(keys.iter().map(|k| JsonValue::from(*k)).collect())
}

fn section_failure_to_json(failure: &SectionFailure) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("section".to_string(), JsonValue::from(failure.key.clone()));
    out.insert("kind".to_string(), JsonValue::from(failure.kind().as_str()));
    out.insert(
        "message".to_string(),
        JsonValue::from(failure.error.to_string()),
    );
    JsonValue::Object(out)
}

fn unavailable_to_json(unavailable: &Unavailable) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert("section".to_string(), JsonValue::Null);
    out.insert(
        "kind".to_string(),
        JsonValue::from(reason_str(unavailable.reason)),
    );
    out.insert(
        "message".to_string(),
        JsonValue::from(unavailable.detail.clone()),
    );
    JsonValue::Object(out)
}

fn reason_str(reason: UnavailableReason) -> &'static str {
    match reason {
        UnavailableReason::NotFound => "not_found",
        UnavailableReason::Corrupt => "corrupt",
    }
}

fn profile_to_json(profile: &Profile) -> JsonValue {
    let mut out = JsonMap::new();

    out.insert("name".to_string(), JsonValue::from(profile.name.clone()));
    out.insert(
        "location".to_string(),
        profile
            .location
            .map_or(JsonValue::Null, |l| JsonValue::from(l.to_string())),
    );
    out.insert(
        "experience_gained".to_string(),
        JsonValue::from(profile.experience_gained),
    );
    out.insert(
        "experience_multiplier".to_string(),
        JsonValue::from(profile.experience_multiplier),
    );
    out.insert(
        "combat_milestone".to_string(),
        JsonValue::from(profile.combat_milestone),
    );
    out.insert(
        "skill_milestone".to_string(),
        JsonValue::from(profile.skill_milestone),
    );
    out.insert(
        "grave_type".to_string(),
        JsonValue::from(profile.grave_type.to_string()),
    );
    out.insert(
        "spellbook".to_string(),
        JsonValue::from(profile.spellbook.to_string()),
    );
    out.insert(
        "autocast".to_string(),
        match profile.autocast {
            Some(autocast) => {
                let mut spell = JsonMap::new();
                spell.insert("book".to_string(), JsonValue::from(autocast.book.to_string()));
                spell.insert("spell_id".to_string(), JsonValue::from(autocast.spell_id));
                JsonValue::Object(spell)
            }
            None => JsonValue::Null,
        },
    );
    out.insert(
        "ironman_mode".to_string(),
        JsonValue::from(profile.ironman_mode.to_string()),
    );
    out.insert(
        "configs".to_string(),
        int_map_to_json(profile.configs.iter().map(|(k, v)| (*k, *v))),
    );

    let mut monitor = JsonMap::new();
    monitor.insert(
        "duplication_flag".to_string(),
        JsonValue::from(profile.monitor.duplication_flag),
    );
    monitor.insert(
        "macro_flag".to_string(),
        JsonValue::from(profile.monitor.macro_flag),
    );
    monitor.insert(
        "last_increase_flag".to_string(),
        JsonValue::from(profile.monitor.last_increase_flag),
    );
    out.insert("monitor".to_string(), JsonValue::Object(monitor));

    out.insert(
        "unlocked_music".to_string(),
        JsonValue::from(profile.unlocked_music.clone()),
    );
    out.insert(
        "states".to_string(),
        names_to_json(profile.states.iter().map(ToString::to_string)),
    );
    out.insert(
        "active_event".to_string(),
        profile
            .active_event
            .as_ref()
            .map_or(JsonValue::Null, |e| JsonValue::from(e.clone())),
    );
    out.insert(
        "emotes".to_string(),
        names_to_json(profile.emotes.iter().map(ToString::to_string)),
    );
    out.insert(
        "statistics".to_string(),
        int_map_to_json(profile.statistics.iter().map(|(k, v)| (*k, *v))),
    );

    let mut gloves = JsonMap::new();
    for (glove, charges) in &profile.brawling_gloves {
        gloves.insert(glove.to_string(), JsonValue::from(*charges));
    }
    out.insert("brawling_gloves".to_string(), JsonValue::Object(gloves));

    out.insert(
        "sections".to_string(),
        names_to_json(
            profile
                .sections
                .iter()
                .filter(|(_, captured)| captured.node.is_some())
                .map(|(kind, _)| kind.as_str().to_string()),
        ),
    );

    JsonValue::Object(out)
}

fn int_map_to_json(entries: impl Iterator<Item = (i32, i32)>) -> JsonValue {
    let mut out = JsonMap::new();
    for (index, value) in entries {
        out.insert(index.to_string(), JsonValue::from(value));
    }
    JsonValue::Object(out)
}

fn names_to_json(names: impl Iterator<Item = String>) -> JsonValue {
    JsonValue::Array(names.map(JsonValue::String).collect())
}

pub fn render_outcome_text(subject_id: &str, outcome: &RestoreOutcome, profile: &Profile) -> String {
    let mut out = String::new();

    write_row(&mut out, "SUBJECT", subject_id);
    write_row(&mut out, "STATUS", outcome_status(outcome));

    match outcome {
        RestoreOutcome::Unavailable(unavailable) => {
            write_row(&mut out, "REASON", reason_str(unavailable.reason));
            write_row(&mut out, "DETAIL", &unavailable.detail);
            return out;
        }
        RestoreOutcome::Restored(report) => {
            write_row(&mut out, "APPLIED", &report.applied_count().to_string());
            write_row(&mut out, "SKIPPED", &join_or_dash(&report.skipped));
            if let Some(failure) = &report.failure {
                write_row(
                    &mut out,
                    "FAILURE",
                    &format!("{failure} [{}]", failure.kind().as_str()),
                );
                write_row(&mut out, "NOT REACHED", &join_or_dash(&report.not_reached));
            }
        }
    }

    out.push('\n');
    write_row(
        &mut out,
        "LOCATION",
        &profile
            .location
            .map_or_else(|| "-".to_string(), |l| l.to_string()),
    );
    write_row(
        &mut out,
        "EXPERIENCE",
        &format!(
            "{} (x{})",
            profile.experience_gained, profile.experience_multiplier
        ),
    );
    write_row(&mut out, "SPELLBOOK", &profile.spellbook.to_string());
    if let Some(autocast) = profile.autocast {
        write_row(
            &mut out,
            "AUTOCAST",
            &format!("{} #{}", autocast.book, autocast.spell_id),
        );
    }
    write_row(&mut out, "GRAVE", &profile.grave_type.to_string());
    write_row(&mut out, "IRONMAN", &profile.ironman_mode.to_string());
    if let Some(event) = &profile.active_event {
        write_row(&mut out, "EVENT", event);
    }
    out
}

/// One row per registered section, in restore order.
pub fn render_section_table(registry: &SectionRegistry) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>3}  {:<section$}{:<required$}AFTER",
        "#",
        "SECTION",
        "REQUIRED",
        section = SECTION_COL_WIDTH,
        required = REQUIRED_COL_WIDTH,
    );
    for (position, descriptor) in registry.descriptors().iter().enumerate() {
        let after = if descriptor.after.is_empty() {
            "-".to_string()
        } else {
            descriptor.after.join(", ")
        };
        let line = format!(
            "{:>3}  {:<section$}{:<required$}{}",
            position + 1,
            fit_column(descriptor.key, SECTION_COL_WIDTH - 1),
            if descriptor.required { "yes" } else { "no" },
            after,
            section = SECTION_COL_WIDTH,
            required = REQUIRED_COL_WIDTH,
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

fn write_row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "{:<width$}{}", format!("{label}:"), value, width = LABEL_WIDTH);
}

fn join_or_dash(keys: &[&'static str]) -> String {
    if keys.is_empty() {
        "-".to_string()
    } else {
        keys.join(", ")
    }
}

fn fit_column(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    if width <= 3 {
        return value.chars().take(width).collect();
    }

    let mut out = String::with_capacity(width);
    for ch in value.chars().take(width - 3) {
        out.push(ch);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_column_truncates_with_ellipsis() {
        assert_eq!(fit_column("familiarManager", 20), "familiarManager");
        assert_eq!(fit_column("achievementData", 10), "achieve...");
        assert_eq!(fit_column("abc", 2), "ab");
    }

    #[test]
    fn join_or_dash_marks_empty_lists() {
        assert_eq!(join_or_dash(&[]), "-");
        assert_eq!(join_or_dash(&["states", "emoteData"]), "states, emoteData");
    }
}
