use crate::catalog::{BrawlingGlove, Emote, EntityState, GraveType, IronmanMode, SpellBook};
use crate::coerce::{
    as_bool, as_coordinate_triple, as_double_loose, as_enum_ordinal, as_glove, as_integer,
    as_integer_loose, as_long, as_mapping, as_sequence, as_text, field, optional_field,
};
use crate::core_api::{CoerceError, SectionError};
use crate::node::Node;
use crate::registry::{SectionDescriptor, SectionInput};
use crate::subject::{ConsumerKind, Subject};

/// Every section of a player document, in restore order.
///
/// Order matters: `autocastSpell` resolves against the spellbook selected by
/// `spellbook`, and glove charges attach to equipment restored by
/// `core_data`. Only `grand_exchange` and `autocastSpell` skip a `null`
/// value; anywhere else `null` fails coercion.
pub fn standard_sections() -> Vec<SectionDescriptor> {
    vec![
        SectionDescriptor::required("core_data", restore_core_data),
        SectionDescriptor::required("skills", restore_skills),
        SectionDescriptor::required("settings", restore_settings),
        SectionDescriptor::required("slayer", restore_slayer),
        SectionDescriptor::required("quests", restore_quests),
        SectionDescriptor::required("appearance", restore_appearance),
        SectionDescriptor::required("grave_type", restore_grave_type),
        SectionDescriptor::required("spellbook", restore_spellbook),
        SectionDescriptor::optional("grand_exchange", restore_grand_exchange).null_as_absent(),
        SectionDescriptor::required("activityData", restore_saved_data),
        SectionDescriptor::optional("autocastSpell", restore_autocast)
            .null_as_absent()
            .after(&["spellbook"]),
        SectionDescriptor::required("farming", restore_farming),
        SectionDescriptor::required("configs", restore_configs),
        SectionDescriptor::required("playerMonitor", restore_monitor),
        SectionDescriptor::required("unlockedMusic", restore_music),
        SectionDescriptor::required("familiarManager", restore_familiars),
        SectionDescriptor::required("barCrawl", restore_bar_crawl),
        SectionDescriptor::optional("states", restore_states),
        SectionDescriptor::optional("antiMacroEvent", restore_anti_macro),
        SectionDescriptor::required("treasureTrails", restore_treasure_trails),
        SectionDescriptor::required("bankPinManager", restore_bank_pin),
        SectionDescriptor::required("houseData", restore_house),
        SectionDescriptor::required("achievementData", restore_achievements),
        SectionDescriptor::optional("ironManMode", restore_ironman),
        SectionDescriptor::optional("emoteData", restore_emotes),
        SectionDescriptor::optional("statistics", restore_statistics),
        SectionDescriptor::optional("brawlingGloves", restore_brawling_gloves)
            .after(&["core_data"]),
    ]
}

fn mapping_node(node: &Node) -> Result<&Node, CoerceError> {
    as_mapping(node)?;
    Ok(node)
}

fn sequence_node(node: &Node) -> Result<&Node, CoerceError> {
    as_sequence(node)?;
    Ok(node)
}

fn hand_off(subject: &mut dyn Subject, kind: ConsumerKind, node: &Node) -> Result<(), SectionError> {
    subject.consumer(kind).parse(node)?;
    Ok(())
}

/// Coerces every record before returning any, so one bad record rejects the
/// whole sequence.
fn coerce_records<T>(
    node: &Node,
    coerce: impl Fn(&Node) -> Result<T, CoerceError>,
) -> Result<Vec<T>, CoerceError> {
    as_sequence(node)?.iter().map(coerce).collect()
}

fn index_value_pair(record: &Node) -> Result<(i32, i32), CoerceError> {
    let index = as_integer(field(record, "index")?)?;
    let value = as_integer(field(record, "value")?)?;
    Ok((index, value))
}

// --- core_data: containers and location ---

pub fn restore_core_data(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let core = input.node;
    let inventory = sequence_node(field(core, "inventory")?)?;
    let bank = sequence_node(field(core, "bank")?)?;
    let equipment = sequence_node(field(core, "equipment")?)?;
    let location = as_coordinate_triple(field(core, "location")?)?;

    hand_off(subject, ConsumerKind::Inventory, inventory)?;
    hand_off(subject, ConsumerKind::Bank, bank)?;
    hand_off(subject, ConsumerKind::Equipment, equipment)?;
    subject.set_location(location);
    Ok(())
}

// --- skills: skill table plus root-level experience counters ---

pub fn restore_skills(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let skills = sequence_node(input.node)?;
    let gained = as_double_loose(input.companion("totalEXP")?)?;
    let multiplier = as_double_loose(input.companion("exp_multiplier")?)?;
    let milestones = match input.optional_companion("milestone") {
        Some(milestone) => Some((
            as_integer_loose(field(milestone, "combatMilestone")?)?,
            as_integer_loose(field(milestone, "skillMilestone")?)?,
        )),
        None => None,
    };

    hand_off(subject, ConsumerKind::Skills, skills)?;
    subject.set_experience_totals(gained, multiplier);
    if let Some((combat, skill)) = milestones {
        subject.set_milestones(combat, skill);
    }
    Ok(())
}

// --- Opaque mapping sections ---

pub fn restore_settings(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    hand_off(subject, ConsumerKind::Settings, mapping_node(input.node)?)
}

pub fn restore_slayer(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    hand_off(subject, ConsumerKind::Slayer, mapping_node(input.node)?)
}

pub fn restore_quests(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    hand_off(subject, ConsumerKind::Quests, mapping_node(input.node)?)
}

pub fn restore_appearance(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    hand_off(subject, ConsumerKind::Appearance, mapping_node(input.node)?)
}

pub fn restore_grand_exchange(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    hand_off(subject, ConsumerKind::GrandExchange, mapping_node(input.node)?)
}

pub fn restore_familiars(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    hand_off(subject, ConsumerKind::Familiars, mapping_node(input.node)?)
}

pub fn restore_bar_crawl(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    hand_off(subject, ConsumerKind::BarCrawl, mapping_node(input.node)?)
}

pub fn restore_treasure_trails(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    hand_off(subject, ConsumerKind::TreasureTrails, mapping_node(input.node)?)
}

pub fn restore_bank_pin(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    hand_off(subject, ConsumerKind::BankPin, mapping_node(input.node)?)
}

pub fn restore_house(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    hand_off(subject, ConsumerKind::House, mapping_node(input.node)?)
}

pub fn restore_achievements(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    hand_off(
        subject,
        ConsumerKind::AchievementDiary,
        sequence_node(input.node)?,
    )
}

// --- Ordinal scalars ---

pub fn restore_grave_type(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let grave = as_enum_ordinal::<GraveType>(input.node)?;
    subject.set_grave_type(grave);
    Ok(())
}

pub fn restore_spellbook(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let book = as_enum_ordinal::<SpellBook>(input.node)?;
    subject.set_spellbook(book);
    Ok(())
}

pub fn restore_ironman(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let mode = as_enum_ordinal::<IronmanMode>(input.node)?;
    subject.set_ironman_mode(mode);
    Ok(())
}

// --- activityData / questData / globalData ---

pub fn restore_saved_data(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let activity = mapping_node(input.node)?;
    let quest = mapping_node(input.companion("questData")?)?;
    let global = mapping_node(input.companion("globalData")?)?;

    hand_off(subject, ConsumerKind::ActivityData, activity)?;
    hand_off(subject, ConsumerKind::QuestData, quest)?;
    hand_off(subject, ConsumerKind::GlobalData, global)
}

// --- autocastSpell ---

pub fn restore_autocast(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let autocast = input.node;
    let book = as_enum_ordinal::<SpellBook>(field(autocast, "book")?)?;
    let spell_id = as_integer(field(autocast, "spellId")?)?;
    subject.set_autocast(book, spell_id)?;
    Ok(())
}

// --- farming: independently optional sub-parts ---

pub fn restore_farming(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let farming = input.node;
    let parts = [
        ("equipment", ConsumerKind::FarmingEquipment),
        ("bins", ConsumerKind::CompostBins),
        ("wrappers", ConsumerKind::FarmingWrappers),
    ];

    let mut present = Vec::with_capacity(parts.len());
    for (key, kind) in parts {
        if let Some(node) = optional_field(farming, key)? {
            present.push((kind, sequence_node(node)?));
        }
    }

    for (kind, node) in present {
        hand_off(subject, kind, node)?;
    }
    Ok(())
}

// --- configs: {index, value} records ---

pub fn restore_configs(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let configs = coerce_records(input.node, index_value_pair)?;
    for (index, value) in configs {
        subject.set_config(index, value)?;
    }
    Ok(())
}

// --- playerMonitor: independently optional flags ---

pub fn restore_monitor(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let monitor = input.node;
    let duplication = optional_field(monitor, "duplicationFlag")?
        .map(as_integer)
        .transpose()?;
    let macro_flag = optional_field(monitor, "macroFlag")?
        .map(as_integer)
        .transpose()?;
    let last_increase = optional_field(monitor, "lastIncreaseFlag")?
        .map(as_long)
        .transpose()?;

    if let Some(flag) = duplication {
        subject.flag_duplication(flag);
    }
    if let Some(flag) = macro_flag {
        subject.set_macro_flag(flag);
    }
    if let Some(flag) = last_increase {
        subject.set_last_increase_flag(flag);
    }
    Ok(())
}

// --- unlockedMusic: song ids ---

pub fn restore_music(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let songs = coerce_records(input.node, as_integer)?;
    for id in songs {
        subject.unlock_music(id)?;
    }
    Ok(())
}

// --- states: {stateId, isActive} records ---

pub fn restore_states(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let states = coerce_records(input.node, |record| {
        let state = as_enum_ordinal::<EntityState>(field(record, "stateId")?)?;
        let active = as_bool(field(record, "isActive")?)?;
        Ok((state, active))
    })?;
    for (state, active) in states {
        if active {
            subject.register_state(state);
        }
    }
    Ok(())
}

// --- antiMacroEvent: named event lookup ---

pub fn restore_anti_macro(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let name = as_text(field(input.node, "eventName")?)?;
    if let Some(factory) = input.registries.anti_macro_events.resolve(name)? {
        factory.create(subject)?;
    } else {
        log::debug!("no anti-macro event named {name:?}; leaving events untouched");
    }
    Ok(())
}

// --- emoteData: emote ordinals ---

pub fn restore_emotes(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let emotes = coerce_records(input.node, as_enum_ordinal::<Emote>)?;
    for emote in emotes {
        subject.unlock_emote(emote);
    }
    Ok(())
}

// --- statistics: {index, value} records ---

pub fn restore_statistics(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let statistics = coerce_records(input.node, index_value_pair)?;
    for (index, value) in statistics {
        subject.set_statistic(index, value)?;
    }
    Ok(())
}

// --- brawlingGloves: {gloveId, charges} records ---

pub fn restore_brawling_gloves(
    input: &SectionInput<'_>,
    subject: &mut dyn Subject,
) -> Result<(), SectionError> {
    let gloves: Vec<(BrawlingGlove, i32)> = coerce_records(input.node, |record| {
        let glove = as_glove(field(record, "gloveId")?)?;
        let charges = as_integer_loose(field(record, "charges")?)?;
        Ok((glove, charges))
    })?;
    for (glove, charges) in gloves {
        subject.register_glove(glove, charges);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::SectionRegistry;

    #[test]
    fn standard_sections_form_a_valid_registry() {
        let registry = SectionRegistry::new(standard_sections()).expect("standard registry");
        assert_eq!(registry.len(), 27);
        assert_eq!(registry.keys().next(), Some("core_data"));
        assert_eq!(registry.keys().last(), Some("brawlingGloves"));
    }

    #[test]
    fn autocast_runs_after_spellbook() {
        let registry = SectionRegistry::new(standard_sections()).expect("standard registry");
        let spellbook = registry.position("spellbook").expect("spellbook declared");
        let autocast = registry.position("autocastSpell").expect("autocast declared");
        assert!(spellbook < autocast);
    }

    #[test]
    fn required_flags_match_document_format() {
        let registry = SectionRegistry::new(standard_sections()).expect("standard registry");
        let optional: Vec<&str> = registry
            .descriptors()
            .iter()
            .filter(|d| !d.required)
            .map(|d| d.key)
            .collect();
        assert_eq!(
            optional,
            vec![
                "grand_exchange",
                "autocastSpell",
                "states",
                "antiMacroEvent",
                "ironManMode",
                "emoteData",
                "statistics",
                "brawlingGloves",
            ]
        );
    }

    #[test]
    fn only_nullable_sections_skip_null_values() {
        let registry = SectionRegistry::new(standard_sections()).expect("standard registry");
        let nullable: Vec<&str> = registry
            .descriptors()
            .iter()
            .filter(|d| d.null_as_absent)
            .map(|d| d.key)
            .collect();
        assert_eq!(nullable, vec!["grand_exchange", "autocastSpell"]);
    }
}
