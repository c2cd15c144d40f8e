use std::collections::BTreeMap;

use crate::catalog::{BrawlingGlove, Emote, EntityState, GraveType, IronmanMode, SpellBook};
use crate::core_api::{ConsumerError, Location};
use crate::node::Node;
use crate::subject::{ConsumerKind, SectionConsumer, Subject};

pub const SAVED_CONFIG_CAPACITY: i32 = 2048;
pub const STATISTIC_CAPACITY: i32 = 64;

/// Holds whatever section node its subsystem was last handed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CapturedSection {
    pub node: Option<Node>,
}

impl SectionConsumer for CapturedSection {
    fn parse(&mut self, section: &Node) -> Result<(), ConsumerError> {
        self.node = Some(section.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutocastSpell {
    pub book: SpellBook,
    pub spell_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonitorFlags {
    pub duplication_flag: i32,
    pub macro_flag: i32,
    pub last_increase_flag: i64,
}

/// In-memory subject that records every restored value.
///
/// A fresh profile is the default-initialised state a subject has before
/// any document is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub sections: BTreeMap<ConsumerKind, CapturedSection>,
    pub location: Option<Location>,
    pub experience_gained: f64,
    pub experience_multiplier: f64,
    pub combat_milestone: i32,
    pub skill_milestone: i32,
    pub grave_type: GraveType,
    pub spellbook: SpellBook,
    pub autocast: Option<AutocastSpell>,
    pub configs: BTreeMap<i32, i32>,
    pub monitor: MonitorFlags,
    pub unlocked_music: Vec<i32>,
    pub states: Vec<EntityState>,
    pub active_event: Option<String>,
    pub ironman_mode: IronmanMode,
    pub emotes: Vec<Emote>,
    pub statistics: BTreeMap<i32, i32>,
    pub brawling_gloves: BTreeMap<BrawlingGlove, i32>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sections: BTreeMap::new(),
            location: None,
            experience_gained: 0.0,
            experience_multiplier: 1.0,
            combat_milestone: 0,
            skill_milestone: 0,
            grave_type: GraveType::default(),
            spellbook: SpellBook::default(),
            autocast: None,
            configs: BTreeMap::new(),
            monitor: MonitorFlags::default(),
            unlocked_music: Vec::new(),
            states: Vec::new(),
            active_event: None,
            ironman_mode: IronmanMode::default(),
            emotes: Vec::new(),
            statistics: BTreeMap::new(),
            brawling_gloves: BTreeMap::new(),
        }
    }

    /// The node handed to `kind`, if its section was restored.
    pub fn section(&self, kind: ConsumerKind) -> Option<&Node> {
        self.sections.get(&kind).and_then(|s| s.node.as_ref())
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new("")
    }
}

impl Subject for Profile {
    fn identifier(&self) -> &str {
        &self.name
    }

    fn consumer(&mut self, kind: ConsumerKind) -> &mut dyn SectionConsumer {
        self.sections.entry(kind).or_default()
    }

    fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    fn set_experience_totals(&mut self, gained: f64, multiplier: f64) {
        self.experience_gained = gained;
        self.experience_multiplier = multiplier;
    }

    fn set_milestones(&mut self, combat: i32, skill: i32) {
        self.combat_milestone = combat;
        self.skill_milestone = skill;
    }

    fn set_grave_type(&mut self, grave: GraveType) {
        self.grave_type = grave;
    }

    fn set_spellbook(&mut self, book: SpellBook) {
        self.spellbook = book;
    }

    fn set_autocast(&mut self, book: SpellBook, spell_id: i32) -> Result<(), ConsumerError> {
        if spell_id < 0 {
            return Err(ConsumerError::new(format!(
                "no combat spell {spell_id} in the {book} spellbook"
            )));
        }
        self.autocast = Some(AutocastSpell { book, spell_id });
        Ok(())
    }

    fn set_config(&mut self, index: i32, value: i32) -> Result<(), ConsumerError> {
        if !(0..SAVED_CONFIG_CAPACITY).contains(&index) {
            return Err(ConsumerError::new(format!(
                "config index {index} outside 0..{SAVED_CONFIG_CAPACITY}"
            )));
        }
        self.configs.insert(index, value);
        Ok(())
    }

    fn flag_duplication(&mut self, flag: i32) {
        self.monitor.duplication_flag |= flag;
    }

    fn set_macro_flag(&mut self, flag: i32) {
        self.monitor.macro_flag = flag;
    }

    fn set_last_increase_flag(&mut self, flag: i64) {
        self.monitor.last_increase_flag = flag;
    }

    fn unlock_music(&mut self, id: i32) -> Result<(), ConsumerError> {
        if id < 0 {
            return Err(ConsumerError::new(format!("unknown music track {id}")));
        }
        if !self.unlocked_music.contains(&id) {
            self.unlocked_music.push(id);
        }
        Ok(())
    }

    fn register_state(&mut self, state: EntityState) {
        if !self.states.contains(&state) {
            self.states.push(state);
        }
    }

    fn start_event(&mut self, name: &str) -> Result<(), ConsumerError> {
        self.active_event = Some(name.to_string());
        Ok(())
    }

    fn set_ironman_mode(&mut self, mode: IronmanMode) {
        self.ironman_mode = mode;
    }

    fn unlock_emote(&mut self, emote: Emote) {
        if !self.emotes.contains(&emote) {
            self.emotes.push(emote);
        }
    }

    fn set_statistic(&mut self, index: i32, value: i32) -> Result<(), ConsumerError> {
        if !(0..STATISTIC_CAPACITY).contains(&index) {
            return Err(ConsumerError::new(format!(
                "statistic index {index} outside 0..{STATISTIC_CAPACITY}"
            )));
        }
        self.statistics.insert(index, value);
        Ok(())
    }

    fn register_glove(&mut self, glove: BrawlingGlove, charges: i32) {
        self.brawling_gloves.insert(glove, charges);
    }
}
