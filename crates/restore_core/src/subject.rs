use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{BrawlingGlove, Emote, EntityState, GraveType, IronmanMode, SpellBook};
use crate::core_api::{ConsumerError, Location};
use crate::node::Node;

/// Boundary contract of a subsystem that owns the format of its own section.
pub trait SectionConsumer {
    fn parse(&mut self, section: &Node) -> Result<(), ConsumerError>;
}

/// Subsystems that receive their section as an opaque node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumerKind {
    Inventory,
    Bank,
    Equipment,
    Skills,
    Settings,
    Slayer,
    Quests,
    Appearance,
    GrandExchange,
    ActivityData,
    QuestData,
    GlobalData,
    FarmingEquipment,
    CompostBins,
    FarmingWrappers,
    Familiars,
    BarCrawl,
    TreasureTrails,
    BankPin,
    House,
    AchievementDiary,
}

impl ConsumerKind {
    pub fn as_str(&self) -> &'static str {
        match *self {
            Self::Inventory => "inventory",
            Self::Bank => "bank",
            Self::Equipment => "equipment",
            Self::Skills => "skills",
            Self::Settings => "settings",
            Self::Slayer => "slayer",
            Self::Quests => "quests",
            Self::Appearance => "appearance",
            Self::GrandExchange => "grand_exchange",
            Self::ActivityData => "activity_data",
            Self::QuestData => "quest_data",
            Self::GlobalData => "global_data",
            Self::FarmingEquipment => "farming_equipment",
            Self::CompostBins => "compost_bins",
            Self::FarmingWrappers => "farming_wrappers",
            Self::Familiars => "familiars",
            Self::BarCrawl => "bar_crawl",
            Self::TreasureTrails => "treasure_trails",
            Self::BankPin => "bank_pin",
            Self::House => "house",
            Self::AchievementDiary => "achievement_diary",
        }
    }
}

impl fmt::Display for ConsumerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The entity being restored.
///
/// Opaque sections go through [`Subject::consumer`]; everything the restore
/// coerces itself arrives through a typed setter. Setters returning
/// `Result` belong to subsystems that may reject a value.
pub trait Subject {
    fn identifier(&self) -> &str;

    fn consumer(&mut self, kind: ConsumerKind) -> &mut dyn SectionConsumer;

    fn set_location(&mut self, location: Location);

    fn set_experience_totals(&mut self, gained: f64, multiplier: f64);

    fn set_milestones(&mut self, combat: i32, skill: i32);

    fn set_grave_type(&mut self, grave: GraveType);

    fn set_spellbook(&mut self, book: SpellBook);

    fn set_autocast(&mut self, book: SpellBook, spell_id: i32) -> Result<(), ConsumerError>;

    fn set_config(&mut self, index: i32, value: i32) -> Result<(), ConsumerError>;

    fn flag_duplication(&mut self, flag: i32);

    fn set_macro_flag(&mut self, flag: i32);

    fn set_last_increase_flag(&mut self, flag: i64);

    fn unlock_music(&mut self, id: i32) -> Result<(), ConsumerError>;

    fn register_state(&mut self, state: EntityState);

    fn start_event(&mut self, name: &str) -> Result<(), ConsumerError>;

    fn set_ironman_mode(&mut self, mode: IronmanMode);

    fn unlock_emote(&mut self, emote: Emote);

    fn set_statistic(&mut self, index: i32, value: i32) -> Result<(), ConsumerError>;

    fn register_glove(&mut self, glove: BrawlingGlove, charges: i32);
}
