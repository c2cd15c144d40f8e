// Symbolic tables referenced from player documents.
//
// Every `ordinal_enum!` below is persisted by position. Append new values at
// the end; never reorder or remove.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ordinal_enum;

ordinal_enum! {
    pub enum IronmanMode as "IronmanMode" {
        None => "None",
        Standard => "Standard",
        Ultimate => "Ultimate",
    }
}

impl Default for IronmanMode {
    fn default() -> Self {
        Self::None
    }
}

ordinal_enum! {
    pub enum GraveType as "GraveType" {
        MemorialPlaque => "Memorial plaque",
        Flag => "Flag",
        SmallGravestone => "Small gravestone",
        OrnateGravestone => "Ornate gravestone",
        FontOfLife => "Font of life",
        Stele => "Stele",
        SaradominSymbol => "Symbol of Saradomin",
        ZamorakSymbol => "Symbol of Zamorak",
        GuthixSymbol => "Symbol of Guthix",
        BandosSymbol => "Symbol of Bandos",
        ArmadylSymbol => "Symbol of Armadyl",
        AncientSymbol => "Ancient symbol",
        AngelOfDeath => "Angel of death",
    }
}

impl Default for GraveType {
    fn default() -> Self {
        Self::MemorialPlaque
    }
}

ordinal_enum! {
    pub enum SpellBook as "SpellBook" {
        Modern => "Modern",
        Ancient => "Ancient",
        Lunar => "Lunar",
    }
}

impl Default for SpellBook {
    fn default() -> Self {
        Self::Modern
    }
}

ordinal_enum! {
    pub enum EntityState as "EntityState" {
        Poisoned => "Poisoned",
        Teleblocked => "Teleblocked",
        Frozen => "Frozen",
        Stunned => "Stunned",
        Skulled => "Skulled",
        Diseased => "Diseased",
        AntifirePotion => "Antifire potion",
        Antipoison => "Antipoison",
        StaminaBoost => "Stamina boost",
        PrayerDrain => "Prayer drain",
        OverloadBoost => "Overload boost",
        Infected => "Infected",
    }
}

ordinal_enum! {
    pub enum Emote as "Emote" {
        Yes => "Yes",
        No => "No",
        Bow => "Bow",
        Angry => "Angry",
        Think => "Think",
        Wave => "Wave",
        Shrug => "Shrug",
        Cheer => "Cheer",
        Beckon => "Beckon",
        Laugh => "Laugh",
        JumpForJoy => "Jump for joy",
        Yawn => "Yawn",
        Dance => "Dance",
        Jig => "Jig",
        Spin => "Spin",
        Headbang => "Headbang",
        Cry => "Cry",
        BlowKiss => "Blow kiss",
        Panic => "Panic",
        Raspberry => "Raspberry",
        Clap => "Clap",
        Salute => "Salute",
        GoblinBow => "Goblin bow",
        GoblinSalute => "Goblin salute",
        GlassBox => "Glass box",
        ClimbRope => "Climb rope",
        Lean => "Lean",
        GlassWall => "Glass wall",
        Idea => "Idea",
        Stomp => "Stomp",
        Flap => "Flap",
        SlapHead => "Slap head",
        ZombieWalk => "Zombie walk",
        ZombieDance => "Zombie dance",
        ZombieHand => "Zombie hand",
        Scared => "Scared",
        BunnyHop => "Bunny hop",
        Skillcape => "Skillcape",
        SnowmanDance => "Snowman dance",
        AirGuitar => "Air guitar",
        SafetyFirst => "Safety first",
        Explore => "Explore",
        Trick => "Trick",
        Freeze => "Freeze",
        GiveThanks => "Give thanks",
    }
}

/// Brawling gloves, referenced in documents by their one-byte indicator
/// rather than by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BrawlingGlove {
    Melee,
    Ranged,
    Magic,
    Prayer,
    Agility,
    Woodcutting,
    Firemaking,
    Mining,
    Hunter,
    Thieving,
    Smithing,
    Fishing,
    Cooking,
}

struct GloveEntry {
    glove: BrawlingGlove,
    indicator: u8,
    item_id: i32,
    name: &'static str,
}

#[rustfmt::skip]
const GLOVES: &[GloveEntry] = &[
    GloveEntry { glove: BrawlingGlove::Melee,       indicator:  1, item_id: 13845, name: "Melee" },
    GloveEntry { glove: BrawlingGlove::Ranged,      indicator:  2, item_id: 13846, name: "Ranged" },
    GloveEntry { glove: BrawlingGlove::Magic,       indicator:  3, item_id: 13847, name: "Magic" },
    GloveEntry { glove: BrawlingGlove::Prayer,      indicator:  4, item_id: 13848, name: "Prayer" },
    GloveEntry { glove: BrawlingGlove::Agility,     indicator:  5, item_id: 13849, name: "Agility" },
    GloveEntry { glove: BrawlingGlove::Woodcutting, indicator:  6, item_id: 13850, name: "Woodcutting" },
    GloveEntry { glove: BrawlingGlove::Firemaking,  indicator:  7, item_id: 13851, name: "Firemaking" },
    GloveEntry { glove: BrawlingGlove::Mining,      indicator:  8, item_id: 13852, name: "Mining" },
    GloveEntry { glove: BrawlingGlove::Hunter,      indicator:  9, item_id: 13853, name: "Hunter" },
    GloveEntry { glove: BrawlingGlove::Thieving,    indicator: 10, item_id: 13854, name: "Thieving" },
    GloveEntry { glove: BrawlingGlove::Smithing,    indicator: 11, item_id: 13855, name: "Smithing" },
    GloveEntry { glove: BrawlingGlove::Fishing,     indicator: 12, item_id: 13856, name: "Fishing" },
    GloveEntry { glove: BrawlingGlove::Cooking,     indicator: 13, item_id: 13857, name: "Cooking" },
];

impl BrawlingGlove {
    pub const NAME: &'static str = "BrawlingGlove";

    pub fn from_indicator(indicator: u8) -> Option<Self> {
        GLOVES
            .iter()
            .find(|entry| entry.indicator == indicator)
            .map(|entry| entry.glove)
    }

    pub fn indicator(&self) -> u8 {
        self.entry().indicator
    }

    pub fn item_id(&self) -> i32 {
        self.entry().item_id
    }

    pub fn as_str(&self) -> &'static str {
        self.entry().name
    }

    pub fn count() -> usize {
        GLOVES.len()
    }

    fn entry(&self) -> &'static GloveEntry {
        // GLOVES lists every variant in declaration order.
        &GLOVES[*self as usize]
    }
}

impl fmt::Display for BrawlingGlove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordinal::Ordinal;

    #[test]
    fn glove_table_matches_variant_order() {
        for (index, entry) in GLOVES.iter().enumerate() {
            assert_eq!(entry.glove as usize, index);
            assert_eq!(BrawlingGlove::from_indicator(entry.indicator), Some(entry.glove));
        }
        assert_eq!(BrawlingGlove::from_indicator(0), None);
        assert_eq!(BrawlingGlove::from_indicator(14), None);
    }

    #[test]
    fn spellbooks_resolve_by_position() {
        assert_eq!(SpellBook::from_ordinal(2), Some(SpellBook::Lunar));
        assert_eq!(SpellBook::from_ordinal(192), None);
    }

    #[test]
    fn defaults_are_first_declared_values() {
        assert_eq!(IronmanMode::default().ordinal(), 0);
        assert_eq!(GraveType::default().ordinal(), 0);
        assert_eq!(SpellBook::default().ordinal(), 0);
    }
}
