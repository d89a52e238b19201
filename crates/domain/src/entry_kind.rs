//! Entry kinds and their host document class.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::PackId;

/// Host document class an entry kind is stored as.
///
/// Actor-like kinds live in actor collections and own embedded item
/// collections; item-like kinds live in item collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentClass {
    Actor,
    Item,
}

/// Domain kind of an entry. Stored on every host document as its `type`
/// discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    // Actor-like
    Pilot,
    Mech,
    Npc,
    Deployable,

    // Item-like
    Skill,
    Talent,
    Frame,
    Weapon,
    System,
    CoreBonus,
    License,
    Gear,
    Reserve,
    Status,
    NpcClass,
    NpcFeature,
}

impl EntryKind {
    pub const ALL: [EntryKind; 16] = [
        EntryKind::Pilot,
        EntryKind::Mech,
        EntryKind::Npc,
        EntryKind::Deployable,
        EntryKind::Skill,
        EntryKind::Talent,
        EntryKind::Frame,
        EntryKind::Weapon,
        EntryKind::System,
        EntryKind::CoreBonus,
        EntryKind::License,
        EntryKind::Gear,
        EntryKind::Reserve,
        EntryKind::Status,
        EntryKind::NpcClass,
        EntryKind::NpcFeature,
    ];

    /// Document class this kind is stored as. Exhaustive so a new kind cannot
    /// be added without being classified.
    pub const fn class(self) -> DocumentClass {
        match self {
            EntryKind::Pilot | EntryKind::Mech | EntryKind::Npc | EntryKind::Deployable => {
                DocumentClass::Actor
            }
            EntryKind::Skill
            | EntryKind::Talent
            | EntryKind::Frame
            | EntryKind::Weapon
            | EntryKind::System
            | EntryKind::CoreBonus
            | EntryKind::License
            | EntryKind::Gear
            | EntryKind::Reserve
            | EntryKind::Status
            | EntryKind::NpcClass
            | EntryKind::NpcFeature => DocumentClass::Item,
        }
    }

    pub const fn is_actor_like(self) -> bool {
        matches!(self.class(), DocumentClass::Actor)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EntryKind::Pilot => "pilot",
            EntryKind::Mech => "mech",
            EntryKind::Npc => "npc",
            EntryKind::Deployable => "deployable",
            EntryKind::Skill => "skill",
            EntryKind::Talent => "talent",
            EntryKind::Frame => "frame",
            EntryKind::Weapon => "weapon",
            EntryKind::System => "system",
            EntryKind::CoreBonus => "core_bonus",
            EntryKind::License => "license",
            EntryKind::Gear => "gear",
            EntryKind::Reserve => "reserve",
            EntryKind::Status => "status",
            EntryKind::NpcClass => "npc_class",
            EntryKind::NpcFeature => "npc_feature",
        }
    }

    /// Id of the core pack holding this kind's entries.
    pub fn core_pack_id(self) -> PackId {
        PackId::new(format!("world.{}", self.as_str()))
    }

    /// Name given to created documents whose record carries none.
    pub fn default_name(self) -> String {
        let label = self.as_str().replace('_', " ");
        let mut chars = label.chars();
        match chars.next() {
            Some(first) => format!("New {}{}", first.to_uppercase(), chars.as_str()),
            None => "New Entry".to_string(),
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownKind(s.to_string()))
    }
}
