//! Weapon, armor and accessory tables
//!
//! Names and descriptions are presentation-only; nothing in the engine reads
//! them.

use serde::{Deserialize, Serialize};

/// Weapon identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponId {
    Sword,
    Axe,
    Spear,
    Mace,
    Longbow,
    Dagger,
    Warhammer,
    Katana,
    Trident,
    Scythe,
}

impl WeaponId {
    pub fn all() -> &'static [WeaponId] {
        &[
            WeaponId::Sword,
            WeaponId::Axe,
            WeaponId::Spear,
            WeaponId::Mace,
            WeaponId::Longbow,
            WeaponId::Dagger,
            WeaponId::Warhammer,
            WeaponId::Katana,
            WeaponId::Trident,
            WeaponId::Scythe,
        ]
    }

    /// Persisted identifier
    pub fn key(&self) -> &'static str {
        match self {
            WeaponId::Sword => "sword",
            WeaponId::Axe => "axe",
            WeaponId::Spear => "spear",
            WeaponId::Mace => "mace",
            WeaponId::Longbow => "longbow",
            WeaponId::Dagger => "dagger",
            WeaponId::Warhammer => "warhammer",
            WeaponId::Katana => "katana",
            WeaponId::Trident => "trident",
            WeaponId::Scythe => "scythe",
        }
    }

    pub fn from_key(key: &str) -> Option<WeaponId> {
        Self::all().iter().copied().find(|id| id.key() == key)
    }

    pub fn definition(&self) -> Option<&'static WeaponDefinition> {
        WEAPONS.iter().find(|def| def.id == *self)
    }
}

/// Armor identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorId {
    Leather,
    Chainmail,
    Plate,
    ShadowRobe,
    DragonScale,
}

impl ArmorId {
    pub fn all() -> &'static [ArmorId] {
        &[
            ArmorId::Leather,
            ArmorId::Chainmail,
            ArmorId::Plate,
            ArmorId::ShadowRobe,
            ArmorId::DragonScale,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            ArmorId::Leather => "leather",
            ArmorId::Chainmail => "chainmail",
            ArmorId::Plate => "plate",
            ArmorId::ShadowRobe => "shadow_robe",
            ArmorId::DragonScale => "dragon_scale",
        }
    }

    pub fn from_key(key: &str) -> Option<ArmorId> {
        Self::all().iter().copied().find(|id| id.key() == key)
    }

    pub fn definition(&self) -> Option<&'static ArmorDefinition> {
        ARMORS.iter().find(|def| def.id == *self)
    }
}

/// Accessory identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryId {
    RingOfStrength,
    AmuletOfLife,
    BootsOfSpeed,
    GuardianCloak,
    CrownOfPower,
}

impl AccessoryId {
    pub fn all() -> &'static [AccessoryId] {
        &[
            AccessoryId::RingOfStrength,
            AccessoryId::AmuletOfLife,
            AccessoryId::BootsOfSpeed,
            AccessoryId::GuardianCloak,
            AccessoryId::CrownOfPower,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            AccessoryId::RingOfStrength => "ring_of_strength",
            AccessoryId::AmuletOfLife => "amulet_of_life",
            AccessoryId::BootsOfSpeed => "boots_of_speed",
            AccessoryId::GuardianCloak => "guardian_cloak",
            AccessoryId::CrownOfPower => "crown_of_power",
        }
    }

    pub fn from_key(key: &str) -> Option<AccessoryId> {
        Self::all().iter().copied().find(|id| id.key() == key)
    }

    pub fn definition(&self) -> Option<&'static AccessoryDefinition> {
        ACCESSORIES.iter().find(|def| def.id == *self)
    }
}

#[derive(Debug, Clone)]
pub struct WeaponDefinition {
    pub id: WeaponId,
    pub name: &'static str,
    pub description: &'static str,
    /// Added to strength
    pub damage: i32,
    pub speed: i32,
}

#[derive(Debug, Clone)]
pub struct ArmorDefinition {
    pub id: ArmorId,
    pub name: &'static str,
    pub description: &'static str,
    pub defense: i32,
    pub speed: i32,
    pub health: i32,
}

#[derive(Debug, Clone)]
pub struct AccessoryDefinition {
    pub id: AccessoryId,
    pub name: &'static str,
    pub description: &'static str,
    pub strength: i32,
    pub defense: i32,
    pub speed: i32,
    pub health: i32,
}

pub static WEAPONS: &[WeaponDefinition] = &[
    WeaponDefinition {
        id: WeaponId::Sword,
        name: "Steel Sword",
        description: "+5 damage",
        damage: 5,
        speed: 0,
    },
    WeaponDefinition {
        id: WeaponId::Axe,
        name: "War Axe",
        description: "+7 damage, -1 speed",
        damage: 7,
        speed: -1,
    },
    WeaponDefinition {
        id: WeaponId::Spear,
        name: "Battle Spear",
        description: "+4 damage, +2 speed",
        damage: 4,
        speed: 2,
    },
    WeaponDefinition {
        id: WeaponId::Mace,
        name: "Heavy Mace",
        description: "+8 damage, -2 speed",
        damage: 8,
        speed: -2,
    },
    WeaponDefinition {
        id: WeaponId::Longbow,
        name: "Longbow",
        description: "+3 damage, +3 speed",
        damage: 3,
        speed: 3,
    },
    WeaponDefinition {
        id: WeaponId::Dagger,
        name: "Poisoned Dagger",
        description: "+2 damage, +4 speed",
        damage: 2,
        speed: 4,
    },
    WeaponDefinition {
        id: WeaponId::Warhammer,
        name: "Thunder Warhammer",
        description: "+10 damage, -3 speed",
        damage: 10,
        speed: -3,
    },
    WeaponDefinition {
        id: WeaponId::Katana,
        name: "Cursed Katana",
        description: "+6 damage, +1 speed",
        damage: 6,
        speed: 1,
    },
    WeaponDefinition {
        id: WeaponId::Trident,
        name: "Sea Trident",
        description: "+5 damage, +2 speed",
        damage: 5,
        speed: 2,
    },
    WeaponDefinition {
        id: WeaponId::Scythe,
        name: "Dark Scythe",
        description: "+9 damage, -2 speed",
        damage: 9,
        speed: -2,
    },
];

pub static ARMORS: &[ArmorDefinition] = &[
    ArmorDefinition {
        id: ArmorId::Leather,
        name: "Leather Armor",
        description: "+3 defense",
        defense: 3,
        speed: 0,
        health: 0,
    },
    ArmorDefinition {
        id: ArmorId::Chainmail,
        name: "Chainmail",
        description: "+5 defense, -1 speed, +10 health",
        defense: 5,
        speed: -1,
        health: 10,
    },
    ArmorDefinition {
        id: ArmorId::Plate,
        name: "Steel Plate",
        description: "+8 defense, -2 speed, +20 health",
        defense: 8,
        speed: -2,
        health: 20,
    },
    ArmorDefinition {
        id: ArmorId::ShadowRobe,
        name: "Shadow Robe",
        description: "+2 defense, +3 speed",
        defense: 2,
        speed: 3,
        health: 0,
    },
    ArmorDefinition {
        id: ArmorId::DragonScale,
        name: "Dragon Scale",
        description: "+7 defense, -1 speed, +15 health",
        defense: 7,
        speed: -1,
        health: 15,
    },
];

pub static ACCESSORIES: &[AccessoryDefinition] = &[
    AccessoryDefinition {
        id: AccessoryId::RingOfStrength,
        name: "Ring of Strength",
        description: "+4 strength",
        strength: 4,
        defense: 0,
        speed: 0,
        health: 0,
    },
    AccessoryDefinition {
        id: AccessoryId::AmuletOfLife,
        name: "Amulet of Life",
        description: "+30 health",
        strength: 0,
        defense: 0,
        speed: 0,
        health: 30,
    },
    AccessoryDefinition {
        id: AccessoryId::BootsOfSpeed,
        name: "Boots of Speed",
        description: "+5 speed",
        strength: 0,
        defense: 0,
        speed: 5,
        health: 0,
    },
    AccessoryDefinition {
        id: AccessoryId::GuardianCloak,
        name: "Guardian Cloak",
        description: "+4 defense",
        strength: 0,
        defense: 4,
        speed: 0,
        health: 0,
    },
    AccessoryDefinition {
        id: AccessoryId::CrownOfPower,
        name: "Crown of Power",
        description: "+3 strength, +15 health",
        strength: 3,
        defense: 0,
        speed: 0,
        health: 15,
    },
];
