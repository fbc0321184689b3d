//! Forward-compatible decoding of catalog ids on persisted sheets
//!
//! A sheet written by a newer catalog may reference ids this build does not
//! know. Such entries decode as absent and are reported with a warning.

use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::catalog::{AbilityId, AccessoryId, ArmorId, WeaponId};
use crate::character::sheet::{InventoryItem, WEAPON_SLOTS};
use crate::progression::rewards::{PendingReward, RewardChoice};

/// A `{ "type": ..., "id": ... }` record before id resolution
#[derive(Debug, Deserialize)]
struct TaggedRecord {
    #[serde(rename = "type")]
    kind: String,
    id: String,
}

fn resolve<T>(raw: Option<String>, what: &str, lookup: fn(&str) -> Option<T>) -> Option<T> {
    let key = raw?;
    let resolved = lookup(&key);
    if resolved.is_none() {
        warn!(id = %key, "Skipping unknown {} id", what);
    }
    resolved
}

pub fn weapon_slots<'de, D>(deserializer: D) -> Result<[Option<WeaponId>; WEAPON_SLOTS], D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    if raw.len() > WEAPON_SLOTS {
        warn!(slots = raw.len(), "Ignoring weapon slots beyond the fourth");
    }

    let mut slots = [None; WEAPON_SLOTS];
    for (slot, key) in slots.iter_mut().zip(raw) {
        *slot = resolve(key, "weapon", WeaponId::from_key);
    }
    Ok(slots)
}

pub fn armor<'de, D>(deserializer: D) -> Result<Option<ArmorId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(resolve(Option::<String>::deserialize(deserializer)?, "armor", ArmorId::from_key))
}

pub fn accessory<'de, D>(deserializer: D) -> Result<Option<AccessoryId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(resolve(Option::<String>::deserialize(deserializer)?, "accessory", AccessoryId::from_key))
}

/// Known abilities in first-seen order, duplicates removed
pub fn abilities<'de, D>(deserializer: D) -> Result<Vec<AbilityId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
    let mut learned = Vec::with_capacity(raw.len());
    for key in raw {
        if let Some(id) = resolve(Some(key), "ability", AbilityId::from_key) {
            if !learned.contains(&id) {
                learned.push(id);
            }
        }
    }
    Ok(learned)
}

pub fn inventory<'de, D>(deserializer: D) -> Result<Vec<InventoryItem>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Vec<TaggedRecord>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .filter_map(|record| {
            let item = InventoryItem::from_record(&record.kind, &record.id);
            if item.is_none() {
                warn!(kind = %record.kind, id = %record.id, "Skipping unknown inventory item");
            }
            item
        })
        .collect())
}

/// Pending choices in their persisted order
///
/// Unrecognized offers keep their slot. A set with no recognisable offer
/// decodes as none pending.
pub fn pending_choices<'de, D>(deserializer: D) -> Result<Option<Vec<PendingReward>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Vec<TaggedRecord>>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let choices: Vec<PendingReward> = raw
        .into_iter()
        .map(|record| match RewardChoice::from_record(&record.kind, &record.id) {
            Some(choice) => PendingReward::Offered(choice),
            None => {
                warn!(kind = %record.kind, id = %record.id, "Keeping unrecognized reward choice");
                PendingReward::Unrecognized {
                    kind: record.kind,
                    id: record.id,
                }
            }
        })
        .collect();

    Ok(if choices.iter().any(|slot| slot.choice().is_some()) {
        Some(choices)
    } else {
        None
    })
}
