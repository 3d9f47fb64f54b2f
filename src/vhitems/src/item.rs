//! Typed item records built from raw prefab fields

use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::FieldError;
use crate::localization::Localization;
use crate::prefab::{Field, RawFields};
use crate::table::Row;

/// Suffix newer exports append to some prefab file names
pub const LEGACY_SUFFIX: &str = "_0";

/// Item identifier derived from a prefab file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemName {
    /// File stem as found on disk
    pub raw: String,
    /// Stem with the legacy suffix removed
    pub normalized: String,
}

impl ItemName {
    /// Derive the item name from a file stem
    pub fn from_stem(stem: &str) -> Self {
        let normalized = stem.strip_suffix(LEGACY_SUFFIX).unwrap_or(stem);
        ItemName {
            raw: stem.to_string(),
            normalized: normalized.to_string(),
        }
    }

    /// Derive the item name from a prefab path
    pub fn from_path(path: &Path) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        Self::from_stem(&stem)
    }

    pub fn is_renamed(&self) -> bool {
        self.raw != self.normalized
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_renamed() {
            write!(f, "{} -> {}", self.raw, self.normalized)
        } else {
            f.write_str(&self.normalized)
        }
    }
}

/// One exported item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemRecord {
    pub item_name: String,
    pub is_teleportable: bool,
    pub uses_durability: bool,
    #[serde(serialize_with = "serialize_display")]
    pub max_durability: f64,
    #[serde(serialize_with = "serialize_display")]
    pub durability_per_level: f64,
    pub max_stack: i32,
    pub display_name: String,
    pub max_quality: i32,
    pub item_type: i32,
}

impl Row for ItemRecord {
    const COLUMNS: &'static [&'static str] = &[
        "ItemName",
        "IsTeleportable",
        "UsesDurability",
        "MaxDurability",
        "DurabilityPerLevel",
        "MaxStack",
        "DisplayName",
        "MaxQuality",
        "ItemType",
    ];
}

/// Floats go out as `100` or `0.5`, never `100.0` or a locale format
fn serialize_display<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Result of building a record from one prefab
#[derive(Debug, Clone, PartialEq)]
pub enum Built {
    /// The name token resolved and the record was built
    Added(ItemRecord),
    /// The name token is missing or has no translation
    Discarded { token: Option<String> },
}

impl ItemRecord {
    /// Build a record from raw fields, joining the name token against the
    /// localization table
    pub fn build(
        name: &ItemName,
        raw: &RawFields,
        localization: &Localization,
    ) -> Result<Built, FieldError> {
        let Some(token) = raw.get(Field::Name) else {
            return Ok(Built::Discarded { token: None });
        };
        let Some(display_name) = localization.get(token) else {
            return Ok(Built::Discarded {
                token: Some(token.to_string()),
            });
        };

        Ok(Built::Added(ItemRecord {
            item_name: name.normalized.clone(),
            is_teleportable: parse_flag(raw, Field::Teleportable)?,
            uses_durability: parse_flag(raw, Field::UseDurability)?,
            max_durability: parse_number(raw, Field::MaxDurability)?,
            durability_per_level: parse_number(raw, Field::DurabilityPerLevel)?,
            max_stack: parse_number(raw, Field::MaxStackSize)?,
            display_name: display_name.to_string(),
            max_quality: parse_number(raw, Field::MaxQuality)?,
            item_type: parse_number(raw, Field::ItemType)?,
        }))
    }
}

fn parse_number<T: FromStr>(raw: &RawFields, field: Field) -> Result<T, FieldError> {
    let value = raw.get(field).ok_or(FieldError::Missing(field.key()))?;
    value.parse().map_err(|_| FieldError::Malformed {
        field: field.key(),
        value: value.to_string(),
    })
}

fn parse_flag(raw: &RawFields, field: Field) -> Result<bool, FieldError> {
    parse_number::<i64>(raw, field).map(|v| v != 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefab::parse_item_data;

    const MY_ITEM: &str = "m_itemData:\nm_name: $MyItem\nm_teleportable: 1\nm_useDurability: 0\nm_maxDurability: 100\nm_durabilityPerLevel: 0\nm_maxStackSize: 1\nm_maxQuality: 4\nm_itemType: 2";

    fn localization() -> Localization {
        let mut loc = Localization::new();
        loc.insert("MyItem", "Sword");
        loc
    }

    #[test]
    fn test_item_name_strips_legacy_suffix() {
        let name = ItemName::from_stem("MyItem_0");
        assert_eq!(name.normalized, "MyItem");
        assert_eq!(name.raw, "MyItem_0");
        assert!(name.is_renamed());
        assert_eq!(name.to_string(), "MyItem_0 -> MyItem");
    }

    #[test]
    fn test_item_name_keeps_other_suffixes() {
        for stem in ["MyItem", "MyItem_01", "MyItem_1", "MyItem0"] {
            let name = ItemName::from_stem(stem);
            assert_eq!(name.normalized, stem);
            assert!(!name.is_renamed());
            assert_eq!(name.to_string(), stem);
        }
    }

    #[test]
    fn test_item_name_strips_once() {
        assert_eq!(ItemName::from_stem("Item_0_0").normalized, "Item_0");
    }

    #[test]
    fn test_item_name_from_path() {
        let name = ItemName::from_path(Path::new("Assets/PrefabInstance/MyItem_0.prefab"));
        assert_eq!(name.raw, "MyItem_0");
        assert_eq!(name.normalized, "MyItem");
    }

    #[test]
    fn test_build_record() {
        let raw = parse_item_data(MY_ITEM).unwrap();
        let built = ItemRecord::build(&ItemName::from_stem("MyItem"), &raw, &localization());

        let Ok(Built::Added(record)) = built else {
            panic!("expected record");
        };
        assert_eq!(
            record,
            ItemRecord {
                item_name: "MyItem".to_string(),
                is_teleportable: true,
                uses_durability: false,
                max_durability: 100.0,
                durability_per_level: 0.0,
                max_stack: 1,
                display_name: "Sword".to_string(),
                max_quality: 4,
                item_type: 2,
            }
        );
    }

    #[test]
    fn test_build_discards_unknown_token() {
        let raw = parse_item_data(&MY_ITEM.replace("$MyItem", "$Other")).unwrap();
        let built = ItemRecord::build(&ItemName::from_stem("MyItem"), &raw, &localization());
        assert_eq!(
            built,
            Ok(Built::Discarded {
                token: Some("Other".to_string())
            })
        );
    }

    #[test]
    fn test_build_discards_missing_name() {
        let raw = parse_item_data("m_itemData:\nm_maxStackSize: 1\n").unwrap();
        let built = ItemRecord::build(&ItemName::from_stem("MyItem"), &raw, &localization());
        assert_eq!(built, Ok(Built::Discarded { token: None }));
    }

    #[test]
    fn test_build_malformed_number() {
        let raw = parse_item_data(&MY_ITEM.replace("m_maxStackSize: 1", "m_maxStackSize: many"))
            .unwrap();
        let built = ItemRecord::build(&ItemName::from_stem("MyItem"), &raw, &localization());
        assert_eq!(
            built,
            Err(FieldError::Malformed {
                field: "m_maxStackSize",
                value: "many".to_string(),
            })
        );
    }

    #[test]
    fn test_build_missing_field() {
        let raw = parse_item_data(&MY_ITEM.replace("m_itemType: 2", "")).unwrap();
        let built = ItemRecord::build(&ItemName::from_stem("MyItem"), &raw, &localization());
        assert_eq!(built, Err(FieldError::Missing("m_itemType")));
    }

    #[test]
    fn test_build_fractional_durability() {
        let raw = parse_item_data(&MY_ITEM.replace(
            "m_durabilityPerLevel: 0",
            "m_durabilityPerLevel: 12.5",
        ))
        .unwrap();
        let Ok(Built::Added(record)) =
            ItemRecord::build(&ItemName::from_stem("MyItem"), &raw, &localization())
        else {
            panic!("expected record");
        };
        assert_eq!(record.durability_per_level, 12.5);
    }

    #[test]
    fn test_nonzero_flag_is_true() {
        let raw = parse_item_data(&MY_ITEM.replace("m_useDurability: 0", "m_useDurability: -3"))
            .unwrap();
        let Ok(Built::Added(record)) =
            ItemRecord::build(&ItemName::from_stem("MyItem"), &raw, &localization())
        else {
            panic!("expected record");
        };
        assert!(record.uses_durability);
    }
}
