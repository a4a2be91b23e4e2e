//! SSID-class → icon mapping.
//!
//! A closed table validated at construction. Lookup of an *unknown class*
//! falls back to the table's default icon (stations with exotic SSIDs still
//! render); a *malformed table* (duplicate token, empty id) is rejected up
//! front instead of failing silently at render time.

use std::collections::BTreeMap;
use std::fmt;

/// Identifier the presenter resolves to an actual icon asset
/// (e.g. `"icons/vehicle.png"`).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IconId(pub String);

impl IconId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Construction-time validation failure for an [`IconTable`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IconTableError {
    DuplicateClass { class: String },
    EmptyIconId { class: String },
    EmptyDefault,
}

impl fmt::Display for IconTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconTableError::DuplicateClass { class } => {
                write!(f, "duplicate ssid class '{class}' in icon table")
            }
            IconTableError::EmptyIconId { class } => {
                write!(f, "empty icon id for ssid class '{class}'")
            }
            IconTableError::EmptyDefault => write!(f, "empty default icon id"),
        }
    }
}

impl std::error::Error for IconTableError {}

/// Closed mapping from SSID class token to icon identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconTable {
    by_class: BTreeMap<String, IconId>,
    default: IconId,
}

impl IconTable {
    /// Build a table from `(class, icon_id)` entries plus the fallback icon.
    pub fn new<I, S, T>(entries: I, default: T) -> Result<Self, IconTableError>
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let default = default.into();
        if default.is_empty() {
            return Err(IconTableError::EmptyDefault);
        }
        let mut by_class = BTreeMap::new();
        for (class, icon) in entries {
            let class = class.into();
            let icon = icon.into();
            if icon.is_empty() {
                return Err(IconTableError::EmptyIconId { class });
            }
            if by_class.insert(class.clone(), IconId::new(icon)).is_some() {
                return Err(IconTableError::DuplicateClass { class });
            }
        }
        Ok(Self {
            by_class,
            default: IconId::new(default),
        })
    }

    /// The stock APRS table: common SSID conventions plus a generic default.
    pub fn builtin() -> Self {
        Self::new(
            [
                ("0", "icons/home.png"),
                ("1", "icons/digipeater.png"),
                ("3", "icons/car.png"),
                ("5", "icons/igate.png"),
                ("6", "icons/weather.png"),
                ("9", "icons/vehicle.png"),
                ("14", "icons/truck.png"),
            ],
            "icons/default.png",
        )
        .expect("builtin icon table is valid")
    }

    /// Icon for `ssid_class`, falling back to the default icon for classes
    /// outside the table.
    pub fn icon_for(&self, ssid_class: &str) -> &IconId {
        self.by_class.get(ssid_class).unwrap_or(&self.default)
    }

    pub fn default_icon(&self) -> &IconId {
        &self.default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_maps_known_classes() {
        let t = IconTable::builtin();
        assert_eq!(t.icon_for("9").as_str(), "icons/vehicle.png");
        assert_eq!(t.icon_for("0").as_str(), "icons/home.png");
    }

    #[test]
    fn unknown_class_falls_back_to_default() {
        let t = IconTable::builtin();
        assert_eq!(t.icon_for("7").as_str(), "icons/default.png");
        assert_eq!(t.icon_for(""), t.default_icon());
    }

    #[test]
    fn duplicate_class_rejected() {
        let err = IconTable::new([("9", "a.png"), ("9", "b.png")], "d.png").unwrap_err();
        assert_eq!(
            err,
            IconTableError::DuplicateClass {
                class: "9".to_string()
            }
        );
    }

    #[test]
    fn empty_ids_rejected() {
        assert_eq!(
            IconTable::new([("9", "")], "d.png").unwrap_err(),
            IconTableError::EmptyIconId {
                class: "9".to_string()
            }
        );
        assert_eq!(
            IconTable::new([("9", "a.png")], "").unwrap_err(),
            IconTableError::EmptyDefault
        );
    }
}
