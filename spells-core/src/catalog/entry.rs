//! The spell entry model and its text rendering

use serde::{Deserialize, Serialize};
use std::fmt;

/// One parsed spell, keyed in the catalog by `name`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Spell level, 0 for cantrips
    pub level: u8,

    /// Catalog key
    pub name: String,

    /// Set when the raw name carried the " (Ritual)" marker
    pub ritual: bool,

    /// School of magic (e.g. "Evocation")
    pub school: String,

    pub cast_time: String,
    pub range: String,
    pub components: String,

    /// Duration with any "Concentration, up to " prefix removed
    pub duration: String,

    pub concentration: bool,

    /// Leading parenthetical of the description, parentheses included
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,

    pub description: String,

    /// One class per ingestion that produced this name, in ingestion order
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Entry {
    pub fn is_cantrip(&self) -> bool {
        self.level == 0
    }

    /// Classes as a comma-separated string
    pub fn classes_display(&self) -> String {
        self.classes.join(", ")
    }

    /// First line of the rendering: name, level, school and classes
    pub fn headline(&self) -> String {
        if self.is_cantrip() {
            format!(
                "{}, {} cantrip for [{}]",
                self.name,
                self.school,
                self.classes_display()
            )
        } else {
            format!(
                "{}, Level {} {} spell for [{}]",
                self.name,
                self.level,
                self.school,
                self.classes_display()
            )
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.headline())?;
        if self.ritual {
            writeln!(f, "Ritual")?;
        }
        writeln!(
            f,
            "Casting time: {}, Range: {}, Duration: {}",
            self.cast_time, self.range, self.duration
        )?;
        if self.concentration {
            writeln!(f, "Concentration")?;
        }
        writeln!(f, "Components: {}", self.components)?;
        if let Some(material) = &self.material {
            writeln!(f, "Materials: {material}")?;
        }
        write!(f, "{}", self.description)
    }
}
