use sgp4::{Constants, Elements};

use super::error::ElementSetError;

/// A validated two-line element record. Never modified once built; the
/// tracker holding it only reads from it.
#[derive(Debug)]
pub struct ElementSet {
    pub name: Option<String>,
    pub catalog_id: u32,
    pub line1: String,
    pub line2: String,
    elements: Elements,
}

impl ElementSet {
    pub fn from_lines(
        name: Option<String>,
        line1: &str,
        line2: &str,
    ) -> Result<Self, ElementSetError> {
        let line1 = line1.trim();
        let line2 = line2.trim();
        let elements = Elements::from_tle(name.clone(), line1.as_bytes(), line2.as_bytes())?;
        // Reject records SGP4 cannot initialise before anyone propagates them.
        Constants::from_elements(&elements)?;

        Ok(Self {
            name: name.or_else(|| elements.object_name.clone()),
            catalog_id: elements.norad_id as u32,
            line1: line1.to_string(),
            line2: line2.to_string(),
            elements,
        })
    }

    pub fn elements(&self) -> &Elements {
        &self.elements
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("NORAD {}", self.catalog_id))
    }
}
