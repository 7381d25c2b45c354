//! Immutable catalog of every body the system can ever contain.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a body moves: around the system center or around another body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Orbit {
    /// Circular orbit around the system center.
    Primary {
        /// Distance from the center (canvas pixels)
        orbital_radius: f64,
        /// Radians per tick
        angular_speed: f64,
    },
    /// Circular orbit around a primary orbiter's current position.
    Dependent {
        /// Name of the catalog entry this body circles
        primary: String,
        /// Distance from the primary (canvas pixels)
        radius: f64,
        /// Radians per tick
        angular_speed: f64,
    },
}

/// Template for a body. Live bodies are value copies of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub name: String,
    /// Display color, passed through untouched to the draw surface
    pub color: String,
    /// Display radius (canvas pixels)
    pub size: f64,
    pub orbit: Orbit,
}

impl CatalogEntry {
    pub fn primary(
        name: &str,
        color: &str,
        size: f64,
        orbital_radius: f64,
        angular_speed: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            size,
            orbit: Orbit::Primary {
                orbital_radius,
                angular_speed,
            },
        }
    }

    pub fn dependent(
        name: &str,
        color: &str,
        size: f64,
        primary: &str,
        radius: f64,
        angular_speed: f64,
    ) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            size,
            orbit: Orbit::Dependent {
                primary: primary.to_string(),
                radius,
                angular_speed,
            },
        }
    }

    /// Name of the body this one circles, if it is a dependent orbiter.
    pub fn primary_name(&self) -> Option<&str> {
        match &self.orbit {
            Orbit::Primary { .. } => None,
            Orbit::Dependent { primary, .. } => Some(primary),
        }
    }

    pub fn is_primary(&self) -> bool {
        matches!(self.orbit, Orbit::Primary { .. })
    }

    pub fn angular_speed(&self) -> f64 {
        match self.orbit {
            Orbit::Primary { angular_speed, .. } | Orbit::Dependent { angular_speed, .. } => {
                angular_speed
            }
        }
    }
}

/// Reasons a set of entries cannot form a catalog
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("duplicate body name: {0}")]
    Duplicate(String),

    #[error("body {name} has invalid size {size}")]
    InvalidSize { name: String, size: f64 },

    #[error("body {name} has invalid orbit radius {radius}")]
    InvalidRadius { name: String, radius: f64 },

    #[error("body {name} has non-finite angular speed")]
    InvalidSpeed { name: String },

    #[error("body {name} orbits unknown body {primary}")]
    UnknownPrimary { name: String, primary: String },

    #[error("body {name} orbits {primary}, which is not a primary orbiter")]
    NestedDependent { name: String, primary: String },
}

/// Ordered, validated, read-only list of catalog entries.
///
/// Order is canonical: the live set is always kept sorted by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CatalogEntry>", into = "Vec<CatalogEntry>")]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        validate(&entries)?;
        Ok(Self { entries })
    }

    /// The built-in system: eight planets and Earth's Moon.
    pub fn solar_system() -> Self {
        let entries = vec![
            CatalogEntry::primary("Mercury", "#808080", 4.0, 50.0, 0.02),
            CatalogEntry::primary("Venus", "#FFA500", 7.0, 80.0, 0.015),
            CatalogEntry::primary("Earth", "#0000FF", 8.0, 120.0, 0.01),
            CatalogEntry::dependent("Moon", "#D3D3D3", 3.0, "Earth", 20.0, 0.08),
            CatalogEntry::primary("Mars", "#FF0000", 5.0, 160.0, 0.008),
            CatalogEntry::primary("Jupiter", "#A52A2A", 15.0, 220.0, 0.005),
            CatalogEntry::primary("Saturn", "#FFD700", 12.0, 280.0, 0.004),
            CatalogEntry::primary("Uranus", "#ADD8E6", 10.0, 330.0, 0.003),
            CatalogEntry::primary("Neptune", "#00008B", 9.0, 380.0, 0.002),
        ];
        debug_assert!(validate(&entries).is_ok());
        Self { entries }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Canonical position of `name`, if it is in the catalog.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Catalog indices of every entry orbiting `primary`, in catalog order.
    pub fn dependent_indices(&self, primary: &str) -> Vec<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.primary_name() == Some(primary))
            .map(|(index, _)| index)
            .collect()
    }

    /// Entries that orbit the center and therefore get their own control.
    pub fn primaries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter().filter(|entry| entry.is_primary())
    }
}

impl TryFrom<Vec<CatalogEntry>> for Catalog {
    type Error = CatalogError;

    fn try_from(entries: Vec<CatalogEntry>) -> Result<Self, Self::Error> {
        Self::new(entries)
    }
}

impl From<Catalog> for Vec<CatalogEntry> {
    fn from(catalog: Catalog) -> Self {
        catalog.entries
    }
}

fn validate(entries: &[CatalogEntry]) -> Result<(), CatalogError> {
    for (index, entry) in entries.iter().enumerate() {
        if entries[..index].iter().any(|other| other.name == entry.name) {
            return Err(CatalogError::Duplicate(entry.name.clone()));
        }
        if !(entry.size.is_finite() && entry.size > 0.0) {
            return Err(CatalogError::InvalidSize {
                name: entry.name.clone(),
                size: entry.size,
            });
        }
        if !entry.angular_speed().is_finite() {
            return Err(CatalogError::InvalidSpeed {
                name: entry.name.clone(),
            });
        }

        let radius = match &entry.orbit {
            Orbit::Primary { orbital_radius, .. } => *orbital_radius,
            Orbit::Dependent { primary, radius, .. } => {
                let Some(target) = entries.iter().find(|other| &other.name == primary) else {
                    return Err(CatalogError::UnknownPrimary {
                        name: entry.name.clone(),
                        primary: primary.clone(),
                    });
                };
                if !target.is_primary() {
                    return Err(CatalogError::NestedDependent {
                        name: entry.name.clone(),
                        primary: primary.clone(),
                    });
                }
                *radius
            }
        };
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(CatalogError::InvalidRadius {
                name: entry.name.clone(),
                radius,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solar_system_is_valid() {
        let catalog = Catalog::solar_system();
        assert!(Catalog::new(catalog.entries().to_vec()).is_ok());
        assert_eq!(catalog.len(), 9);
        assert_eq!(catalog.index_of("Earth"), Some(2));
        assert_eq!(catalog.index_of("Moon"), Some(3));
        assert_eq!(catalog.index_of("Pluto"), None);
    }

    #[test]
    fn test_primaries_exclude_dependents() {
        let catalog = Catalog::solar_system();
        let names: Vec<&str> = catalog.primaries().map(|e| e.name.as_str()).collect();
        assert_eq!(names.len(), 8);
        assert!(!names.contains(&"Moon"));
        assert_eq!(names[0], "Mercury");
    }

    #[test]
    fn test_dependent_indices() {
        let catalog = Catalog::solar_system();
        assert_eq!(catalog.dependent_indices("Earth"), vec![3]);
        assert!(catalog.dependent_indices("Mars").is_empty());
        assert_eq!(catalog.get("Moon").unwrap().primary_name(), Some("Earth"));
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = Catalog::new(vec![
            CatalogEntry::primary("A", "#fff", 1.0, 10.0, 0.1),
            CatalogEntry::primary("A", "#000", 2.0, 20.0, 0.1),
        ]);
        assert_eq!(result, Err(CatalogError::Duplicate("A".to_string())));
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let zero_size = Catalog::new(vec![CatalogEntry::primary("A", "#fff", 0.0, 10.0, 0.1)]);
        assert!(matches!(zero_size, Err(CatalogError::InvalidSize { .. })));

        let negative_radius =
            Catalog::new(vec![CatalogEntry::primary("A", "#fff", 1.0, -1.0, 0.1)]);
        assert!(matches!(negative_radius, Err(CatalogError::InvalidRadius { .. })));

        let nan_speed =
            Catalog::new(vec![CatalogEntry::primary("A", "#fff", 1.0, 1.0, f64::NAN)]);
        assert!(matches!(nan_speed, Err(CatalogError::InvalidSpeed { .. })));

        // Negative and large speeds are allowed.
        assert!(Catalog::new(vec![CatalogEntry::primary("A", "#fff", 1.0, 0.0, -7.5)]).is_ok());
    }

    #[test]
    fn test_rejects_bad_primary_references() {
        let unknown = Catalog::new(vec![CatalogEntry::dependent(
            "M", "#fff", 1.0, "Nowhere", 5.0, 0.1,
        )]);
        assert!(matches!(unknown, Err(CatalogError::UnknownPrimary { .. })));

        let nested = Catalog::new(vec![
            CatalogEntry::primary("B", "#fff", 1.0, 80.0, 0.1),
            CatalogEntry::dependent("M", "#fff", 1.0, "B", 10.0, 0.1),
            CatalogEntry::dependent("N", "#fff", 1.0, "M", 2.0, 0.1),
        ]);
        assert!(matches!(nested, Err(CatalogError::NestedDependent { .. })));
    }

    #[test]
    fn test_json_round_trip_validates() {
        let json = r##"[
            {"name": "A", "color": "#aaa", "size": 2.0,
             "orbit": {"kind": "primary", "orbital_radius": 50.0, "angular_speed": 0.02}},
            {"name": "M", "color": "#ccc", "size": 1.0,
             "orbit": {"kind": "dependent", "primary": "A", "radius": 10.0, "angular_speed": 0.08}}
        ]"##;
        let catalog: Catalog = serde_json::from_str(json).expect("valid catalog");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("M").unwrap().primary_name(), Some("A"));

        let bad = r##"[
            {"name": "M", "color": "#ccc", "size": 1.0,
             "orbit": {"kind": "dependent", "primary": "A", "radius": 10.0, "angular_speed": 0.08}}
        ]"##;
        assert!(serde_json::from_str::<Catalog>(bad).is_err());
    }
}
