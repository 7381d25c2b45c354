//! Mutable runtime copy of a catalog entry

use crate::bodies::catalog::CatalogEntry;

/// A body in the live set. Inactive bodies stay in the set but neither
/// move nor draw.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveBody {
    entry: CatalogEntry,
    phase: f64,
    active: bool,
}

impl From<&CatalogEntry> for LiveBody {
    fn from(entry: &CatalogEntry) -> Self {
        Self {
            entry: entry.clone(),
            phase: 0.0,
            active: true,
        }
    }
}

impl LiveBody {
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn entry(&self) -> &CatalogEntry {
        &self.entry
    }

    /// Current orbital angle in radians
    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub(crate) fn advance(&mut self) {
        self.phase += self.entry.angular_speed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_copy_starts_active_at_zero() {
        let entry = CatalogEntry::primary("A", "#fff", 2.0, 50.0, 0.02);
        let body = LiveBody::from(&entry);
        assert!(body.is_active());
        assert_eq!(body.phase(), 0.0);
        assert_eq!(body.entry(), &entry);
    }

    #[test]
    fn test_advance_uses_own_speed() {
        let entry = CatalogEntry::dependent("M", "#fff", 1.0, "B", 10.0, 0.08);
        let mut body = LiveBody::from(&entry);
        body.advance();
        body.advance();
        assert!((body.phase() - 0.16).abs() < 1e-12);
    }
}
