//! Most-recently-touched region tracking shared by the map and bar chart.
//!
//! The sequence keeps up to three regions in click order. Only the last two
//! are highlighted; the third slot remembers the region most recently pushed
//! out of the highlight pair.

use serde::{Deserialize, Serialize};

pub const SELECTION_CAPACITY: usize = 3;
pub const HIGHLIGHT_COUNT: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionSelection {
    regions: Vec<String>,
}

impl RegionSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, region: &str) {
        let present = self.contains(region);

        if present && self.regions.len() <= 1 {
            self.regions = vec![region.to_string()];
        } else if present {
            // A second activation of a highlighted region is ignored; re-clicking
            // never deselects.
        } else if self.regions.len() < SELECTION_CAPACITY {
            self.regions.push(region.to_string());
        } else {
            self.regions.remove(0);
            self.regions.push(region.to_string());
        }
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    /// Last `min(2, len)` regions, oldest first.
    pub fn highlighted(&self) -> &[String] {
        let start = self.regions.len().saturating_sub(HIGHLIGHT_COUNT);
        &self.regions[start..]
    }

    pub fn is_highlighted(&self, region: &str) -> bool {
        self.highlighted().iter().any(|r| r == region)
    }

    pub fn contains(&self, region: &str) -> bool {
        self.regions.iter().any(|r| r == region)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(selection: &RegionSelection) -> Vec<&str> {
        selection.as_slice().iter().map(String::as_str).collect()
    }

    #[test]
    fn window_slides_after_three() {
        let mut sel = RegionSelection::new();
        sel.select("A");
        assert_eq!(names(&sel), ["A"]);
        sel.select("B");
        assert_eq!(names(&sel), ["A", "B"]);
        sel.select("C");
        assert_eq!(names(&sel), ["A", "B", "C"]);
        sel.select("D");
        assert_eq!(names(&sel), ["B", "C", "D"]);
        assert_eq!(sel.highlighted(), ["C", "D"]);
    }

    #[test]
    fn reclick_of_present_region_is_ignored() {
        let mut sel = RegionSelection::new();
        for r in ["B", "C", "D"] {
            sel.select(r);
        }
        sel.select("C");
        assert_eq!(names(&sel), ["B", "C", "D"]);

        let mut pair = RegionSelection::new();
        pair.select("A");
        pair.select("B");
        pair.select("A");
        assert_eq!(names(&pair), ["A", "B"]);
    }

    #[test]
    fn single_selection_rearms_to_itself() {
        let mut sel = RegionSelection::new();
        sel.select("D");
        sel.select("D");
        assert_eq!(names(&sel), ["D"]);
    }

    #[test]
    fn highlighted_tracks_short_sequences() {
        let mut sel = RegionSelection::new();
        assert!(sel.highlighted().is_empty());
        sel.select("A");
        assert_eq!(sel.highlighted(), ["A"]);
        assert!(sel.is_highlighted("A"));
        sel.select("B");
        sel.select("C");
        assert!(!sel.is_highlighted("A"));
        assert!(sel.contains("A"));
    }
}
