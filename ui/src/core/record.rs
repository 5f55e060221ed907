//! Parsed survey rows and the immutable store that holds them for a session.

use std::fmt;
use std::rc::Rc;

/// Filter dimensions in cascade order. Each dimension's option list is
/// conditioned on every dimension before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Dimension {
    Year,
    Category,
    Topic,
    Question,
    Response,
}

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Year,
        Dimension::Category,
        Dimension::Topic,
        Dimension::Question,
        Dimension::Response,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Placeholder label shown in the unset option of a selector.
    pub fn label(self) -> &'static str {
        match self {
            Dimension::Year => "Year",
            Dimension::Category => "Class",
            Dimension::Topic => "Topic",
            Dimension::Question => "Question",
            Dimension::Response => "Response",
        }
    }

    /// Dimensions strictly above this one, in order.
    pub fn upstream(self) -> &'static [Dimension] {
        &Self::ALL[..self.index()]
    }

    /// Dimensions strictly below this one, in order.
    pub fn downstream(self) -> &'static [Dimension] {
        &Self::ALL[self.index() + 1..]
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the survey dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub year: String,
    pub category: String,
    pub topic: String,
    pub question: String,
    pub response: String,
    pub region: String,
    pub value: f64,
    pub sample_size: Option<f64>,
    pub ci_low: Option<f64>,
    pub ci_high: Option<f64>,
}

impl Record {
    pub fn field(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Year => &self.year,
            Dimension::Category => &self.category,
            Dimension::Topic => &self.topic,
            Dimension::Question => &self.question,
            Dimension::Response => &self.response,
        }
    }
}

/// Shared, read-only handle to the loaded rows.
///
/// Cloning is cheap. Two handles compare equal only when they point at the
/// same allocation, which makes the store usable as a memo key without
/// comparing every row.
#[derive(Clone)]
pub struct RowStore {
    rows: Rc<[Record]>,
}

impl RowStore {
    pub fn empty() -> Self {
        Self {
            rows: Rc::from(Vec::new()),
        }
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            rows: Rc::from(records),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.rows.iter()
    }

    pub fn records(&self) -> &[Record] {
        &self.rows
    }
}

impl Default for RowStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for RowStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.rows, &other.rows)
    }
}

impl fmt::Debug for RowStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowStore").field("rows", &self.rows.len()).finish()
    }
}

impl<'a> IntoIterator for &'a RowStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn dimension_neighbours_follow_cascade_order() {
        assert!(Dimension::Year.upstream().is_empty());
        assert_eq!(
            Dimension::Topic.upstream(),
            &[Dimension::Year, Dimension::Category]
        );
        assert_eq!(
            Dimension::Topic.downstream(),
            &[Dimension::Question, Dimension::Response]
        );
        assert!(Dimension::Response.downstream().is_empty());
    }

    #[test]
    fn store_equality_is_identity() {
        let a = RowStore::from_records(vec![record("2020", "Ohio", 1.0)]);
        let b = RowStore::from_records(vec![record("2020", "Ohio", 1.0)]);
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }
}
