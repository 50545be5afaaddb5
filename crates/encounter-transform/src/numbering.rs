//! Run-local patient numbering.

use std::collections::HashMap;

/// Dense 1-based patient numbers in order of first appearance.
///
/// Built once per transform run; numbers are not stable across runs with a
/// different row order.
#[derive(Debug, Clone, Default)]
pub struct PatientNumbering {
    numbers: HashMap<String, u32>,
}

impl PatientNumbering {
    /// Number the distinct non-null identifiers of a patient id column.
    ///
    /// # Examples
    ///
    /// ```
    /// use encounter_transform::PatientNumbering;
    ///
    /// let ids = ["B", "A", "B", "C"].map(|id| Some(id.to_string()));
    /// let numbering = PatientNumbering::from_ids(&ids);
    /// assert_eq!(numbering.get("B"), Some(1));
    /// assert_eq!(numbering.get("A"), Some(2));
    /// assert_eq!(numbering.get("C"), Some(3));
    /// ```
    pub fn from_ids(ids: &[Option<String>]) -> Self {
        let mut numbering = Self::default();
        for id in ids.iter().flatten() {
            if numbering.numbers.contains_key(id) {
                continue;
            }
            // Dense by construction: the next number is the count so far plus one.
            let next = numbering.numbers.len() as u32 + 1;
            numbering.numbers.insert(id.clone(), next);
        }
        numbering
    }

    /// Number assigned to a patient identifier.
    pub fn get(&self, id: &str) -> Option<u32> {
        self.numbers.get(id).copied()
    }

    /// Number of distinct patients.
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[Option<&str>]) -> Vec<Option<String>> {
        values.iter().map(|v| v.map(str::to_string)).collect()
    }

    #[test]
    fn test_first_appearance_order() {
        let numbering = PatientNumbering::from_ids(&ids(&[
            Some("B"),
            Some("A"),
            Some("B"),
            Some("C"),
        ]));
        assert_eq!(numbering.len(), 3);
        assert_eq!(numbering.get("B"), Some(1));
        assert_eq!(numbering.get("A"), Some(2));
        assert_eq!(numbering.get("C"), Some(3));
    }

    #[test]
    fn test_null_ids_are_skipped() {
        let numbering = PatientNumbering::from_ids(&ids(&[None, Some("A"), None, Some("B")]));
        assert_eq!(numbering.len(), 2);
        assert_eq!(numbering.get("A"), Some(1));
        assert_eq!(numbering.get("B"), Some(2));
    }

    #[test]
    fn test_unknown_id() {
        let numbering = PatientNumbering::from_ids(&ids(&[Some("A")]));
        assert_eq!(numbering.get("Z"), None);
    }

    #[test]
    fn test_empty() {
        let numbering = PatientNumbering::from_ids(&[]);
        assert!(numbering.is_empty());
        assert_eq!(numbering.len(), 0);
    }
}
