use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Whether the same label may sit on the wheel more than once.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    #[default]
    Allow,
    Reject,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrizeError {
    #[error("prize name cannot be empty")]
    EmptyLabel,
    #[error("\"{0}\" is already on the wheel")]
    Duplicate(Label),
    #[error("no prize at position {index} (the wheel has {len})")]
    OutOfRange { index: usize, len: usize },
}

pub fn default_labels() -> Vec<Label> {
    std::iter::repeat_n(Label::from("HELM GRIN"), 7)
        .chain(std::iter::repeat_n(Label::from("CAR AIR PURIFIER"), 3))
        .collect()
}

/// The ordered segment list. Order is the index-to-angle mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct PrizeList {
    labels: Vec<Label>,
    defaults: Vec<Label>,
    policy: DuplicatePolicy,
}

impl PrizeList {
    pub fn new(labels: Vec<Label>, defaults: Vec<Label>, policy: DuplicatePolicy) -> Self {
        Self {
            labels,
            defaults,
            policy,
        }
    }

    pub fn from_defaults(defaults: Vec<Label>, policy: DuplicatePolicy) -> Self {
        Self::new(defaults.clone(), defaults, policy)
    }

    pub fn current(&self) -> &[Label] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn set_defaults(&mut self, defaults: Vec<Label>) {
        self.defaults = defaults;
    }

    pub fn set_policy(&mut self, policy: DuplicatePolicy) {
        self.policy = policy;
    }

    pub fn add(&mut self, text: &str) -> Result<&Label, PrizeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(PrizeError::EmptyLabel);
        }

        let label = Label::new(text);
        if self.policy == DuplicatePolicy::Reject && self.labels.contains(&label) {
            return Err(PrizeError::Duplicate(label));
        }

        self.labels.push(label);
        Ok(&self.labels[self.labels.len() - 1])
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Label, PrizeError> {
        if index >= self.labels.len() {
            return Err(PrizeError::OutOfRange {
                index,
                len: self.labels.len(),
            });
        }
        let removed = self.labels.remove(index);
        Ok(removed)
    }

    /// Removes the first occurrence of `label`, returning where it was.
    pub fn remove_first(&mut self, label: &Label) -> Option<usize> {
        let index = self.labels.iter().position(|l| l == label)?;
        self.labels.remove(index);
        Some(index)
    }

    pub fn reset_to_defaults(&mut self) {
        self.labels = self.defaults.clone();
    }

    pub fn clear_all(&mut self) {
        self.labels.clear();
    }
}

impl Default for PrizeList {
    fn default() -> Self {
        Self::from_defaults(default_labels(), DuplicatePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<Label> {
        items.iter().copied().map(Label::from).collect()
    }

    #[test]
    fn test_defaults_match_shipped_list() {
        let defaults = default_labels();
        assert_eq!(defaults.len(), 10);
        assert_eq!(defaults.iter().filter(|l| l.as_str() == "HELM GRIN").count(), 7);
        assert_eq!(defaults[9].as_str(), "CAR AIR PURIFIER");
    }

    #[test]
    fn test_add_trims_and_rejects_blank() {
        let mut list = PrizeList::new(Vec::new(), Vec::new(), DuplicatePolicy::Allow);
        assert_eq!(list.add("   "), Err(PrizeError::EmptyLabel));
        assert_eq!(list.add("  Mug ").unwrap().as_str(), "Mug");
        assert_eq!(list.current(), labels(&["Mug"]).as_slice());
    }

    #[test]
    fn test_duplicate_policy() {
        let mut allow = PrizeList::new(labels(&["Mug"]), Vec::new(), DuplicatePolicy::Allow);
        assert!(allow.add("Mug").is_ok());
        assert_eq!(allow.len(), 2);

        let mut reject = PrizeList::new(labels(&["Mug"]), Vec::new(), DuplicatePolicy::Reject);
        assert_eq!(
            reject.add("Mug"),
            Err(PrizeError::Duplicate(Label::from("Mug")))
        );
        assert_eq!(reject.len(), 1);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut list = PrizeList::new(labels(&["A", "B"]), Vec::new(), DuplicatePolicy::Allow);
        assert_eq!(
            list.remove_at(2),
            Err(PrizeError::OutOfRange { index: 2, len: 2 })
        );
        assert_eq!(list.remove_at(0), Ok(Label::from("A")));
        assert_eq!(list.current(), labels(&["B"]).as_slice());
    }

    #[test]
    fn test_remove_first_takes_earliest_match() {
        let mut list = PrizeList::new(
            labels(&["A", "B", "A"]),
            Vec::new(),
            DuplicatePolicy::Allow,
        );
        assert_eq!(list.remove_first(&Label::from("A")), Some(0));
        assert_eq!(list.current(), labels(&["B", "A"]).as_slice());
        assert_eq!(list.remove_first(&Label::from("C")), None);
    }

    #[test]
    fn test_clear_then_reset_restores_defaults() {
        let mut list = PrizeList::default();
        list.add("Pen").unwrap();
        list.clear_all();
        assert!(list.is_empty());
        list.reset_to_defaults();
        assert_eq!(list.current(), default_labels().as_slice());
    }

    #[test]
    fn test_failed_mutation_leaves_list_untouched() {
        let mut list = PrizeList::default();
        let _ = list.add("");
        let _ = list.remove_at(99);
        let _ = list.remove_first(&Label::from("nope"));
        assert_eq!(list.current(), default_labels().as_slice());
    }

    #[test]
    fn test_policy_deserialization() {
        let cases = vec![
            ("\"allow\"", DuplicatePolicy::Allow),
            ("\"Allow\"", DuplicatePolicy::Allow),
            ("\"REJECT\"", DuplicatePolicy::Reject),
        ];

        for (json, expected) in cases {
            let deserialized: DuplicatePolicy = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }
}
