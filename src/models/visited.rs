use std::collections::HashSet;

/// Titles already processed on one UTC day.
///
/// Membership is an exact, case-sensitive comparison of the title text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitedSet(HashSet<String>);

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from a newline-delimited record, ignoring blank lines.
    pub fn from_record(content: &str) -> Self {
        content
            .lines()
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.0.contains(title)
    }

    /// Returns false if the title was already present.
    pub fn insert(&mut self, title: impl Into<String>) -> bool {
        self.0.insert(title.into())
    }

    pub fn merge(&mut self, other: VisitedSet) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl FromIterator<String> for VisitedSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
