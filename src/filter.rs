/// Case-insensitive substring keywords, kept in configured order.
///
/// An empty set matches every title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet(Vec<String>);

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            keywords
                .into_iter()
                .map(|k| k.as_ref().trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        )
    }

    /// Parse a comma-separated list such as `"openssl, Overflow ,,rce"`.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// First keyword (in configured order) contained in the title.
    pub fn first_match(&self, title: &str) -> Option<&str> {
        let folded = title.to_lowercase();
        self.0
            .iter()
            .find(|keyword| folded.contains(keyword.as_str()))
            .map(String::as_str)
    }

    pub fn matches(&self, title: &str) -> bool {
        self.is_empty() || self.first_match(title).is_some()
    }
}
