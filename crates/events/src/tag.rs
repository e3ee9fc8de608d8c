use serde::{Deserialize, Serialize};

/// Tag key for the debited account.
pub const SENDER: &str = "sender";
/// Tag key for the credited account.
pub const RECIPIENT: &str = "recipient";
/// Tag key for the account an asset peg was issued from.
pub const ISSUER: &str = "issuer";
/// Tag key for the account an asset peg was issued to.
///
/// The spelling is part of the emitted contract; downstream indexers match on it.
pub const ISSUE_RECIPIENT: &str = "recepient";

/// A key/value annotation describing one effect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered, append-only sequence of tags.
///
/// Composite operations concatenate the tags of their steps in call order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tags(Vec<Tag>);

impl Tags {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A tag set holding a single tag.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self(vec![Tag::new(key, value)])
    }

    pub fn append_tag(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push(Tag::new(key, value));
    }

    /// Concatenate `other` after `self`.
    pub fn append_tags(mut self, other: Tags) -> Tags {
        self.0.extend(other.0);
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.0.iter()
    }

    /// Values recorded under `key`, in order.
    pub fn values_of<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |t| t.key == key)
            .map(|t| t.value.as_str())
    }

    pub fn into_vec(self) -> Vec<Tag> {
        self.0
    }
}

impl FromIterator<Tag> for Tags {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Tags {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_tags_preserves_call_order() {
        let mut first = Tags::new(SENDER, "A");
        first.append_tag(SENDER, "C");
        let all = first.append_tags(Tags::new(RECIPIENT, "B"));

        let keys: Vec<_> = all.iter().map(|t| t.key.as_str()).collect();
        assert_eq!(keys, vec![SENDER, SENDER, RECIPIENT]);
        assert_eq!(all.values_of(SENDER).collect::<Vec<_>>(), vec!["A", "C"]);
    }

    #[test]
    fn serializes_as_list_of_pairs() {
        let tags = Tags::new(ISSUE_RECIPIENT, "B");
        let json = serde_json::to_value(&tags).unwrap();
        assert_eq!(json, serde_json::json!([{ "key": "recepient", "value": "B" }]));
    }
}
