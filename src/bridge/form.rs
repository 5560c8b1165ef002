//! Submitted form fields and the parsers the bridge applies to them.

use crate::option::MAX_TAGS;

/// Ordered form fields; a name may repeat (`tags[]`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// First value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `name`, in submission order.
    pub fn get_all(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

fn int_field(form: &FormData, name: &str) -> i64 {
    form.get(name)
        .and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(0)
}

/// `hours * 60 + minutes` as a duration ceiling. Zero, negative or
/// unparseable input means unconstrained.
pub fn parse_time_constraint(form: &FormData) -> Option<u16> {
    let total = int_field(form, "hours")
        .saturating_mul(60)
        .saturating_add(int_field(form, "minutes"));
    if total > 0 {
        Some(total.min(i64::from(u16::MAX)) as u16)
    } else {
        None
    }
}

/// Tags from a comma-separated `tags` field, falling back to repeated
/// `tags[]` fields when that is absent or blank.
pub fn parse_tags(form: &FormData) -> Vec<String> {
    match form.get("tags").filter(|t| !t.trim().is_empty()) {
        Some(joined) => joined
            .split(',')
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .take(MAX_TAGS)
            .collect(),
        None => form
            .get_all("tags[]")
            .into_iter()
            .map(|tag| tag.trim().to_lowercase())
            .filter(|tag| !tag.is_empty())
            .collect(),
    }
}
