use std::collections::HashMap;

pub const LOGIN_URI_FIELD: &str = "login_uri";
pub const NAME_FIELD: &str = "name";
pub const FOLDER_FIELD: &str = "folder";

/// One row of the input table, keyed by column name in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    fields: Vec<(String, String)>,
}

impl Entry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == field)
            .map(|(_, value)| value.as_str())
    }

    /// Missing fields read as empty.
    pub fn get_or_empty(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    pub fn login_uri(&self) -> &str {
        self.get_or_empty(LOGIN_URI_FIELD)
    }

    pub fn name(&self) -> &str {
        self.get_or_empty(NAME_FIELD)
    }

    pub fn folder(&self) -> Option<&str> {
        self.get(FOLDER_FIELD)
    }

    /// Overwrites in place when the field exists, appends otherwise.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == field) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Field mapping with `folder` removed, used for integrity comparisons.
    pub fn without_folder(&self) -> HashMap<&str, &str> {
        self.fields()
            .filter(|(key, _)| *key != FOLDER_FIELD)
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Entry
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entry = Entry::new();
        for (key, value) in iter {
            entry.set(key, value);
        }
        entry
    }
}

/// Parsed CSV: ordered header plus rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub entries: Vec<Entry>,
}

impl Table {
    pub fn new(headers: Vec<String>, entries: Vec<Entry>) -> Self {
        Self { headers, entries }
    }

    /// Header for the categorized output: `folder` appended unless already present.
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        if !headers.iter().any(|header| header == FOLDER_FIELD) {
            headers.push(FOLDER_FIELD.to_string());
        }
        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_overwrites_existing_field_in_place() {
        let mut entry: Entry = [("name", "Bank"), ("folder", "Old"), ("notes", "x")]
            .into_iter()
            .collect();
        entry.set(FOLDER_FIELD, "Finance");

        let keys: Vec<&str> = entry.fields().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["name", "folder", "notes"]);
        assert_eq!(entry.folder(), Some("Finance"));
    }

    #[test]
    fn missing_fields_read_as_empty() {
        let entry: Entry = [("notes", "hello")].into_iter().collect();
        assert_eq!(entry.login_uri(), "");
        assert_eq!(entry.name(), "");
        assert_eq!(entry.folder(), None);
    }

    #[test]
    fn without_folder_drops_only_folder() {
        let entry: Entry = [("name", "Bank"), ("folder", "Finance")]
            .into_iter()
            .collect();
        let view = entry.without_folder();
        assert_eq!(view.len(), 1);
        assert_eq!(view.get("name"), Some(&"Bank"));
    }

    #[test]
    fn output_headers_append_folder_once() {
        let table = Table::new(vec!["name".into(), "login_uri".into()], Vec::new());
        assert_eq!(table.output_headers(), vec!["name", "login_uri", "folder"]);

        let table = Table::new(vec!["folder".into(), "name".into()], Vec::new());
        assert_eq!(table.output_headers(), vec!["folder", "name"]);
    }
}
