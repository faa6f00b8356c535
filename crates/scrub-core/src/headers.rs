//! Ordered, multi-valued header list

use serde::{Deserialize, Serialize};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const CONTENT_LENGTH: &str = "Content-Length";
pub const CONTENT_DISPOSITION: &str = "Content-Disposition";

/// Header list that keeps insertion order and duplicate names.
///
/// Name lookups are case-insensitive; the original spelling is kept for output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value, keeping any existing values for the same name
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Replace every value for `name` with a single value
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.remove(&name);
        self.0.push((name, value.into()));
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.append(name, value);
        self
    }

    /// First value for `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All values for `name`, in order
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.0
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }

    /// Remove every value for `name`, returning how many were dropped
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.0.len();
        self.0.retain(|(n, _)| !n.eq_ignore_ascii_case(name));
        before - self.0.len()
    }

    /// Copy every header of `source` onto `self`.
    ///
    /// Last write wins per name: a name already present on `self` has all its
    /// values replaced by the source's values. Copying twice is the same as
    /// copying once.
    pub fn copy_from(&mut self, source: &Headers) {
        let mut seen: Vec<&str> = Vec::new();
        for (name, _) in &source.0 {
            if seen.iter().any(|s| s.eq_ignore_ascii_case(name)) {
                continue;
            }
            seen.push(name);
            self.remove(name);
            for value in source.get_all(name) {
                self.0.push((name.clone(), value.to_string()));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> Headers {
        Headers::new()
            .with("Authorization", "Bearer 123")
            .with("Accept", "application/json")
            .with("Accept", "text/plain")
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let headers = source();
        assert_eq!(headers.get("authorization"), Some("Bearer 123"));
        assert!(headers.contains("ACCEPT"));
        assert_eq!(headers.get_all("accept").count(), 2);
    }

    #[test]
    fn test_copy_replaces_existing() {
        let mut dest = Headers::new()
            .with("authorization", "Basic old")
            .with("Host", "api.example.com");
        dest.copy_from(&source());

        assert_eq!(dest.get_all("Authorization").collect::<Vec<_>>(), vec!["Bearer 123"]);
        assert_eq!(dest.get("Host"), Some("api.example.com"));
        assert_eq!(
            dest.get_all("Accept").collect::<Vec<_>>(),
            vec!["application/json", "text/plain"]
        );
    }

    #[test]
    fn test_copy_is_idempotent() {
        let mut once = Headers::new().with("Host", "api.example.com");
        once.copy_from(&source());

        let mut twice = once.clone();
        twice.copy_from(&source());

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 4);
    }

    #[test]
    fn test_set_and_remove() {
        let mut headers = source();
        headers.set("accept", "*/*");
        assert_eq!(headers.get_all("Accept").collect::<Vec<_>>(), vec!["*/*"]);
        assert_eq!(headers.remove("ACCEPT"), 1);
        assert!(!headers.contains("Accept"));
    }
}
