use std::collections::HashSet;

/// Field names whose string values get replaced in JSON bodies.
///
/// Names are matched case-insensitively; they are lowercased once here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedactionSpec {
    fields: HashSet<String>,
    traverse_arrays: bool,
}

impl RedactionSpec {
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|f| f.as_ref().to_lowercase())
                .collect(),
            traverse_arrays: false,
        }
    }

    /// Also visit objects nested inside arrays. Off by default: only object
    /// members are descended into.
    pub fn with_array_traversal(mut self, enabled: bool) -> Self {
        self.traverse_arrays = enabled;
        self
    }

    pub fn traverses_arrays(&self) -> bool {
        self.traverse_arrays
    }

    pub fn matches(&self, name: &str) -> bool {
        !self.fields.is_empty() && self.fields.contains(&name.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
