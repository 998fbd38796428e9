use super::canonical::canonicalize;
use crate::errors::ConfigError;
use crate::types::Issue;

/// Canonicalized message prefixes whose issues are never reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreList {
    entries: Vec<String>,
}

impl IgnoreList {
    /// Canonicalizes every entry. An entry that canonicalizes to the empty
    /// string would match every message and is rejected.
    pub fn new<I, S>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut canonical = Vec::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let entry = canonicalize(entry.as_ref());
            if entry.is_empty() {
                return Err(ConfigError::EmptyIgnoreEntry(index));
            }
            if !canonical.contains(&entry) {
                canonical.push(entry);
            }
        }
        Ok(Self { entries: canonical })
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry matching `message`, if any.
    pub fn matching_entry(&self, message: &str) -> Option<&str> {
        let message = canonicalize(message);
        self.entries
            .iter()
            .find(|entry| message.starts_with(entry.as_str()))
            .map(String::as_str)
    }
}

/// Removes issues whose canonical message starts with an ignore entry.
pub fn filter_ignorable(issues: Vec<Issue>, ignore_list: &IgnoreList) -> Vec<Issue> {
    if ignore_list.is_empty() {
        return issues;
    }

    issues
        .into_iter()
        .filter(|issue| match ignore_list.matching_entry(&issue.message) {
            Some(entry) => {
                tracing::debug!(
                    line = issue.line,
                    message = %issue.message,
                    ignore_entry = entry,
                    "Ignoring issue matched by ignore list"
                );
                false
            }
            None => true,
        })
        .collect()
}
