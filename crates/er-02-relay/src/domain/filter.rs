//! Forbidden-method filter.
//!
//! The check is plain text containment over the whole request body, not a
//! comparison against the parsed `method` field. A forbidden name that shows
//! up anywhere in the body, parameters included, blocks the request.

/// Set of forbidden method names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodFilter {
    forbidden: Vec<String>,
}

impl MethodFilter {
    pub fn new(forbidden: Vec<String>) -> Self {
        Self { forbidden }
    }

    pub fn forbidden(&self) -> &[String] {
        &self.forbidden
    }

    /// First forbidden entry found in `request`, if any.
    pub fn matched<'a>(&'a self, request: &[u8]) -> Option<&'a str> {
        if self.forbidden.is_empty() {
            return None;
        }
        let text = String::from_utf8_lossy(request);
        self.forbidden
            .iter()
            .find(|name| text.contains(name.as_str()))
            .map(String::as_str)
    }

    /// True unless some forbidden entry occurs in `request`.
    pub fn allows(&self, request: &[u8]) -> bool {
        self.matched(request).is_none()
    }
}
