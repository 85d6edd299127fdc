//! Operator-supplied manual terms.

/// Insertion-ordered set of literal terms.
///
/// Terms are trimmed on insertion. Empty terms and exact duplicates are
/// rejected without error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualTermSet {
    terms: Vec<String>,
}

impl ManualTermSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a term. Returns the stored (trimmed) term if it was inserted.
    pub fn insert(&mut self, term: &str) -> Option<&str> {
        let term = term.trim();
        if term.is_empty() || self.contains(term) {
            return None;
        }
        self.terms.push(term.to_string());
        self.terms.last().map(String::as_str)
    }

    /// Removes a term by exact value.
    pub fn remove(&mut self, term: &str) -> bool {
        match self.terms.iter().position(|t| t == term) {
            Some(index) => {
                self.terms.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
