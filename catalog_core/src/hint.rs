use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Which hint categories an element belongs to (§2 "Hint").
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct HintCategory: u32 {
        const FILE = 1 << 0;
        const HEAP = 1 << 1;
        const NON_TRUNCATE = 1 << 2;
        const UNIQUE = 1 << 3;
        const PARTIAL_IMPORT = 1 << 4;
    }
}

/// A single hint element: a keyword, optionally with one or more values
/// (`hint='a', 'b'` style), carrying the category bitmap it contributes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HintElement {
    pub keyword: String,
    pub values: Vec<String>,
    pub category: HintCategory,
}

impl HintElement {
    pub fn new(keyword: impl Into<String>, category: HintCategory) -> Self {
        Self {
            keyword: keyword.into(),
            values: Vec::new(),
            category,
        }
    }

    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = values;
        self
    }

    fn to_sql_statement(&self) -> String {
        if self.values.is_empty() {
            self.keyword.clone()
        } else {
            let joined = self
                .values
                .iter()
                .map(|v| format!("'{}'", v.replace('\'', "''")))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}={}", self.keyword, joined)
        }
    }
}

/// A parsed, typed hint tree attached to a File, Column, or Index (§2).
///
/// Hints preserve the element order they were parsed in so
/// `to_sql_statement` round-trips exactly (§8 round-trip law).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hint {
    elements: Vec<HintElement>,
}

impl Hint {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, element: HintElement) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[HintElement] {
        &self.elements
    }

    /// Bitwise-OR of every element's category, used by drivers to check
    /// "does this hint carry the UNIQUE bit" without scanning elements.
    pub fn category_bitmap(&self) -> HintCategory {
        self.elements
            .iter()
            .fold(HintCategory::empty(), |acc, e| acc | e.category)
    }

    pub fn has_category(&self, category: HintCategory) -> bool {
        self.category_bitmap().contains(category)
    }

    pub fn find(&self, keyword: &str) -> Option<&HintElement> {
        self.elements.iter().find(|e| e.keyword == keyword)
    }

    pub fn to_sql_statement(&self) -> String {
        if self.elements.is_empty() {
            return String::new();
        }
        let body = self
            .elements
            .iter()
            .map(HintElement::to_sql_statement)
            .collect::<Vec<_>>()
            .join(" ");
        format!("hint '{}'", body)
    }

    /// Parse a hint body produced by `to_sql_statement` (minus the
    /// `hint '...'` wrapper) back into a typed tree. A production parser
    /// would reuse the SQL lexer; this recognizes the flat
    /// `keyword[=v1,v2] ...` grammar `to_sql_statement` emits, which is
    /// sufficient for the round-trip law in §8.
    pub fn parse(body: &str, category_of: impl Fn(&str) -> HintCategory) -> Self {
        let mut hint = Hint::new();
        for token in body.split_whitespace() {
            let (keyword, values) = match token.split_once('=') {
                Some((k, v)) => (
                    k,
                    v.split(',')
                        .map(|s| s.trim().trim_matches('\'').replace("''", "'"))
                        .collect(),
                ),
                None => (token, Vec::new()),
            };
            let category = category_of(keyword);
            hint.push(HintElement::new(keyword, category).with_values(values));
        }
        hint
    }
}
