use crate::kana::okuri_class;
use crate::numeric::numeric_key;

/// Lookup key for one conversion: the yomi stem and, for inflected words,
/// the okurigana typed after it.
///
/// `suffix` is text that ended the reading and is carried after the
/// converted word without taking part in the lookup (the `。` of `あい。`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    yomi: String,
    // Never Some(""): an empty tail means no okurigana.
    okuri: Option<String>,
    suffix: Option<String>,
}

impl CompositeKey {
    pub fn new(yomi: impl Into<String>, okuri: Option<String>) -> Self {
        Self {
            yomi: yomi.into(),
            okuri: okuri.filter(|o| !o.is_empty()),
            suffix: None,
        }
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        self.suffix = (!suffix.is_empty()).then_some(suffix);
        self
    }

    pub fn plain(yomi: impl Into<String>) -> Self {
        Self::new(yomi, None)
    }

    pub fn yomi(&self) -> &str {
        &self.yomi
    }

    pub fn okuri(&self) -> Option<&str> {
        self.okuri.as_deref()
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn has_okuri(&self) -> bool {
        self.okuri.is_some()
    }

    /// Digit runs of the stem, in order. They fill numeric placeholders.
    pub fn numbers(&self) -> Vec<String> {
        numeric_key(&self.yomi).1
    }

    /// Headword used in dictionaries: the stem with digit runs as `#`, plus
    /// the okurigana class letter when there is okurigana (`かんがe` for 考え).
    pub fn dict_key(&self) -> String {
        let (mut key, _) = numeric_key(&self.yomi);
        let class = self
            .okuri
            .as_deref()
            .and_then(|o| o.chars().next())
            .and_then(okuri_class);
        if let Some(c) = class {
            key.push(c);
        }
        key
    }
}
