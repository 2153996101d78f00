use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::{debug, trace};

use super::{Candidate, CompositeKey, DictEntry, DictError, Dictionary, SearchResult};

/// An ordered list of sources queried as one.
///
/// Earlier layers have priority: their candidates come first, later layers
/// only contribute surfaces not already seen. Registrations go to the first
/// writable layer.
#[derive(Debug, Clone, Default)]
pub struct CompositeDictionary {
    layers: Vec<Arc<dyn Dictionary>>,
}

/// Keep the first occurrence of each surface, preserving order.
fn dedup_entries(entries: Vec<DictEntry>) -> Vec<DictEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.surface.clone()))
        .collect()
}

/// `かんがe`: kana followed by a single okurigana class letter.
fn is_okuri_headword(reading: &str) -> bool {
    let mut rev = reading.chars().rev();
    matches!(
        (rev.next(), rev.next()),
        (Some(last), Some(before)) if last.is_ascii_lowercase() && !before.is_ascii()
    )
}

impl CompositeDictionary {
    pub fn new(layers: Vec<Arc<dyn Dictionary>>) -> Self {
        Self { layers }
    }

    pub fn push(&mut self, layer: Arc<dyn Dictionary>) {
        self.layers.push(layer);
    }

    pub fn layers(&self) -> &[Arc<dyn Dictionary>] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// The layer that receives registrations.
    pub fn writable(&self) -> Option<&Arc<dyn Dictionary>> {
        self.layers.iter().find(|l| l.is_writable())
    }

    pub fn lookup(&self, reading: &str) -> Vec<DictEntry> {
        let mut all = Vec::new();
        for layer in &self.layers {
            let found = layer.lookup(reading);
            trace!(layer = layer.name(), reading, hits = found.len(), "layer lookup");
            all.extend(found);
        }
        dedup_entries(all)
    }

    /// Merged candidates for a conversion key.
    pub fn candidates(&self, key: &CompositeKey) -> Vec<Candidate> {
        self.lookup(&key.dict_key())
            .into_iter()
            .map(|entry| Candidate::new(key.clone(), entry))
            .collect()
    }

    /// Headwords starting with `prefix` across all layers, merged per reading.
    pub fn complete(&self, prefix: &str, max_results: usize) -> Vec<SearchResult> {
        let mut by_reading: BTreeMap<String, Vec<DictEntry>> = BTreeMap::new();
        for layer in &self.layers {
            for sr in layer.complete(prefix, max_results) {
                by_reading.entry(sr.reading).or_default().extend(sr.entries);
            }
        }
        by_reading
            .into_iter()
            .take(max_results)
            .map(|(reading, entries)| SearchResult {
                reading,
                entries: dedup_entries(entries),
            })
            .collect()
    }

    /// Completion candidates for a reading prefix: every entry of every
    /// headword starting with `prefix`, headwords in reading order.
    /// Headwords for inflected words (`かんがe`) are skipped.
    pub fn completions(&self, prefix: &str, max_results: usize) -> Vec<Candidate> {
        if prefix.is_empty() {
            return Vec::new();
        }
        let found: Vec<Candidate> = self
            .complete(prefix, max_results)
            .into_iter()
            .filter(|sr| !is_okuri_headword(&sr.reading))
            .flat_map(|sr| {
                let key = CompositeKey::plain(sr.reading);
                sr.entries
                    .into_iter()
                    .map(move |entry| Candidate::new(key.clone(), entry))
            })
            .collect();
        debug!(prefix, hits = found.len(), "completions");
        found
    }

    /// Register into the first writable layer.
    pub fn register(&self, reading: &str, entry: DictEntry) -> Result<bool, DictError> {
        let layer = self.writable().ok_or(DictError::NoWritableDictionary)?;
        debug!(layer = layer.name(), reading, surface = %entry.surface, "register");
        layer.register(reading, entry)
    }

    /// Remove `surface` from every writable layer. Returns how many layers
    /// actually dropped it.
    pub fn purge(&self, reading: &str, surface: &str) -> Result<usize, DictError> {
        let mut removed = 0;
        for layer in self.layers.iter().filter(|l| l.is_writable()) {
            if layer.purge(reading, surface)? {
                removed += 1;
            }
        }
        debug!(reading, surface, removed, "purge");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::StaticDictionary;
    use crate::user_dict::UserDictionary;

    fn system() -> Arc<dyn Dictionary> {
        Arc::new(StaticDictionary::from_surfaces(
            "system",
            vec![
                ("きょう", vec!["今日", "京"]),
                ("かんがe", vec!["考"]),
            ],
        ))
    }

    fn extra() -> Arc<dyn Dictionary> {
        Arc::new(StaticDictionary::from_surfaces(
            "extra",
            vec![("きょう", vec!["教", "今日"]), ("きょうと", vec!["京都"])],
        ))
    }

    fn surfaces(entries: &[DictEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.surface.as_str()).collect()
    }

    #[test]
    fn lookup_concatenates_in_priority_order() {
        let dict = CompositeDictionary::new(vec![system(), extra()]);
        assert_eq!(surfaces(&dict.lookup("きょう")), vec!["今日", "京", "教"]);

        let reversed = CompositeDictionary::new(vec![extra(), system()]);
        assert_eq!(surfaces(&reversed.lookup("きょう")), vec!["教", "今日", "京"]);
    }

    #[test]
    fn lookup_without_layers_is_empty() {
        assert!(CompositeDictionary::default().lookup("きょう").is_empty());
    }

    #[test]
    fn candidates_use_dict_key() {
        let dict = CompositeDictionary::new(vec![system()]);
        let key = CompositeKey::new("かんが", Some("え".to_string()));
        let cands = dict.candidates(&key);
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].output(), "考え");
    }

    #[test]
    fn register_routes_to_writable_layer() {
        let user: Arc<dyn Dictionary> = Arc::new(UserDictionary::new());
        let dict = CompositeDictionary::new(vec![user, system()]);
        assert!(dict.register("やまだ", DictEntry::new("山田")).unwrap());
        assert_eq!(surfaces(&dict.lookup("やまだ")), vec!["山田"]);
    }

    #[test]
    fn user_layer_first_promotes_over_system() {
        let user: Arc<dyn Dictionary> = Arc::new(UserDictionary::new());
        let dict = CompositeDictionary::new(vec![user, system()]);
        dict.register("きょう", DictEntry::new("京")).unwrap();
        assert_eq!(surfaces(&dict.lookup("きょう")), vec!["京", "今日"]);
    }

    #[test]
    fn register_without_writable_layer_fails() {
        let dict = CompositeDictionary::new(vec![system()]);
        let err = dict.register("やまだ", DictEntry::new("山田")).unwrap_err();
        assert!(matches!(err, DictError::NoWritableDictionary));
    }

    #[test]
    fn purge_only_touches_writable_layers() {
        let user: Arc<dyn Dictionary> = Arc::new(UserDictionary::new());
        let dict = CompositeDictionary::new(vec![user, system()]);
        dict.register("きょう", DictEntry::new("京")).unwrap();
        assert_eq!(dict.purge("きょう", "京").unwrap(), 1);
        // The static layer still has it.
        assert_eq!(surfaces(&dict.lookup("きょう")), vec!["今日", "京"]);
    }

    #[test]
    fn completions_flatten_readings() {
        let dict = CompositeDictionary::new(vec![system(), extra()]);
        let cands = dict.completions("きょう", 10);
        let outputs: Vec<String> = cands.iter().map(Candidate::output).collect();
        assert_eq!(outputs, vec!["今日", "京", "教", "京都"]);
        assert_eq!(cands[3].key.dict_key(), "きょうと");
    }

    #[test]
    fn completions_skip_inflected_headwords() {
        let dict = CompositeDictionary::new(vec![system()]);
        assert!(dict.completions("かんが", 10).is_empty());
        assert!(dict.completions("", 10).is_empty());
        assert!(is_okuri_headword("かんがe"));
        assert!(!is_okuri_headword("cha"));
        assert!(!is_okuri_headword("きょう"));
    }

    #[test]
    fn complete_merges_layers() {
        let dict = CompositeDictionary::new(vec![system(), extra()]);
        let results = dict.complete("きょう", 10);
        let readings: Vec<&str> = results.iter().map(|r| r.reading.as_str()).collect();
        assert_eq!(readings, vec!["きょう", "きょうと"]);
        assert_eq!(surfaces(&results[0].entries), vec!["今日", "京", "教"]);
    }
}
