use contracts::domain::a025_picking_dictionary::ReferenceDictionary;
use contracts::usecases::u508_build_picking_list::DictionaryUpload;
use sha2::{Digest, Sha256};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use super::error::DictionaryError;
use super::loader::load_dictionary;

/// Parsed dictionaries keyed by the SHA-256 of the uploaded sheets.
///
/// Entries are immutable; the oldest entry is evicted when the cache is full.
pub struct DictionaryCache {
    max_entries: usize,
    inner: RwLock<CacheInner>,
}

#[derive(Default)]
struct CacheInner {
    entries: HashMap<String, Arc<ReferenceDictionary>>,
    order: VecDeque<String>,
}

impl DictionaryCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            max_entries,
            inner: RwLock::new(CacheInner::default()),
        }
    }

    /// Content hash over sheet names and contents, in upload order
    pub fn content_key(upload: &DictionaryUpload) -> String {
        let mut hasher = Sha256::new();
        for sheet in &upload.sheets {
            hasher.update((sheet.name.len() as u64).to_le_bytes());
            hasher.update(sheet.name.as_bytes());
            hasher.update((sheet.csv.len() as u64).to_le_bytes());
            hasher.update(sheet.csv.as_bytes());
        }
        format!("{:x}", hasher.finalize())
    }

    pub fn get(&self, key: &str) -> Option<Arc<ReferenceDictionary>> {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.entries.get(key).cloned()
    }

    pub fn insert(&self, key: String, dictionary: Arc<ReferenceDictionary>) {
        if self.max_entries == 0 {
            return;
        }
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        if inner.entries.contains_key(&key) {
            return;
        }
        while inner.entries.len() >= self.max_entries {
            match inner.order.pop_front() {
                Some(oldest) => {
                    inner.entries.remove(&oldest);
                }
                None => break,
            }
        }
        inner.order.push_back(key.clone());
        inner.entries.insert(key, dictionary);
    }

    /// Cached dictionary for this upload, parsing it on a miss.
    /// Returns the dictionary and whether it came from the cache.
    pub fn get_or_load(
        &self,
        upload: &DictionaryUpload,
    ) -> Result<(Arc<ReferenceDictionary>, bool), DictionaryError> {
        let key = Self::content_key(upload);
        if let Some(dictionary) = self.get(&key) {
            tracing::debug!("Dictionary cache hit {}", &key[..12]);
            return Ok((dictionary, true));
        }

        let dictionary = Arc::new(load_dictionary(upload)?);
        self.insert(key, dictionary.clone());
        Ok((dictionary, false))
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
