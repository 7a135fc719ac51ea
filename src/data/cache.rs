//! Dataset Cache Module
//! Per-session memoization of cleaned datasets, keyed by source path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::loader::{self, DatasetError};
use super::records::RecordSet;

/// In-memory cache of cleaned record sets.
///
/// A source is parsed once per session; repeated renders of the same path
/// reuse the cached set. Entries are never invalidated automatically —
/// callers that know a source changed call `invalidate` first.
#[derive(Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<RecordSet>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached set for `path`, loading and cleaning it on first access.
    /// The GUI loads on a background thread and uses `get`/`insert` instead.
    #[allow(dead_code)]
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<RecordSet>, DatasetError> {
        if let Some(set) = self.entries.get(path) {
            return Ok(Arc::clone(set));
        }

        let set = Arc::new(loader::load_and_clean(path)?);
        self.entries.insert(path.to_path_buf(), Arc::clone(&set));
        Ok(set)
    }

    /// Cached set for `path`, if already loaded.
    pub fn get(&self, path: &Path) -> Option<Arc<RecordSet>> {
        self.entries.get(path).map(Arc::clone)
    }

    /// Store an externally computed set (used by the background loader).
    pub fn insert(&mut self, path: PathBuf, set: RecordSet) -> Arc<RecordSet> {
        let set = Arc::new(set);
        self.entries.insert(path, Arc::clone(&set));
        set
    }

    /// Drop the entry for `path` so the next access re-parses the file.
    pub fn invalidate(&mut self, path: &Path) {
        self.entries.remove(path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "MUNICIPIO,DEPARTAMENTO,HOMICIDIO TOTAL,TASA MUNICIPAL").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn second_access_is_a_cache_hit() {
        let file = write_csv(&["A,X,10,5.0"]);
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(file.path()).unwrap();
        let second = cache.get_or_load(file.path()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn invalidate_forces_a_reload() {
        let file = write_csv(&["A,X,10,5.0"]);
        let mut cache = DatasetCache::new();

        let first = cache.get_or_load(file.path()).unwrap();
        cache.invalidate(file.path());
        let second = cache.get_or_load(file.path()).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(*first, *second);
    }

    #[test]
    fn load_failure_caches_nothing() {
        let mut cache = DatasetCache::new();
        let missing = Path::new("/no/such/dataset.csv");

        assert!(cache.get_or_load(missing).is_err());
        assert!(cache.get(missing).is_none());
    }
}
