//! Memoized graph loading.
//!
//! The UI layer asks for the same graph many times per session, so loads
//! are cached in an explicit table keyed by (path, modification
//! signature) with manual invalidation. A stale signature forces a
//! reload; nothing is cached implicitly process-wide.

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use lru::LruCache;
use tracing::debug;

use super::loader::{load_graph, LoadError, LoadResult};
use super::model::Graph;

/// Modification signature of a graph file: mtime plus length. Cheap to
/// probe and sufficient to detect edits between requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceSignature {
    modified: SystemTime,
    len: u64,
}

impl SourceSignature {
    pub fn probe(path: &Path) -> LoadResult<Self> {
        let meta = fs::metadata(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let modified = meta.modified().map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(SourceSignature {
            modified,
            len: meta.len(),
        })
    }
}

struct CachedGraph {
    signature: SourceSignature,
    graph: Arc<Graph>,
}

/// Explicit load-memoization table.
pub struct GraphSource {
    cache: LruCache<PathBuf, CachedGraph>,
}

impl GraphSource {
    /// A small capacity is plenty: the engine works on one graph at a
    /// time and the cache only needs to survive parameter changes.
    pub fn new() -> Self {
        Self::with_capacity(NonZeroUsize::new(4).unwrap())
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        GraphSource {
            cache: LruCache::new(capacity),
        }
    }

    /// Load a graph, reusing the cached instance while the file's
    /// signature is unchanged.
    pub fn load(&mut self, path: &Path) -> LoadResult<(Arc<Graph>, SourceSignature)> {
        let signature = SourceSignature::probe(path)?;

        if let Some(cached) = self.cache.get(path) {
            if cached.signature == signature {
                debug!(path = %path.display(), "graph cache hit");
                return Ok((Arc::clone(&cached.graph), signature));
            }
            debug!(path = %path.display(), "graph cache stale, reloading");
        }

        let graph = Arc::new(load_graph(path)?);
        self.cache.put(
            path.to_path_buf(),
            CachedGraph {
                signature,
                graph: Arc::clone(&graph),
            },
        );
        Ok((graph, signature))
    }

    /// Drop the cached entry for a path. Returns whether one existed.
    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.cache.pop(path).is_some()
    }
}

impl Default for GraphSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TINY: &str = r#"{"directed": false, "nodes": [{"id": "a"}, {"id": "b"}],
                           "edges": [{"source": "a", "target": "b"}]}"#;

    #[test]
    fn test_cache_hit_returns_same_instance() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TINY.as_bytes()).unwrap();

        let mut source = GraphSource::new();
        let (first, sig1) = source.load(file.path()).unwrap();
        let (second, sig2) = source.load(file.path()).unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(sig1, sig2);
    }

    #[test]
    fn test_modified_file_reloads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TINY.as_bytes()).unwrap();

        let mut source = GraphSource::new();
        let (first, _) = source.load(file.path()).unwrap();

        // Rewrite with an extra node; the length change flips the signature.
        let bigger = r#"{"directed": false,
                         "nodes": [{"id": "a"}, {"id": "b"}, {"id": "c"}],
                         "edges": [{"source": "a", "target": "b"}]}"#;
        fs::write(file.path(), bigger).unwrap();

        let (second, _) = source.load(file.path()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.node_count(), 3);
    }

    #[test]
    fn test_invalidate() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TINY.as_bytes()).unwrap();

        let mut source = GraphSource::new();
        let (first, _) = source.load(file.path()).unwrap();
        assert!(source.invalidate(file.path()));
        assert!(!source.invalidate(file.path()));

        let (second, _) = source.load(file.path()).unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let mut source = GraphSource::new();
        let err = source.load(Path::new("/nonexistent/rpg.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
