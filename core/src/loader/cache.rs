//! Binary cache of parsed waveform tables.
//!
//! The file holds `{ magic, version, table }` serialized with bincode. No
//! timestamps or paths are stored, so identical output always yields an
//! identical cache file. Freshness is decided from file modification times.

use std::path::Path;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::error::{AiresError, Result};

use super::table::WaveformTable;

pub const CACHE_MAGIC: [u8; 4] = *b"ZHWF";

/// Bump when the encoded table layout changes.
pub const CACHE_VERSION: u32 = 1;

#[derive(Serialize)]
struct CacheRef<'a> {
    magic: [u8; 4],
    version: u32,
    table: &'a WaveformTable,
}

#[derive(Deserialize)]
struct CacheOwned {
    magic: [u8; 4],
    version: u32,
    table: WaveformTable,
}

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// True when `cache` exists and is at least as new as every source.
pub fn is_fresh(cache: &Path, sources: &[&Path]) -> bool {
    let Some(cache_mtime) = modified(cache) else {
        return false;
    };
    sources.iter().all(|src| match modified(src) {
        Some(src_mtime) => cache_mtime >= src_mtime,
        None => false,
    })
}

/// Decodes a cache file; `Ok(None)` when it was written by another format.
pub fn read_cache(path: &Path) -> Result<Option<WaveformTable>> {
    let bytes = std::fs::read(path).map_err(|e| AiresError::io(path, e))?;
    let decoded: CacheOwned = match bincode::deserialize(&bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "undecodable cache");
            return Ok(None);
        }
    };
    if decoded.magic != CACHE_MAGIC || decoded.version != CACHE_VERSION {
        tracing::debug!(
            path = %path.display(),
            version = decoded.version,
            "cache format mismatch"
        );
        return Ok(None);
    }
    if !decoded.table.is_consistent() {
        tracing::warn!(path = %path.display(), "cache columns disagree in length");
        return Ok(None);
    }
    Ok(Some(decoded.table))
}

/// Writes the cache through a temporary file and a rename.
pub fn write_cache(path: &Path, table: &WaveformTable) -> Result<()> {
    let bytes = bincode::serialize(&CacheRef {
        magic: CACHE_MAGIC,
        version: CACHE_VERSION,
        table,
    })
    .map_err(|e| AiresError::Cache(format!("encode failed: {e}")))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cache".to_string());
    let tmp = path.with_file_name(format!(".{file_name}.{}.tmp", std::process::id()));

    std::fs::write(&tmp, &bytes).map_err(|e| AiresError::io(&tmp, e))?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(AiresError::io(path, e));
    }
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "cache written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::summary::ShowerSummary;
    use crate::loader::table::Sample;
    use std::fs::File;
    use std::time::Duration;

    fn table() -> WaveformTable {
        let summary = ShowerSummary {
            energy: 1.0,
            zenith: 53.44,
            azimuth: 0.0,
            lat: 0.0,
            lon: 0.0,
            ground: 0.0,
            mag_str: 24.6,
            mag_inc: -35.7,
            mag_dec: 2.5,
            particle: None,
            injection: None,
            dt: None,
            rindex: None,
            thinning: None,
            xmax: None,
            aires_version: None,
        };
        let sample = Sample {
            antenna: 1,
            x: 0.0,
            y: 0.0,
            z: 0.0,
            t: 1.0,
            ex: 1e-5,
            ey: 0.0,
            ez: 0.0,
        };
        WaveformTable::from_samples(summary, vec![sample])
    }

    #[test]
    fn write_then_read_returns_equal_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waveforms.bin");
        write_cache(&path, &table()).unwrap();
        assert_eq!(read_cache(&path).unwrap(), Some(table()));
    }

    #[test]
    fn identical_tables_give_identical_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        write_cache(&a, &table()).unwrap();
        write_cache(&b, &table()).unwrap();
        assert_eq!(std::fs::read(a).unwrap(), std::fs::read(b).unwrap());
    }

    #[test]
    fn foreign_bytes_are_not_a_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waveforms.bin");
        std::fs::write(&path, b"not a cache").unwrap();
        assert_eq!(read_cache(&path).unwrap(), None);
    }

    #[test]
    fn ragged_columns_are_not_a_cache() {
        // same layout as the encoded cache, one `ex` value short
        #[derive(Serialize)]
        struct Ragged {
            magic: [u8; 4],
            version: u32,
            summary: ShowerSummary,
            antenna: Vec<u32>,
            x: Vec<f64>,
            y: Vec<f64>,
            z: Vec<f64>,
            t: Vec<f64>,
            ex: Vec<f64>,
            ey: Vec<f64>,
            ez: Vec<f64>,
        }
        let two = vec![0.0, 0.5];
        let ragged = Ragged {
            magic: CACHE_MAGIC,
            version: CACHE_VERSION,
            summary: table().summary().clone(),
            antenna: vec![1, 1],
            x: two.clone(),
            y: two.clone(),
            z: two.clone(),
            t: two.clone(),
            ex: vec![1e-5],
            ey: two.clone(),
            ez: two,
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waveforms.bin");
        std::fs::write(&path, bincode::serialize(&ragged).unwrap()).unwrap();
        assert_eq!(read_cache(&path).unwrap(), None);
    }

    #[test]
    fn older_cache_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        let cache = dir.path().join("waveforms.bin");
        let source = dir.path().join("t1.sry");
        std::fs::write(&source, "x").unwrap();
        write_cache(&cache, &table()).unwrap();
        assert!(is_fresh(&cache, &[source.as_path()]));

        let later = SystemTime::now() + Duration::from_secs(60);
        File::options()
            .write(true)
            .open(&source)
            .unwrap()
            .set_modified(later)
            .unwrap();
        assert!(!is_fresh(&cache, &[source.as_path()]));
    }

    #[test]
    fn missing_cache_is_stale() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_fresh(&dir.path().join("waveforms.bin"), &[]));
    }
}
