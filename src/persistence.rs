//! JSON file persistence
//!
//! Save/load helpers shared by anything that keeps a JSON document on
//! disk. Writes go through a sibling temp file and a rename so a crash
//! mid-write never leaves a truncated document behind.

use std::fs;
use std::io;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read and parse a JSON file, substituting `T::default()` when the file
/// is missing or malformed. Recovery is logged, never surfaced.
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            log::warn!("No readable file at {}: {err}", path.display());
            return T::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("Malformed JSON in {}: {err}", path.display());
            T::default()
        }
    }
}

/// Serialize `value` pretty-printed and atomically replace `path` with it
pub fn save_json_pretty<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let data = vec![1u32, 2, 3];
        save_json_pretty(&path, &data).unwrap();
        let loaded: Vec<u32> = load_json_or_default(&path);
        assert_eq!(loaded, data);

        // No temp file left behind
        assert!(!dir.path().join("scores.json.tmp").exists());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let loaded: Vec<u32> = load_json_or_default(&dir.path().join("absent.json"));
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_malformed_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();
        let loaded: Vec<u32> = load_json_or_default(&path);
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_save_overwrites_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        save_json_pretty(&path, &vec![9u32; 100]).unwrap();
        save_json_pretty(&path, &vec![1u32]).unwrap();
        let loaded: Vec<u32> = load_json_or_default(&path);
        assert_eq!(loaded, vec![1]);
    }
}
