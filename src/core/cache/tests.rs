//! Unit tests for the web cache

use super::*;
use tempfile::TempDir;

#[cfg(test)]
mod cache_tests {
    use super::*;

    fn sample_entry(url: &str) -> CacheEntry {
        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), "application/xml".to_string());
        CacheEntry::new(url, url, 200, headers, "<fantasy_content/>")
    }

    #[test]
    fn test_try_read_to_string_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("test_file.txt");

        fs::write(&file_path, "Hello, World!").unwrap();

        assert_eq!(
            try_read_to_string(&file_path),
            Some("Hello, World!".to_string())
        );
    }

    #[test]
    fn test_try_read_to_string_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("nonexistent.txt");

        assert!(try_read_to_string(&file_path).is_none());
    }

    #[test]
    fn test_write_string_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("a").join("b").join("out.json");

        write_string(&file_path, "{}").unwrap();

        assert_eq!(fs::read_to_string(&file_path).unwrap(), "{}");
    }

    #[test]
    fn test_cache_key_is_sha224_hex() {
        let key = cache_key("https://fantasysports.yahooapis.com/fantasy/v2/game/nfl");

        assert_eq!(key.len(), 56);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(
            key,
            cache_key("https://fantasysports.yahooapis.com/fantasy/v2/game/nfl")
        );
        assert_ne!(
            key,
            cache_key("https://fantasysports.yahooapis.com/fantasy/v2/game/mlb")
        );
    }

    #[test]
    fn test_cache_key_known_digest() {
        // SHA-224 of the empty string
        assert_eq!(
            cache_key(""),
            "d14a028c2a3a2bc9476102bb288234c415a2b01f828ea62ac5b3e42f"
        );
    }

    #[test]
    fn test_entry_path_layout() {
        let cache = WebCache::new("/tmp/web", 168);
        let url = "https://example.com/resource";
        let key = cache_key(url);

        let path = cache.entry_path(url);
        let expected: PathBuf = ["/tmp/web", &key[0..1], &key[1..2], &key[2..3], &key[3..4], &key[4..5], &key]
            .iter()
            .collect();

        assert_eq!(path, expected);
    }

    #[test]
    fn test_put_then_get_returns_entry() {
        let temp_dir = TempDir::new().unwrap();
        let cache = WebCache::new(temp_dir.path(), 168);
        let entry = sample_entry("https://example.com/a");

        cache.put(&entry).unwrap();

        assert_eq!(cache.get("https://example.com/a"), Some(entry));
        assert!(cache.get("https://example.com/b").is_none());
    }

    #[test]
    fn test_get_at_respects_expiry_window() {
        let temp_dir = TempDir::new().unwrap();
        let cache = WebCache::new(temp_dir.path(), 2);
        let entry = sample_entry("https://example.com/a");
        cache.put(&entry).unwrap();

        let inside = entry.cached_at + Duration::minutes(119);
        let outside = entry.cached_at + Duration::hours(2);

        assert!(cache.get_at("https://example.com/a", inside).is_some());
        assert!(cache.get_at("https://example.com/a", outside).is_none());
    }

    #[test]
    fn test_zero_expiry_never_fresh() {
        let temp_dir = TempDir::new().unwrap();
        let cache = WebCache::new(temp_dir.path(), 0);
        cache.put(&sample_entry("https://example.com/a")).unwrap();

        assert!(cache.get("https://example.com/a").is_none());
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let temp_dir = TempDir::new().unwrap();
        let cache = WebCache::new(temp_dir.path(), 168);
        let path = cache.entry_path("https://example.com/a");

        write_string(&path, "not json").unwrap();

        assert!(cache.get("https://example.com/a").is_none());
    }
}
