//! District directory against the bundled names file.

use agribase_ai::DistrictDirectory;
use std::path::Path;

fn bundled() -> DistrictDirectory {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/districts.txt");
    DistrictDirectory::load(&path).unwrap()
}

#[test]
fn test_bundled_file_has_all_districts() {
    assert_eq!(bundled().len(), 64);
}

#[test]
fn test_autocomplete_typing_sequence() {
    let dir = bundled();

    assert_eq!(dir.search("m", 3), vec!["Madaripur", "Magura", "Manikganj"]);
    assert_eq!(dir.search("my", 10), vec!["Mymensingh"]);
    assert_eq!(dir.search("cox", 10), vec!["Cox's Bazar"]);
}

#[test]
fn test_substring_after_prefix() {
    // "Sirajganj" contains "raj" but sorts after the prefix hits.
    assert_eq!(bundled().search("raj", 10), vec!["Rajbari", "Rajshahi", "Sirajganj"]);

    let results = bundled().search("ga", 10);
    assert_eq!(&results[..2], &["Gaibandha", "Gazipur"]);
    assert_eq!(results.len(), 10);
}
