
use crate::test_utils::sample_image;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use snapquiz::images::{acquire_from_file, ImageCollection, MAX_IMAGES};

#[test]
fn collection_caps_at_three() {
    let mut collection = ImageCollection::new();
    assert!(collection.add(sample_image("a")));
    assert!(collection.add(sample_image("b")));
    assert!(collection.add(sample_image("c")));
    assert!(collection.is_full());

    // A fourth add is a no-op and the collection is unchanged.
    let snapshot: Vec<String> = collection.iter().map(|i| i.id.clone()).collect();
    assert!(!collection.add(sample_image("d")));
    assert_eq!(collection.len(), MAX_IMAGES);
    let after: Vec<String> = collection.iter().map(|i| i.id.clone()).collect();
    assert_eq!(snapshot, after);
}

#[test]
fn remove_by_id_removes_exactly_that_entry() {
    let mut collection = ImageCollection::new();
    let first = sample_image("a");
    let second = sample_image("b");
    let third = sample_image("c");
    let target = second.id.clone();
    let kept = vec![first.id.clone(), third.id.clone()];
    collection.add(first);
    collection.add(second);
    collection.add(third);

    assert!(collection.remove(&target));

    let remaining: Vec<String> = collection.iter().map(|i| i.id.clone()).collect();
    assert_eq!(remaining, kept);
}

#[test]
fn remove_unknown_id_changes_nothing() {
    let mut collection = ImageCollection::new();
    collection.add(sample_image("a"));

    assert!(!collection.remove("no-such-id"));
    assert_eq!(collection.len(), 1);
}

#[test]
fn clear_empties_the_collection() {
    let mut collection = ImageCollection::new();
    collection.add(sample_image("a"));
    collection.add(sample_image("b"));

    collection.clear();

    assert!(collection.is_empty());
    assert_eq!(collection.len(), 0);
}

#[tokio::test]
async fn acquire_from_file_encodes_bytes_and_infers_mime() {
    let path = std::env::temp_dir().join("snapquiz-acquire-test.png");
    let bytes = [0x89u8, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a];
    std::fs::write(&path, bytes).unwrap();

    let image = acquire_from_file(&path).await.unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.data, STANDARD.encode(bytes));
    assert!(!image.data.starts_with("data:"), "no data-URL prefix");
}

#[tokio::test]
async fn acquire_from_missing_file_is_an_error() {
    let path = std::env::temp_dir().join("snapquiz-no-such-file.png");
    assert!(acquire_from_file(&path).await.is_err());
}
