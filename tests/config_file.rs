use std::io::Write;

use pawprint::{Config, ConfigError, Usage};

#[test]
fn loads_overrides_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "limits": {{ "image": {{ "maxImages": 10, "maxStorageBytes": 1000 }} }} }}"#
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.limits.image.max_images, 10);
    assert_eq!(config.limits.album.max_albums, 2);

    let usage = Usage {
        album_count: 0,
        image_count: 9,
        image_storage_used_bytes: 900,
    };
    let images = config.limits.image;
    assert!(images.can_upload_image(usage.image_count, usage.image_storage_used_bytes, 100));
    assert!(!images.can_upload_image(usage.image_count, usage.image_storage_used_bytes, 101));
    assert_eq!(usage.quota(&config.limits).remaining_images, 1);
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn config_round_trips_through_json() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"restorableDays\":30"));
    assert_eq!(Config::from_json_str(&json).unwrap(), config);
}
