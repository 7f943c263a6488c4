#[allow(dead_code)]
mod common;

use maxsphere_core::error::SphereError;
use maxsphere_core::geometry::resolve_face;
use maxsphere_core::lut::cache::{read_header, LUT_HEADER_SIZE, LUT_RECORD_SIZE};
use maxsphere_core::lut::{
    build_or_load_table, load_table, sample_angles, save_table, ProjectionTable, TableKey,
};

fn small_key(antialias: usize) -> TableKey {
    TableKey::new(&common::tiny_template(), 32, 16, antialias)
}

#[test]
fn test_build_is_deterministic() {
    let a = ProjectionTable::build(small_key(2)).unwrap();
    let b = ProjectionTable::build(small_key(2)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), 32 * 16 * 4);
}

#[test]
fn test_antialias_one_is_one_entry_per_pixel() {
    let key = small_key(1);
    let table = ProjectionTable::build(key).unwrap();
    assert_eq!(table.len(), 32 * 16);
    for j in 0..16 {
        for i in 0..32 {
            let (lon, lat) = sample_angles(&key, i, j, 0, 0);
            let (face, uv) = resolve_face(lon, lat).unwrap();
            let entry = table.pixel_samples(j * 32 + i)[0];
            assert_eq!(entry.face, face);
            assert_eq!(entry.uv, uv);
        }
    }
}

#[test]
fn test_supersample_order() {
    let key = small_key(3);
    let table = ProjectionTable::build(key).unwrap();
    let (i, j) = (5, 9);
    let samples = table.pixel_samples(j * 32 + i);
    assert_eq!(samples.len(), 9);
    for aj in 0..3 {
        for ai in 0..3 {
            let (lon, lat) = sample_angles(&key, i, j, ai, aj);
            let (face, uv) = resolve_face(lon, lat).unwrap();
            assert_eq!(samples[aj * 3 + ai].face, face);
            assert_eq!(samples[aj * 3 + ai].uv, uv);
        }
    }
}

#[test]
fn test_zero_antialias_rejected() {
    assert!(matches!(
        ProjectionTable::build(small_key(0)),
        Err(SphereError::InvalidConfig(_))
    ));
}

#[test]
fn test_save_load_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let key = small_key(2);
    let table = ProjectionTable::build(key).unwrap();
    let path = dir.path().join(key.file_name());

    save_table(&path, &table).unwrap();
    let size = std::fs::metadata(&path).unwrap().len() as usize;
    assert_eq!(size, LUT_HEADER_SIZE + table.len() * LUT_RECORD_SIZE);

    let loaded = load_table(&path, &key).unwrap();
    assert_eq!(loaded, table);

    let header = read_header(&path).unwrap();
    assert_eq!(header.key, key);
    assert_eq!(header.entry_count, table.len() as u64);
}

#[test]
fn test_cache_file_name() {
    assert_eq!(small_key(2).file_name(), "7_32_16_2.data");
}

#[test]
fn test_build_or_load_writes_cache() {
    let dir = tempfile::tempdir().unwrap();
    let key = small_key(1);
    let built = build_or_load_table(key, dir.path()).unwrap();
    let path = dir.path().join(key.file_name());
    assert!(path.exists());
    assert!(!dir.path().join("7_32_16_1.data.tmp").exists());

    let reloaded = build_or_load_table(key, dir.path()).unwrap();
    assert_eq!(reloaded, built);
}

#[test]
fn test_truncated_cache_is_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    let key = small_key(2);
    let table = ProjectionTable::build(key).unwrap();
    let path = dir.path().join(key.file_name());
    save_table(&path, &table).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    std::fs::write(&path, &bytes[..bytes.len() - 5]).unwrap();
    assert!(matches!(load_table(&path, &key), Err(SphereError::Cache(_))));

    let rebuilt = build_or_load_table(key, dir.path()).unwrap();
    assert_eq!(rebuilt, table);
    assert_eq!(load_table(&path, &key).unwrap(), table);
}

#[test]
fn test_garbage_cache_is_rebuilt() {
    let dir = tempfile::tempdir().unwrap();
    let key = small_key(1);
    let path = dir.path().join(key.file_name());
    std::fs::write(&path, b"not a table at all").unwrap();

    let table = build_or_load_table(key, dir.path()).unwrap();
    assert_eq!(table, ProjectionTable::build(key).unwrap());
    assert!(load_table(&path, &key).is_ok());
}

#[test]
fn test_cache_for_other_key_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let written = small_key(1);
    let wanted = small_key(2);
    let path = dir.path().join("table.data");
    save_table(&path, &ProjectionTable::build(written).unwrap()).unwrap();
    assert!(matches!(
        load_table(&path, &wanted),
        Err(SphereError::Cache(_))
    ));
}

#[test]
fn test_corrupt_face_code_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let key = small_key(1);
    let path = dir.path().join(key.file_name());
    save_table(&path, &ProjectionTable::build(key).unwrap()).unwrap();

    let mut bytes = std::fs::read(&path).unwrap();
    bytes[LUT_HEADER_SIZE] = 42;
    std::fs::write(&path, &bytes).unwrap();
    assert!(matches!(load_table(&path, &key), Err(SphereError::Cache(_))));
}
