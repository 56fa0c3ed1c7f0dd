use autojoin_core::discover::find_other_parts;
use autojoin_core::validate::{
    check_for_missing_parts, check_free_space, total_size, FsSpaceProbe, MockSpaceProbe,
    SpaceProbe, ValidateError,
};
use std::fs::write;
use tempfile::tempdir;

#[test]
fn test_check_for_missing_parts_detects_gap() {
    let complete = find_other_parts(&["f.001", "f.002", "f.003"], "f.001");
    let gapped = find_other_parts(&["f.001", "f.002", "f.004"], "f.001");

    assert!(!check_for_missing_parts(&complete));
    assert!(check_for_missing_parts(&gapped));
}

#[test]
fn test_total_size_sums_part_sizes() {
    let tmp = tempdir().unwrap();
    let a = tmp.path().join("f.001");
    let b = tmp.path().join("f.002");
    write(&a, vec![0u8; 10]).unwrap();
    write(&b, vec![0u8; 32]).unwrap();

    assert_eq!(total_size(&[a, b]).unwrap(), 42);
}

#[test]
fn test_check_free_space_compares_needed_with_available() {
    let tmp = tempdir().unwrap();
    let part = tmp.path().join("f.001");
    write(&part, vec![1u8; 100]).unwrap();

    let mut probe = MockSpaceProbe::new();
    probe.expect_available_space().times(2).returning(|_| Ok(100));

    let exact = check_free_space(&[part.clone()], tmp.path(), &probe).unwrap();
    assert!(exact.is_sufficient());

    write(&part, vec![1u8; 101]).unwrap();
    let short = check_free_space(&[part], tmp.path(), &probe).unwrap();
    assert_eq!(short.needed, 101);
    assert!(!short.is_sufficient());
}

#[test]
fn test_check_free_space_reports_vanished_part() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("gone.001");
    let probe = MockSpaceProbe::new();

    let err = check_free_space(&[missing], tmp.path(), &probe).unwrap_err();

    assert!(matches!(err, ValidateError::PartMetadata { .. }));
}

#[test]
fn test_fs_space_probe_reads_a_real_filesystem() {
    let tmp = tempdir().unwrap();

    let available = FsSpaceProbe.available_space(tmp.path()).expect("free space query");

    assert!(available > 0);
}
