//! 생성/저장 테스트

use super::support::{CountingGenerator, RecordingStore};
use crate::core::cache::{get_basis, BasisCache, BasisRequest};
use crate::core::error::BasisError;
use crate::core::method::BasisMethod;
use crate::core::options::BasisOptions;
use crate::core::store::DirectoryStore;
use std::fs;

#[test]
fn 생성_저장_왕복_테스트() {
    let dir = tempfile::tempdir().unwrap();
    let options = BasisOptions::default();

    let first = get_basis("two_point", 64, 64, Some(dir.path()), None, &options, false).unwrap();
    assert!(dir.path().join("two_point_basis_64_64.npy").exists());

    let cache = BasisCache::with_parts(CountingGenerator::default(), Some(DirectoryStore::new(dir.path())));
    let second = cache.get(&BasisRequest::new(BasisMethod::TwoPoint, 64, 64), None).unwrap();

    assert_eq!(second, first);
    assert_eq!(cache.generator().calls.get(), 0);
}

#[test]
fn 새로_생성한_기저는_열을_자르지_않음_테스트() {
    let cache = BasisCache::with_parts(CountingGenerator::default(), Some(RecordingStore::default()));

    let basis = cache.get(&BasisRequest::new(BasisMethod::OnionPeeling, 20, 5), None).unwrap();

    // CountingGenerator 는 size + 3 열을 만든다
    assert_eq!(basis.dim(), (20, 23));
    let store = cache.store().unwrap();
    assert_eq!(store.saves.get(), 1);
    assert_eq!(store.entries.borrow()[0].0, "onion_peeling_basis_20_5.npy");
}

#[test]
fn linbasex_저장_이름_테스트() {
    let cache = BasisCache::with_parts(CountingGenerator::default(), Some(RecordingStore::default()));
    let request = BasisRequest::new(BasisMethod::Linbasex, 30, 30)
        .with_options(BasisOptions::default().with_radial_step(2));

    cache.get(&request, None).unwrap();

    let store = cache.store().unwrap();
    assert_eq!(store.entries.borrow()[0].0, "linbasex_basis_30_30_02_050_2_0.npy");
}

#[test]
fn 알_수_없는_방법_거부_테스트() {
    let dir = tempfile::tempdir().unwrap();

    let err = get_basis(
        "nonexistent_method",
        64,
        64,
        Some(dir.path()),
        None,
        &BasisOptions::default(),
        true,
    )
    .unwrap_err();

    assert!(matches!(err, BasisError::Configuration(ref name) if name == "nonexistent_method"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn 메모리_전용_모드_테스트() {
    let cache = BasisCache::with_parts(CountingGenerator::default(), None::<RecordingStore>);
    let basis = cache.get(&BasisRequest::new(BasisMethod::ThreePoint, 37, 37), None).unwrap();
    assert_eq!(basis.nrows(), 37);
    assert_eq!(cache.generator().calls.get(), 1);

    // 상대 경로로 저장되는지 확인하려고 작업 디렉토리를 빈 임시 디렉토리로 바꾼다
    let workdir = tempfile::tempdir().unwrap();
    let previous = std::env::current_dir().unwrap();
    std::env::set_current_dir(workdir.path()).unwrap();
    let result = get_basis("three_point", 37, 37, None, None, &BasisOptions::default(), false);
    std::env::set_current_dir(&previous).unwrap();

    assert_eq!(result.unwrap().dim(), (37, 37));
    assert_eq!(fs::read_dir(workdir.path()).unwrap().count(), 0);
}

#[test]
fn 저장_실패는_io_에러_테스트() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no").join("such").join("dir");

    let cache = BasisCache::with_parts(CountingGenerator::default(), Some(DirectoryStore::new(&missing)));
    let err = cache.get(&BasisRequest::new(BasisMethod::TwoPoint, 8, 8), None).unwrap_err();

    assert!(matches!(err, BasisError::Io { .. }), "{:?}", err);
    assert_eq!(cache.generator().calls.get(), 1);
}
