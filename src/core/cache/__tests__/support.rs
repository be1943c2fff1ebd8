//! 캐시 테스트용 가짜 저장소와 생성기

use crate::core::error::{BasisError, Result};
use crate::core::method::BasisMethod;
use crate::core::naming::BasisName;
use crate::core::options::BasisOptions;
use crate::core::store::BasisStore;
use ndarray::Array2;
use std::cell::{Cell, RefCell};
use std::io;
use std::path::PathBuf;

/// 나열 순서를 고정할 수 있는 메모리 저장소. 접근 횟수를 센다.
#[derive(Default)]
pub struct RecordingStore {
    pub entries: RefCell<Vec<(String, Option<Array2<f64>>)>>,
    pub listings: Cell<usize>,
    pub loads: Cell<usize>,
    pub saves: Cell<usize>,
}

impl RecordingStore {
    pub fn with(entries: Vec<(&str, Array2<f64>)>) -> Self {
        let store = Self::default();
        for (name, basis) in entries {
            store.entries.borrow_mut().push((name.to_string(), Some(basis)));
        }
        store
    }

    /// 나열에는 나오지만 로드하면 NotFound 인 항목
    pub fn add_vanished(&self, name: &str) {
        self.entries.borrow_mut().push((name.to_string(), None));
    }

    pub fn disk_accesses(&self) -> usize {
        self.listings.get() + self.loads.get() + self.saves.get()
    }
}

impl BasisStore for RecordingStore {
    fn candidates(&self, method: BasisMethod) -> Result<Vec<String>> {
        self.listings.set(self.listings.get() + 1);
        let prefix = BasisName::search_prefix(method);
        Ok(self
            .entries
            .borrow()
            .iter()
            .map(|(name, _)| name.clone())
            .filter(|name| name.starts_with(&prefix))
            .collect())
    }

    fn load(&self, file_name: &str) -> Result<Array2<f64>> {
        self.loads.set(self.loads.get() + 1);
        self.entries
            .borrow()
            .iter()
            .find(|(name, _)| name == file_name)
            .and_then(|(_, basis)| basis.clone())
            .ok_or_else(|| BasisError::io(self.location(file_name), io::ErrorKind::NotFound.into()))
    }

    fn save(&self, file_name: &str, basis: &Array2<f64>) -> Result<PathBuf> {
        self.saves.set(self.saves.get() + 1);
        self.entries
            .borrow_mut()
            .push((file_name.to_string(), Some(basis.clone())));
        Ok(self.location(file_name))
    }

    fn location(&self, file_name: &str) -> PathBuf {
        PathBuf::from("memory").join(file_name)
    }
}

/// 호출 횟수를 세는 생성기. 값은 (i, j) 로 결정되는 단순 패턴.
#[derive(Default)]
pub struct CountingGenerator {
    pub calls: Cell<usize>,
}

impl crate::core::generator::BasisGenerator for CountingGenerator {
    fn generate(&self, _method: BasisMethod, size: usize, _options: &BasisOptions)
        -> Result<Array2<f64>> {
        self.calls.set(self.calls.get() + 1);
        Ok(pattern(size, size + 3))
    }
}

/// 원소마다 다른 값을 갖는 테스트 행렬
pub fn pattern(rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |(i, j)| (i * 1000 + j) as f64 + 0.25)
}
