//! # 기저 저장소
//!
//! 캐시 코어가 디스크에 접근하는 유일한 경로. 기본 구현은 디렉토리 하나에
//! `.npy` 파일로 저장하는 [`DirectoryStore`] 다.
//!
//! 같은 디렉토리를 여러 프로세스가 동시에 쓰는 경우는 다루지 않는다.
//! 같은 이름을 동시에 저장하면 마지막 쓰기가 남는다.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ndarray::Array2;

use crate::core::error::{BasisError, Result};
use crate::core::method::BasisMethod;
use crate::core::naming::BasisName;
use crate::core::npy;

/// 기저 아티팩트 저장소
pub trait BasisStore {
    /// `{method}_basis*` 에 맞는 항목 이름들 (나열 순서 그대로, 정렬하지 않음)
    fn candidates(&self, method: BasisMethod) -> Result<Vec<String>>;

    /// 항목 전체 로드
    fn load(&self, file_name: &str) -> Result<Array2<f64>>;

    /// 항목 저장, 저장된 위치 반환
    fn save(&self, file_name: &str, basis: &Array2<f64>) -> Result<PathBuf>;

    /// 로그용 위치 표시
    fn location(&self, file_name: &str) -> PathBuf;
}

/// 디렉토리 기반 저장소
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BasisStore for DirectoryStore {
    fn candidates(&self, method: BasisMethod) -> Result<Vec<String>> {
        let prefix = BasisName::search_prefix(method);

        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            // 없는 디렉토리는 빈 검색 결과
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(BasisError::io(&self.dir, e)),
        };

        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| BasisError::io(&self.dir, e))?;
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if name.starts_with(&prefix) => names.push(name),
                Ok(_) => {}
                Err(raw) => log::debug!("skipping non UTF-8 entry {:?}", raw),
            }
        }
        Ok(names)
    }

    fn load(&self, file_name: &str) -> Result<Array2<f64>> {
        npy::load(&self.location(file_name))
    }

    fn save(&self, file_name: &str, basis: &Array2<f64>) -> Result<PathBuf> {
        let path = self.location(file_name);
        npy::save(&path, basis)?;
        Ok(path)
    }

    fn location(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}
