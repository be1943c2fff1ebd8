//! # 캐시 구성 설정
//!
//! 기본값은 메모리 전용, 진단 메시지 없음.
//! JSON 파일에서 읽을 수 있고 `ABEL_BASIS_DIR` 환경 변수가 디렉토리를 덮어쓴다.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::cache::BasisCache;

/// 캐시 디렉토리를 지정하는 환경 변수
pub const BASIS_DIR_ENV: &str = "ABEL_BASIS_DIR";

/// 캐시 구성
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// 기저 저장 디렉토리. 없으면 메모리 전용.
    pub basis_dir: Option<PathBuf>,
    /// 조회/생성 메시지를 info 레벨로 출력
    pub verbose: bool,
}

impl CacheConfig {
    pub fn with_basis_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.basis_dir = Some(dir.into());
        self
    }

    /// JSON 설정 파일 로드
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("설정 파일을 열 수 없습니다: {}", path.display()))?;
        serde_json::from_reader(file)
            .with_context(|| format!("설정 파일 파싱 실패: {}", path.display()))
    }

    /// 환경 변수 값 적용. 빈 값은 무시한다.
    pub fn with_env_overrides(self) -> Self {
        self.with_basis_dir_override(std::env::var_os(BASIS_DIR_ENV).map(PathBuf::from))
    }

    fn with_basis_dir_override(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir.filter(|d| !d.as_os_str().is_empty()) {
            self.basis_dir = Some(dir);
        }
        self
    }

    /// 이 설정으로 내장 생성기 캐시 생성
    pub fn build_cache(&self) -> BasisCache {
        BasisCache::new(self.basis_dir.clone()).verbose(self.verbose)
    }
}
