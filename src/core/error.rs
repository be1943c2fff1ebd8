//! 기저 캐시 에러 타입

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::method::BasisMethod;

/// 기저 캐시 에러
#[derive(Error, Debug)]
pub enum BasisError {
    /// 지원하지 않는 변환 방법
    #[error("basis generating function for method '{0}' not known")]
    Configuration(String),

    /// 디스크 읽기/쓰기 실패
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 손상되었거나 지원하지 않는 배열 파일
    #[error("invalid basis file {}: {reason}", .path.display())]
    InvalidArtifact { path: PathBuf, reason: String },

    /// 요청한 기저 함수 개수가 캐시된 열 개수보다 큼
    #[error("requested {requested} basis functions but cached basis {name} has only {available} columns")]
    PreconditionViolation {
        name: String,
        requested: usize,
        available: usize,
    },

    /// 생성 함수가 입력을 거부함
    #[error("failed to generate {method} basis: {reason}")]
    Generation { method: BasisMethod, reason: String },
}

impl BasisError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidArtifact {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// 조회 중 "파일 없음" 계열 실패 여부 (캐시 미스로 취급)
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// 디스크 계열 에러 여부
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::InvalidArtifact { .. })
    }
}

pub type Result<T> = std::result::Result<T, BasisError>;
