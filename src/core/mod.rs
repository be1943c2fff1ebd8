//! # 기저 캐시 핵심 모듈
//!
//! 이름 결정 → 메모리/디스크 조회 → 생성 및 저장

pub mod error;
pub mod method;
pub mod options;
pub mod naming;
pub mod npy;
pub mod store;
pub mod generator;
pub mod cache;
pub mod config;

// 주요 타입들 재수출
pub use error::{BasisError, Result};
pub use method::BasisMethod;
pub use options::BasisOptions;
pub use naming::{BasisName, LinbasexSuffix, BASIS_EXTENSION};
pub use store::{BasisStore, DirectoryStore};
pub use generator::{BasisGenerator, BuiltinGenerator};
pub use cache::{get_basis, BasisCache, BasisRequest, MemorySlot};
pub use config::CacheConfig;
