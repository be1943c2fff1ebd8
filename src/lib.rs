//! Abel 변환 기저 행렬 캐시
//!
//! 만드는 데 오래 걸리는 기저(연산자) 행렬을 호출자 메모리와 캐시 디렉토리에
//! 보관하고, 맞는 것이 없을 때만 생성해서 저장한다.

pub mod core;

// 핵심 모듈들 재수출
pub use crate::core::{
    get_basis, BasisCache, BasisError, BasisGenerator, BasisMethod, BasisName, BasisOptions,
    BasisRequest, BasisStore, BuiltinGenerator, CacheConfig, DirectoryStore, MemorySlot,
};
