//! # 기저 캐시
//!
//! 조회 순서: 호출자 메모리 슬롯 → 캐시 디렉토리 → 생성 후 저장.
//!
//! - 메모리 슬롯은 방법과 행 개수만 본다 (linbasex 옵션은 비교하지 않음).
//! - 디스크는 나열 순서에서 처음 맞는 후보를 쓴다. 가장 작은 후보를 고르지 않는다.
//! - 디스크에서 읽은 기저는 `[..size, ..nbf]` 로 자르지만 새로 생성한 기저는 자르지 않는다.

use std::path::{Path, PathBuf};

use log::Level;
use ndarray::{s, Array2};

use crate::core::error::{BasisError, Result};
use crate::core::generator::{BasisGenerator, BuiltinGenerator};
use crate::core::method::BasisMethod;
use crate::core::naming::BasisName;
use crate::core::options::BasisOptions;
use crate::core::store::{BasisStore, DirectoryStore};

/// 기저 조회 키
#[derive(Debug, Clone, PartialEq)]
pub struct BasisRequest {
    pub method: BasisMethod,
    /// 요청 행 개수 (보통 이미지 폭)
    pub size: usize,
    /// 요청 열 개수
    pub num_basis_functions: usize,
    pub options: BasisOptions,
}

impl BasisRequest {
    pub fn new(method: BasisMethod, size: usize, num_basis_functions: usize) -> Self {
        Self {
            method,
            size,
            num_basis_functions,
            options: BasisOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BasisOptions) -> Self {
        self.options = options;
        self
    }

    /// 이 요청의 정규 이름
    pub fn name(&self) -> BasisName {
        BasisName::resolve(self.method, self.size, self.num_basis_functions, &self.options)
    }
}

/// 호출자가 들고 있는 직전 기저와 그 방법
#[derive(Debug, Clone, PartialEq)]
pub struct MemorySlot {
    basis: Array2<f64>,
    method: BasisMethod,
}

impl MemorySlot {
    pub fn new(method: BasisMethod, basis: Array2<f64>) -> Self {
        Self { basis, method }
    }

    pub fn basis(&self) -> &Array2<f64> {
        &self.basis
    }

    pub fn method(&self) -> BasisMethod {
        self.method
    }

    pub fn into_basis(self) -> Array2<f64> {
        self.basis
    }

    /// 행 개수가 충분하고 방법이 같으면 재사용 가능
    pub fn serves(&self, request: &BasisRequest) -> bool {
        self.method == request.method && self.basis.nrows() >= request.size
    }
}

/// 메모리 → 디스크 → 생성 순으로 기저를 찾는 캐시
///
/// `store` 가 없으면 메모리 전용 모드: 디스크를 읽지도 쓰지도 않는다.
pub struct BasisCache<G = BuiltinGenerator, S = DirectoryStore> {
    generator: G,
    store: Option<S>,
    verbose: bool,
}

impl BasisCache {
    /// 내장 생성기와 디렉토리 저장소로 캐시 생성
    pub fn new(basis_dir: Option<PathBuf>) -> Self {
        Self::with_parts(BuiltinGenerator, basis_dir.map(DirectoryStore::new))
    }

    pub fn memory_only() -> Self {
        Self::new(None)
    }
}

impl<G: BasisGenerator, S: BasisStore> BasisCache<G, S> {
    pub fn with_parts(generator: G, store: Option<S>) -> Self {
        Self {
            generator,
            store,
            verbose: false,
        }
    }

    /// 진단 메시지를 info 레벨로 올린다
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn store(&self) -> Option<&S> {
        self.store.as_ref()
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    fn level(&self) -> Level {
        if self.verbose {
            Level::Info
        } else {
            Level::Debug
        }
    }

    /// 기저 조회. 메모리 슬롯 → 디스크 → 생성/저장.
    pub fn get(&self, request: &BasisRequest, slot: Option<&MemorySlot>) -> Result<Array2<f64>> {
        if let Some(basis) = self.lookup_memory(request, slot) {
            return Ok(basis);
        }
        if let Some(basis) = self.lookup_disk(request)? {
            return Ok(basis);
        }
        self.generate_and_persist(request)
    }

    /// [`get`](Self::get) 후 결과를 슬롯에 기억한다
    pub fn get_and_remember(
        &self,
        request: &BasisRequest,
        slot: &mut Option<MemorySlot>,
    ) -> Result<Array2<f64>> {
        let basis = self.get(request, slot.as_ref())?;
        *slot = Some(MemorySlot::new(request.method, basis.clone()));
        Ok(basis)
    }

    /// 1단계: 메모리 슬롯. 자르지 않고 그대로 돌려준다.
    pub fn lookup_memory(
        &self,
        request: &BasisRequest,
        slot: Option<&MemorySlot>,
    ) -> Option<Array2<f64>> {
        let slot = slot.filter(|slot| slot.serves(request))?;
        log::log!(self.level(), "Using memory cached basis");
        Some(slot.basis().clone())
    }

    /// 2단계: 디스크 검색. 처음 맞는 후보를 읽어 요청 모양으로 자른다.
    pub fn lookup_disk(&self, request: &BasisRequest) -> Result<Option<Array2<f64>>> {
        let Some(store) = &self.store else {
            return Ok(None);
        };
        let wanted = request.name();

        for file_name in store.candidates(request.method)? {
            let Some(found) = BasisName::parse(request.method, &file_name) else {
                log::debug!("ignoring unrecognised basis file {}", file_name);
                continue;
            };
            if !found.can_serve(&wanted) {
                continue;
            }

            log::log!(
                self.level(),
                "Loading {} basis {}",
                request.method,
                store.location(&file_name).display()
            );
            let basis = match store.load(&file_name) {
                Ok(basis) => basis,
                Err(e) if e.is_not_found() => {
                    log::debug!("{} disappeared before loading, skipping", file_name);
                    continue;
                }
                Err(e) => return Err(e),
            };

            return trim_to_request(basis, request, &store.location(&file_name)).map(Some);
        }

        Ok(None)
    }

    /// 3단계: 생성 후 (저장소가 있으면) 저장. 열 개수는 자르지 않는다.
    pub fn generate_and_persist(&self, request: &BasisRequest) -> Result<Array2<f64>> {
        log::log!(
            self.level(),
            "A suitable basis for '{}' was not found. A new basis will be generated.",
            request.method
        );
        if self.store.is_some() {
            log::log!(
                self.level(),
                "But don't worry, it will be saved to disk for future use."
            );
        }

        let basis = self
            .generator
            .generate(request.method, request.size, &request.options)?;

        if let Some(store) = &self.store {
            let path = store.save(&request.name().file_name(), &basis)?;
            log::log!(
                self.level(),
                "Operator matrix saved for later use to {}",
                path.display()
            );
        }

        Ok(basis)
    }
}

/// 디스크에서 읽은 기저를 `[..size, ..nbf]` 로 자른다
fn trim_to_request(basis: Array2<f64>, request: &BasisRequest, path: &Path) -> Result<Array2<f64>> {
    let (rows, cols) = basis.dim();
    if request.size > rows {
        return Err(BasisError::invalid(
            path,
            format!(
                "file name promises at least {} rows but array has {}",
                request.size, rows
            ),
        ));
    }
    if request.num_basis_functions > cols {
        return Err(BasisError::PreconditionViolation {
            name: path.display().to_string(),
            requested: request.num_basis_functions,
            available: cols,
        });
    }

    Ok(basis
        .slice(s![..request.size, ..request.num_basis_functions])
        .to_owned())
}

/// 문자열 방법 이름을 받는 진입점
///
/// 알 수 없는 방법은 디스크나 생성기에 닿기 전에 `Configuration` 에러.
pub fn get_basis(
    method: &str,
    size: usize,
    num_basis_functions: usize,
    basis_dir: Option<&Path>,
    memory_slot: Option<&MemorySlot>,
    options: &BasisOptions,
    verbose: bool,
) -> Result<Array2<f64>> {
    let method: BasisMethod = method.parse()?;
    let request = BasisRequest::new(method, size, num_basis_functions).with_options(options.clone());

    BasisCache::new(basis_dir.map(Path::to_path_buf))
        .verbose(verbose)
        .get(&request, memory_slot)
}

#[cfg(test)]
pub mod __tests__;
