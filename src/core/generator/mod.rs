//! # 기저 행렬 생성
//!
//! 방법별 생성 함수는 `(size, options) → 행렬` 순수 함수다.
//! 캐시 코어는 [`BasisGenerator`] 트레이트만 보고, 기본 구현인
//! [`BuiltinGenerator`] 가 열거형 `match` 로 방법별 함수를 고른다.

pub mod dasch;
pub mod linbasex;

use ndarray::Array2;

use crate::core::error::{BasisError, Result};
use crate::core::method::BasisMethod;
use crate::core::options::BasisOptions;

/// 기저 행렬 생성기
pub trait BasisGenerator {
    /// `size` 행짜리 기저 행렬 생성. 열 개수는 방법이 정한다.
    fn generate(&self, method: BasisMethod, size: usize, options: &BasisOptions)
        -> Result<Array2<f64>>;
}

/// 클로저도 생성기로 쓸 수 있다 (테스트, 외부 구현 주입)
impl<F> BasisGenerator for F
where
    F: Fn(BasisMethod, usize, &BasisOptions) -> Result<Array2<f64>>,
{
    fn generate(&self, method: BasisMethod, size: usize, options: &BasisOptions)
        -> Result<Array2<f64>> {
        self(method, size, options)
    }
}

/// 내장 생성기: Dasch 3종 + linbasex
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinGenerator;

impl BasisGenerator for BuiltinGenerator {
    fn generate(&self, method: BasisMethod, size: usize, options: &BasisOptions)
        -> Result<Array2<f64>> {
        if size == 0 {
            return Err(BasisError::Generation {
                method,
                reason: "size must be positive".to_string(),
            });
        }

        match method {
            BasisMethod::Linbasex => linbasex::bs_linbasex(size, options),
            BasisMethod::OnionPeeling => dasch::bs_onion_peeling(size),
            BasisMethod::ThreePoint => Ok(dasch::bs_three_point(size)),
            BasisMethod::TwoPoint => Ok(dasch::bs_two_point(size)),
        }
    }
}

#[cfg(test)]
pub mod __tests__;
