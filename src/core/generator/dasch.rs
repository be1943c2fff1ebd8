//! Dasch (Appl. Opt. 31, 1146 (1992)) 역 Abel 연산자
//!
//! 세 방법 모두 정수 격자 반지름 `r_j = j` 를 쓰고 `f_i = Σ_j D[i, j] P_j` 형태의
//! 정사각 연산자를 만든다.

use std::f64::consts::PI;

use nalgebra::DMatrix;
use ndarray::Array2;

use crate::core::error::{BasisError, Result};
use crate::core::method::BasisMethod;

/// √((2j+1)² − 4i²)
#[inline]
fn chord(i: usize, j: f64) -> f64 {
    let i = i as f64;
    ((2.0 * j + 1.0).powi(2) - 4.0 * i * i).max(0.0).sqrt()
}

// ---------------------------------------------------------------- two point

/// two point 기저 함수 (j ≥ i)
fn two_point_j(i: usize, j: usize) -> f64 {
    let (fi, fj) = (i as f64, j as f64);
    let upper = ((fj + 1.0).powi(2) - fi * fi).sqrt() + fj + 1.0;
    let lower = (fj * fj - fi * fi).max(0.0).sqrt() + fj;
    (upper / lower).ln() / PI
}

/// two point 연산자. j < i 는 0 인 상삼각 행렬.
pub fn bs_two_point(cols: usize) -> Array2<f64> {
    let mut d = Array2::<f64>::zeros((cols, cols));
    if cols == 0 {
        return d;
    }

    for i in 0..cols {
        for j in i..cols {
            if i == 0 && j < 2 {
                continue;
            }
            d[[i, j]] = if j == i {
                two_point_j(i, j)
            } else {
                two_point_j(i, j) - two_point_j(i, j - 1)
            };
        }
    }

    // J(0, 0) 는 발산하므로 중심 원소는 극한값으로 대체
    d[[0, 0]] = 2.0 / PI;
    if cols > 1 {
        d[[0, 1]] = two_point_j(0, 1) - 2.0 / PI;
    }
    d
}

// -------------------------------------------------------------- three point

/// I0(i, j) = (1/2π) ∫ dr / √(r² − i²), 구간 [j−½, j+½] ∩ [i, ∞)
fn three_point_i0(i: usize, j: usize) -> f64 {
    if j < i || (i == 0 && j == 0) {
        // i = j = 0 항은 대칭 (P₋₁ = P₁) 으로 상쇄된다
        return 0.0;
    }
    let fj = j as f64;
    let upper = chord(i, fj) + 2.0 * fj + 1.0;
    let lower = if j == i {
        2.0 * fj
    } else {
        chord(i, fj - 1.0) + 2.0 * fj - 1.0
    };
    (upper / lower).ln() / (2.0 * PI)
}

/// I1(i, j) = (1/π) ∫ (r − j) / √(r² − i²), 같은 구간
fn three_point_i1(i: usize, j: usize) -> f64 {
    if j < i {
        return 0.0;
    }
    let fj = j as f64;
    let sqrt_part = if j == i {
        chord(i, fj)
    } else {
        chord(i, fj) - chord(i, fj - 1.0)
    };
    sqrt_part / (2.0 * PI) - 2.0 * fj * three_point_i0(i, j)
}

/// three point 연산자. j < i − 1 은 0.
pub fn bs_three_point(cols: usize) -> Array2<f64> {
    let mut d = Array2::<f64>::zeros((cols, cols));

    for i in 0..cols {
        for j in i.saturating_sub(1)..cols {
            let mut value = three_point_i0(i, j + 1) - three_point_i1(i, j + 1)
                + 2.0 * three_point_i1(i, j);
            if j >= 1 {
                value -= three_point_i0(i, j - 1) + three_point_i1(i, j - 1);
            }
            d[[i, j]] = value;
        }
    }

    // 중심 구간의 P₋₁ 을 P₁ 로 접는다
    if cols > 1 {
        d[[0, 1]] -= three_point_i1(0, 0);
    }
    d
}

// ------------------------------------------------------------ onion peeling

/// onion peeling 가중치 행렬: 반지름 j 고리를 높이 i 에서 지나는 현의 길이
pub(crate) fn onion_peeling_weights(cols: usize) -> DMatrix<f64> {
    DMatrix::from_fn(cols, cols, |i, j| {
        if j < i {
            0.0
        } else if j == i {
            chord(i, j as f64)
        } else {
            chord(i, j as f64) - chord(i, j as f64 - 1.0)
        }
    })
}

/// onion peeling 연산자 = 가중치 행렬의 역행렬
pub fn bs_onion_peeling(cols: usize) -> Result<Array2<f64>> {
    let w = onion_peeling_weights(cols);
    let d = w
        .solve_upper_triangular(&DMatrix::identity(cols, cols))
        .ok_or_else(|| BasisError::Generation {
            method: BasisMethod::OnionPeeling,
            reason: "weight matrix is singular".to_string(),
        })?;

    Ok(Array2::from_shape_fn((cols, cols), |(i, j)| d[(i, j)]))
}
