//! Lin-Basex 투영 기저 (Gerber et al., Rev. Sci. Instrum. 84, 033101 (2013))
//!
//! 반지름 r, Legendre 차수 l 인 얇은 구각을 각도 θ 방향 축에 투영하면
//! `P_l(cos θ) · P_l(x / r) / r` (|x| ≤ r) 이 된다. 이것을 모든 투영 각도와
//! 이미지 열에 대해 행으로, 모든 차수와 반지름에 대해 열로 늘어놓는다.
//!
//! 행 인덱스: `angle_idx * cols + column`, 열 인덱스: `order_idx * n_radii + radius_idx`

use ndarray::Array2;

use crate::core::error::{BasisError, Result};
use crate::core::method::BasisMethod;
use crate::core::options::BasisOptions;

/// Legendre 다항식 P_l(x), 3항 점화식
pub fn legendre(l: u32, x: f64) -> f64 {
    let (mut prev, mut curr) = (1.0, x);
    if l == 0 {
        return prev;
    }
    for n in 1..l {
        let n = n as f64;
        let next = ((2.0 * n + 1.0) * x * curr - n * prev) / (n + 1.0);
        prev = curr;
        curr = next;
    }
    curr
}

fn rejected(reason: impl Into<String>) -> BasisError {
    BasisError::Generation {
        method: BasisMethod::Linbasex,
        reason: reason.into(),
    }
}

/// 사용될 반지름 목록: clip, clip + step, ... ≤ cols / 2
pub fn radii(cols: usize, options: &BasisOptions) -> Result<Vec<usize>> {
    let step = options.radial_step_or_default();
    if step == 0 {
        return Err(rejected("radial_step must be positive"));
    }
    let clip = options.clip_or_default();
    let r_max = cols / 2;
    if clip > r_max {
        return Err(rejected(format!(
            "clip {} leaves no radii for image width {}",
            clip, cols
        )));
    }
    Ok((clip..=r_max).step_by(step).collect())
}

/// linbasex 기저 생성. 모양은 `(투영 수 × cols, 차수 수 × 반지름 수)`.
pub fn bs_linbasex(cols: usize, options: &BasisOptions) -> Result<Array2<f64>> {
    let orders = options.legendre_orders_or_default();
    let angles = options.proj_angles_or_default();
    if orders.is_empty() {
        return Err(rejected("legendre_orders must not be empty"));
    }
    if angles.is_empty() {
        return Err(rejected("proj_angles must not be empty"));
    }
    let radii = radii(cols, options)?;

    let centre = (cols / 2) as f64;
    let n_radii = radii.len();
    let mut basis = Array2::<f64>::zeros((angles.len() * cols, orders.len() * n_radii));

    for (a, &theta) in angles.iter().enumerate() {
        for (o, &l) in orders.iter().enumerate() {
            let angular = legendre(l, theta.cos());
            for (k, &r) in radii.iter().enumerate() {
                let col = o * n_radii + k;
                if r == 0 {
                    // 반지름 0 구각은 중심 픽셀의 등방성 점
                    if l == 0 {
                        basis[[a * cols + cols / 2, col]] = 1.0;
                    }
                    continue;
                }
                let r = r as f64;
                for c in 0..cols {
                    let x = c as f64 - centre;
                    if x.abs() <= r {
                        basis[[a * cols + c, col]] = angular * legendre(l, x / r) / r;
                    }
                }
            }
        }
    }

    Ok(basis)
}
