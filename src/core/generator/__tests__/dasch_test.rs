//! Dasch 연산자 테스트

use crate::core::generator::dasch::{
    bs_onion_peeling, bs_three_point, bs_two_point, onion_peeling_weights,
};
use approx::assert_abs_diff_eq;
use std::f64::consts::PI;

#[test]
fn two_point_상삼각_구조_테스트() {
    let d = bs_two_point(32);
    assert_eq!(d.dim(), (32, 32));

    for i in 0..32 {
        for j in 0..i {
            assert_eq!(d[[i, j]], 0.0, "D[{}, {}] 는 0 이어야 함", i, j);
        }
    }
    assert!(d.iter().all(|v| v.is_finite()));
}

#[test]
fn two_point_특수값_테스트() {
    let d = bs_two_point(8);

    assert_abs_diff_eq!(d[[0, 0]], 2.0 / PI, epsilon = 1e-15);
    // J(0, 1) = ln(2) / π
    assert_abs_diff_eq!(d[[0, 1]], 2.0f64.ln() / PI - 2.0 / PI, epsilon = 1e-12);
    // i = 0 행: J(0, j) − J(0, j−1) = ln((j+1)(j−1) / j²) / π
    assert_abs_diff_eq!(d[[0, 3]], (8.0f64 / 9.0).ln() / PI, epsilon = 1e-12);
}

#[test]
fn three_point_띠_구조_테스트() {
    let d = bs_three_point(32);
    assert_eq!(d.dim(), (32, 32));

    for i in 2..32 {
        for j in 0..i - 1 {
            assert_eq!(d[[i, j]], 0.0, "D[{}, {}] 는 0 이어야 함", i, j);
        }
    }
    // 바로 아래 대각은 채워진다
    assert!(d[[5, 4]] != 0.0);
    assert!(d.iter().all(|v| v.is_finite()));
}

#[test]
fn onion_peeling_역행렬_테스트() {
    let n = 24;
    let d = bs_onion_peeling(n).unwrap();
    let w = onion_peeling_weights(n);

    for i in 0..n {
        for j in 0..n {
            let product: f64 = (0..n).map(|k| w[(i, k)] * d[[k, j]]).sum();
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_abs_diff_eq!(product, expected, epsilon = 1e-9);
        }
    }
}

#[test]
fn onion_peeling_가중치_대각_테스트() {
    let w = onion_peeling_weights(5);

    // W[i, i] = √(4i + 1)
    for i in 0..5 {
        assert_abs_diff_eq!(w[(i, i)], ((4 * i + 1) as f64).sqrt(), epsilon = 1e-12);
    }
    assert_eq!(w[(3, 1)], 0.0);
}

#[test]
fn 크기_1_연산자_테스트() {
    assert_eq!(bs_two_point(1).dim(), (1, 1));
    assert_eq!(bs_three_point(1).dim(), (1, 1));
    assert_eq!(bs_onion_peeling(1).unwrap().dim(), (1, 1));
}
