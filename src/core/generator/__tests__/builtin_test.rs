//! 생성기 디스패치 테스트

use crate::core::error::{BasisError, Result};
use crate::core::generator::{BasisGenerator, BuiltinGenerator};
use crate::core::method::BasisMethod;
use crate::core::options::BasisOptions;
use ndarray::Array2;
use std::cell::Cell;

#[test]
fn 모든_방법_생성_테스트() {
    let generator = BuiltinGenerator;
    let options = BasisOptions::default();

    for method in BasisMethod::ALL {
        let basis = generator.generate(method, 16, &options).unwrap();
        assert!(basis.nrows() >= 16, "{} 기저 행 개수 부족", method);
        assert!(basis.iter().all(|v| v.is_finite()), "{} 기저에 비유한 값", method);
    }
}

#[test]
fn 정사각_연산자_테스트() {
    let generator = BuiltinGenerator;
    for method in [BasisMethod::OnionPeeling, BasisMethod::ThreePoint, BasisMethod::TwoPoint] {
        let basis = generator.generate(method, 40, &BasisOptions::default()).unwrap();
        assert_eq!(basis.dim(), (40, 40));
    }
}

#[test]
fn 크기_0_거부_테스트() {
    let err = BuiltinGenerator
        .generate(BasisMethod::TwoPoint, 0, &BasisOptions::default())
        .unwrap_err();
    assert!(matches!(err, BasisError::Generation { method: BasisMethod::TwoPoint, .. }));
}

#[test]
fn 클로저_생성기_테스트() {
    let calls = Cell::new(0);
    let generator = |_method: BasisMethod, size: usize, _options: &BasisOptions| -> Result<Array2<f64>> {
        calls.set(calls.get() + 1);
        Ok(Array2::<f64>::eye(size))
    };

    let basis = generator.generate(BasisMethod::ThreePoint, 3, &BasisOptions::default()).unwrap();
    assert_eq!(basis, Array2::<f64>::eye(3));
    assert_eq!(calls.get(), 1);
}
