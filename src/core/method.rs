//! 변환 방법 열거형
//!
//! 기저 행렬을 생성할 수 있는 변환 방법들의 닫힌 집합

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::BasisError;

/// 기저 행렬을 사용하는 변환 방법
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasisMethod {
    /// Lin-Basex (Legendre 다항식 기반 투영 기저)
    Linbasex,
    /// Dasch onion peeling
    OnionPeeling,
    /// Dasch three point
    ThreePoint,
    /// Dasch two point
    TwoPoint,
}

impl BasisMethod {
    pub const ALL: [BasisMethod; 4] = [
        BasisMethod::Linbasex,
        BasisMethod::OnionPeeling,
        BasisMethod::ThreePoint,
        BasisMethod::TwoPoint,
    ];

    /// 파일 이름에 쓰이는 식별자
    pub fn as_str(&self) -> &'static str {
        match self {
            BasisMethod::Linbasex => "linbasex",
            BasisMethod::OnionPeeling => "onion_peeling",
            BasisMethod::ThreePoint => "three_point",
            BasisMethod::TwoPoint => "two_point",
        }
    }

    /// 이름에 추가 옵션 세그먼트가 붙는 방법인지
    pub fn has_option_suffix(&self) -> bool {
        matches!(self, BasisMethod::Linbasex)
    }
}

impl fmt::Display for BasisMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BasisMethod {
    type Err = BasisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BasisMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| BasisError::Configuration(s.to_string()))
    }
}
