//! # 기저 이름 결정
//!
//! 요청 파라미터에서 사람이 읽을 수 있는 기저 파일 이름을 만들고,
//! 같은 형식 정의로 캐시 디렉토리의 파일 이름을 다시 해석한다.
//!
//! 디스크 형식: `{method}_basis_{size}_{nbf}[_{legendre}_{angles}_{radial_step}_{clip}].npy`
//! 대괄호 부분은 linbasex 에만 붙는다.

use std::f64::consts::PI;
use std::fmt;

use crate::core::method::BasisMethod;
use crate::core::options::{
    BasisOptions, DEFAULT_ANGLES_SEGMENT, DEFAULT_CLIP, DEFAULT_LEGENDRE_SEGMENT,
    DEFAULT_RADIAL_STEP,
};

/// 기저 파일 확장자
pub const BASIS_EXTENSION: &str = "npy";

const SEPARATOR: char = '_';

/// linbasex 이름 뒤에 붙는 옵션 세그먼트 4개
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinbasexSuffix {
    pub legendre_orders: String,
    pub proj_angles: String,
    pub radial_step: usize,
    pub clip: usize,
}

impl LinbasexSuffix {
    /// 옵션에서 세그먼트 유도. 빠진 옵션은 기본값으로 채운다.
    pub fn from_options(options: &BasisOptions) -> Self {
        let legendre_orders = match &options.legendre_orders {
            Some(orders) => orders.iter().map(|l| l.to_string()).collect(),
            None => DEFAULT_LEGENDRE_SEGMENT.to_string(),
        };

        // 라디안을 π 의 백분율로 바꾸고 정수로 절삭
        let proj_angles = match &options.proj_angles {
            Some(angles) => angles
                .iter()
                .map(|a| ((a * 100.0 / PI) as i64).to_string())
                .collect(),
            None => DEFAULT_ANGLES_SEGMENT.to_string(),
        };

        Self {
            legendre_orders,
            proj_angles,
            radial_step: options.radial_step.unwrap_or(DEFAULT_RADIAL_STEP),
            clip: options.clip.unwrap_or(DEFAULT_CLIP),
        }
    }

    fn parse(segments: &[&str]) -> Option<Self> {
        match segments {
            [legendre, angles, step, clip] => Some(Self {
                legendre_orders: non_empty(legendre)?.to_string(),
                proj_angles: non_empty(angles)?.to_string(),
                radial_step: step.parse().ok()?,
                clip: clip.parse().ok()?,
            }),
            _ => None,
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    (!s.is_empty()).then_some(s)
}

impl fmt::Display for LinbasexSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}_{}",
            self.legendre_orders, self.proj_angles, self.radial_step, self.clip
        )
    }
}

/// 기저 아티팩트의 정규 이름
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasisName {
    pub method: BasisMethod,
    pub size: usize,
    pub num_basis_functions: usize,
    pub suffix: Option<LinbasexSuffix>,
}

impl BasisName {
    /// 요청 파라미터에서 이름 결정 (부작용 없음, 실패하지 않음)
    pub fn resolve(
        method: BasisMethod,
        size: usize,
        num_basis_functions: usize,
        options: &BasisOptions,
    ) -> Self {
        let suffix = method
            .has_option_suffix()
            .then(|| LinbasexSuffix::from_options(options));

        Self {
            method,
            size,
            num_basis_functions,
            suffix,
        }
    }

    /// 디렉토리 검색 접두어 (`{method}_basis`)
    pub fn search_prefix(method: BasisMethod) -> String {
        format!("{}_basis", method)
    }

    /// 디렉토리 검색 glob 패턴 (`{method}_basis*`)
    pub fn search_pattern(method: BasisMethod) -> String {
        format!("{}*", Self::search_prefix(method))
    }

    /// 확장자를 포함한 파일 이름
    pub fn file_name(&self) -> String {
        format!("{}.{}", self, BASIS_EXTENSION)
    }

    /// 캐시 디렉토리의 파일 이름을 해석한다.
    ///
    /// 다른 방법의 파일, 확장자가 다른 파일, 필드가 숫자가 아닌 파일은 `None`.
    pub fn parse(method: BasisMethod, file_name: &str) -> Option<Self> {
        let stem = file_name.strip_suffix(&format!(".{}", BASIS_EXTENSION))?;
        let fields = stem
            .strip_prefix(&Self::search_prefix(method))?
            .strip_prefix(SEPARATOR)?;

        let segments: Vec<&str> = fields.split(SEPARATOR).collect();
        let (size, num_basis_functions, rest) = match segments.as_slice() {
            [size, nbf, rest @ ..] => (size.parse().ok()?, nbf.parse().ok()?, rest),
            _ => return None,
        };

        let suffix = if method.has_option_suffix() {
            Some(LinbasexSuffix::parse(rest)?)
        } else if rest.is_empty() {
            None
        } else {
            return None;
        };

        Some(Self {
            method,
            size,
            num_basis_functions,
            suffix,
        })
    }

    /// 이 이름의 아티팩트로 `request` 를 잘라서 제공할 수 있는지
    pub fn can_serve(&self, request: &BasisName) -> bool {
        self.method == request.method && self.size >= request.size && self.suffix == request.suffix
    }
}

impl fmt::Display for BasisName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            Self::search_prefix(self.method),
            self.size,
            self.num_basis_functions
        )?;
        if let Some(suffix) = &self.suffix {
            write!(f, "_{}", suffix)?;
        }
        Ok(())
    }
}
