//! 방법별 기저 옵션
//!
//! 현재는 linbasex 만 옵션을 사용한다. 다른 방법에서는 무시된다.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// 이름에 쓰이는 기본 Legendre 차수 세그먼트
pub const DEFAULT_LEGENDRE_SEGMENT: &str = "02";
/// 이름에 쓰이는 기본 투영 각도 세그먼트
pub const DEFAULT_ANGLES_SEGMENT: &str = "050";
pub const DEFAULT_RADIAL_STEP: usize = 1;
pub const DEFAULT_CLIP: usize = 0;

/// linbasex 옵션 (모두 선택 사항)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BasisOptions {
    /// Legendre 다항식 차수
    pub legendre_orders: Option<Vec<u32>>,
    /// 투영 각도 (라디안)
    pub proj_angles: Option<Vec<f64>>,
    /// 반지름 격자 간격 (픽셀)
    pub radial_step: Option<usize>,
    /// 중심에서 잘라낼 반지름
    pub clip: Option<usize>,
}

impl BasisOptions {
    pub fn is_empty(&self) -> bool {
        *self == BasisOptions::default()
    }

    pub fn with_legendre_orders(mut self, orders: Vec<u32>) -> Self {
        self.legendre_orders = Some(orders);
        self
    }

    pub fn with_proj_angles(mut self, angles: Vec<f64>) -> Self {
        self.proj_angles = Some(angles);
        self
    }

    pub fn with_radial_step(mut self, step: usize) -> Self {
        self.radial_step = Some(step);
        self
    }

    pub fn with_clip(mut self, clip: usize) -> Self {
        self.clip = Some(clip);
        self
    }

    /// 생성에 실제로 쓰이는 Legendre 차수
    pub fn legendre_orders_or_default(&self) -> Vec<u32> {
        self.legendre_orders.clone().unwrap_or_else(|| vec![0, 2])
    }

    /// 생성에 실제로 쓰이는 투영 각도
    pub fn proj_angles_or_default(&self) -> Vec<f64> {
        self.proj_angles.clone().unwrap_or_else(|| vec![0.0, PI / 2.0])
    }

    pub fn radial_step_or_default(&self) -> usize {
        self.radial_step.unwrap_or(DEFAULT_RADIAL_STEP)
    }

    pub fn clip_or_default(&self) -> usize {
        self.clip.unwrap_or(DEFAULT_CLIP)
    }

    /// JSON 문자열에서 옵션 파싱 (CLI 용)
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}
