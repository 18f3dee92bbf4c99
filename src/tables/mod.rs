//! 물성표 공통 타입과 선형 보간 엔진.
//!
//! 각 물성표 모듈은 행 구조체에 [`TableRow`]를 구현하고, 조회는 모두
//! [`lookup`] 하나를 거친다. 표는 생성 후 읽기 전용이므로 조회는 순수 함수다.

pub mod interpolation;

pub use interpolation::{is_strictly_increasing, lerp, lookup, ratio};

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::input::parse_number;

/// 조회 기준 열.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// 온도 [°C]
    Temperature,
    /// 압력 [Pa]
    Pressure,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Temperature => write!(f, "temperature"),
            Axis::Pressure => write!(f, "pressure"),
        }
    }
}

/// 표 범위를 벗어난 조회를 어떻게 처리할지 정한다.
///
/// 포화수/건공기 표는 거부, 증기표는 끝 행으로 클램프한다. 두 정책은
/// 기존 동작을 그대로 따르며 하나로 합치지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangePolicy {
    /// 범위 밖이면 `QueryError::Range`
    Reject,
    /// 범위 밖이면 가장 가까운 끝 행을 그대로 반환
    Clamp,
}

/// 클램프된 쪽.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

/// 결과 행이 만들어진 방식.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LookupSource {
    /// 축 값이 정확히 일치한 행
    Exact { index: usize },
    /// `lower`와 `upper` 행 사이 보간. `ratio`는 0~1.
    Interpolated {
        lower: usize,
        upper: usize,
        ratio: f64,
    },
    /// 범위 밖이라 끝 행으로 대체됨
    Clamped { bound: Bound },
}

/// 조회 결과. 행 전체와 그 출처를 함께 담는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookup<R> {
    pub row: R,
    pub axis: Axis,
    /// 사용자가 요청한 값(기준 단위)
    pub query: f64,
    pub source: LookupSource,
}

impl<R> Lookup<R> {
    pub fn is_clamped(&self) -> bool {
        matches!(self.source, LookupSource::Clamped { .. })
    }

    pub fn is_exact(&self) -> bool {
        matches!(self.source, LookupSource::Exact { .. })
    }
}

impl Axis {
    pub fn as_str(&self) -> &'static str {
        match self {
            Axis::Temperature => "temperature",
            Axis::Pressure => "pressure",
        }
    }
}

/// 이름과 범위 정책을 가진 읽기 전용 물성표.
#[derive(Debug, Clone)]
pub struct ReferenceTable<R> {
    name: &'static str,
    policy: RangePolicy,
    rows: Vec<R>,
}

impl<R: TableRow> ReferenceTable<R> {
    /// 행 목록으로 표를 만든다. 행은 기준 단위로 정규화된 상태여야 한다.
    pub fn new(name: &'static str, policy: RangePolicy, rows: Vec<R>) -> Self {
        debug_assert!(!rows.is_empty(), "{name}: empty table");
        debug_assert!(
            is_strictly_increasing(&rows, Axis::Temperature),
            "{name}: temperature column must be strictly increasing"
        );
        Self { name, policy, rows }
    }

    pub fn policy(&self) -> RangePolicy {
        self.policy
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }

    /// 축 열의 (최솟값, 최댓값). 축 열이 없으면 `None`.
    pub fn range(&self, axis: Axis) -> Option<(f64, f64)> {
        let min = self.rows.first()?.key(axis)?;
        let max = self.rows.last()?.key(axis)?;
        Some((min, max))
    }

    /// 기준 단위 값으로 조회한다.
    pub fn query(&self, axis: Axis, value: f64) -> Result<Lookup<R>, QueryError> {
        lookup(self.name, &self.rows, axis, value, self.policy)
    }

    /// 입력 문자열을 숫자로 바꾼 뒤 조회한다.
    pub fn query_text(&self, axis: Axis, text: &str) -> Result<Lookup<R>, QueryError> {
        let value = parse_number(axis.as_str(), text)?;
        self.query(axis, value)
    }
}

/// 물성표 한 행이 보간 엔진에 제공해야 하는 기능.
pub trait TableRow: Copy + std::fmt::Debug {
    /// 축 열의 값. 표에 해당 열이 없으면 `None`.
    fn key(&self, axis: Axis) -> Option<f64>;

    /// 축 열의 값을 덮어쓴다. 열이 없으면 아무것도 하지 않는다.
    fn set_key(&mut self, axis: Axis, value: f64);

    /// `self`(하한 행)와 `upper` 사이를 `ratio`로 선형 보간한 행.
    fn lerp(&self, upper: &Self, ratio: f64) -> Self;
}
