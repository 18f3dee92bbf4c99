//! 조회 한 건 단위로 발생하는 오류 분류.
//!
//! 모든 오류는 해당 조회에서만 복구 가능하며, 표 데이터는 절대 변경되지 않는다.

use thiserror::Error;

use crate::air::psychrometrics::PsychroError;
use crate::tables::Axis;

/// 범위를 벗어난 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSide {
    Below,
    Above,
}

impl std::fmt::Display for RangeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeSide::Below => write!(f, "below"),
            RangeSide::Above => write!(f, "above"),
        }
    }
}

/// 물성 조회/계산 오류.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// 입력 문자열이 유한한 숫자가 아님
    #[error("{field}: '{input}' is not a valid number")]
    Parse { field: &'static str, input: String },

    /// 입력값이 정의역(예: 상대습도 0~100%)을 벗어남
    #[error("{quantity} must be within {min}~{max} (got {value})")]
    InputRange {
        quantity: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// 조회값이 표의 범위를 벗어남 (거부 정책인 표에서만 발생)
    #[error("{axis} {value} is {side} data range ({min}~{max})")]
    Range {
        axis: Axis,
        value: f64,
        min: f64,
        max: f64,
        side: RangeSide,
    },

    /// 표에 해당 축 열이 없음
    #[error("{table} cannot be queried by {axis}")]
    UnsupportedAxis { table: &'static str, axis: Axis },

    /// 습공기 함수 계산 실패
    #[error("psychrometric evaluation failed: {0}")]
    Psychrometric(#[from] PsychroError),
}

impl QueryError {
    /// 언어팩 조회용 키. 표시 계층에서 사용자 메시지를 고를 때 쓴다.
    pub fn message_key(&self) -> &'static str {
        match self {
            QueryError::Parse { .. } => crate::i18n::keys::ERROR_PARSE,
            QueryError::InputRange { .. } => crate::i18n::keys::ERROR_INPUT_RANGE,
            QueryError::Range {
                side: RangeSide::Below,
                ..
            } => crate::i18n::keys::ERROR_RANGE_BELOW,
            QueryError::Range {
                side: RangeSide::Above,
                ..
            } => crate::i18n::keys::ERROR_RANGE_ABOVE,
            QueryError::UnsupportedAxis { .. } => crate::i18n::keys::ERROR_UNSUPPORTED_AXIS,
            QueryError::Psychrometric(_) => crate::i18n::keys::ERROR_PSYCHROMETRIC,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_error_mentions_bounds() {
        let err = QueryError::Range {
            axis: Axis::Temperature,
            value: -1.0,
            min: 0.0,
            max: 370.0,
            side: RangeSide::Below,
        };
        let msg = err.to_string();
        assert!(msg.contains("below"), "{msg}");
        assert!(msg.contains("370"), "{msg}");
    }

    #[test]
    fn message_keys_distinguish_sides() {
        let below = QueryError::Range {
            axis: Axis::Pressure,
            value: 1.0,
            min: 2.0,
            max: 3.0,
            side: RangeSide::Below,
        };
        let above = QueryError::Range {
            axis: Axis::Pressure,
            value: 4.0,
            min: 2.0,
            max: 3.0,
            side: RangeSide::Above,
        };
        assert_ne!(below.message_key(), above.message_key());
    }
}
