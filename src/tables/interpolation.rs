use tracing::debug;

use super::{Axis, Bound, Lookup, LookupSource, RangePolicy, TableRow};
use crate::error::{QueryError, RangeSide};

/// 구간 내 위치 비율 (x - x0) / (x1 - x0). 퇴화 구간(x1 == x0)이면 0.
pub fn ratio(x: f64, x0: f64, x1: f64) -> f64 {
    let dx = x1 - x0;
    if dx == 0.0 {
        0.0
    } else {
        (x - x0) / dx
    }
}

/// y0 + ratio * (y1 - y0)
pub fn lerp(y0: f64, y1: f64, ratio: f64) -> f64 {
    y0 + ratio * (y1 - y0)
}

/// 축 열이 행 순서대로 엄격히 증가하는지 확인한다.
pub fn is_strictly_increasing<R: TableRow>(rows: &[R], axis: Axis) -> bool {
    rows.windows(2).all(|pair| match (pair[0].key(axis), pair[1].key(axis)) {
        (Some(a), Some(b)) => a < b,
        _ => false,
    })
}

/// 정렬된 표에서 `axis` 기준으로 `value`에 해당하는 행을 찾거나 보간한다.
///
/// 1. 유한하지 않은 값(NaN, ±inf)은 정책과 무관하게 `Parse` 오류
/// 2. 범위 검사 (`policy`에 따라 거부 또는 끝 행 반환)
/// 3. 정확히 일치하는 행이 있으면 그대로 반환
/// 4. 이분 탐색으로 인접 두 행을 찾아 모든 열을 보간
///
/// 조회 축 열은 입력값으로 고정되고, 나머지 축 열(예: 압력 조회 시 온도)은 보간된다.
pub fn lookup<R: TableRow>(
    table: &'static str,
    rows: &[R],
    axis: Axis,
    value: f64,
    policy: RangePolicy,
) -> Result<Lookup<R>, QueryError> {
    if !value.is_finite() {
        return Err(QueryError::Parse {
            field: axis.as_str(),
            input: value.to_string(),
        });
    }
    // 빈 표이거나 축 열이 없는 표는 해당 축으로 조회할 수 없다.
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Err(QueryError::UnsupportedAxis { table, axis });
    };
    let (Some(min), Some(max)) = (first.key(axis), last.key(axis)) else {
        return Err(QueryError::UnsupportedAxis { table, axis });
    };

    let out_of_range = if value < min {
        Some((RangeSide::Below, Bound::Lower, *first))
    } else if value > max {
        Some((RangeSide::Above, Bound::Upper, *last))
    } else {
        None
    };
    if let Some((side, bound, edge)) = out_of_range {
        return match policy {
            RangePolicy::Reject => {
                debug!(table, %axis, value, min, max, "query rejected: out of range");
                Err(QueryError::Range {
                    axis,
                    value,
                    min,
                    max,
                    side,
                })
            }
            RangePolicy::Clamp => {
                debug!(table, %axis, value, ?bound, "query clamped to table edge");
                Ok(Lookup {
                    row: edge,
                    axis,
                    query: value,
                    source: LookupSource::Clamped { bound },
                })
            }
        };
    }

    let key = |row: &R| row.key(axis).unwrap_or(f64::NAN);
    let idx = rows.partition_point(|row| key(row) < value);

    if let Some(row) = rows.get(idx) {
        if key(row) == value {
            debug!(table, %axis, value, index = idx, "exact row match");
            return Ok(Lookup {
                row: *row,
                axis,
                query: value,
                source: LookupSource::Exact { index: idx },
            });
        }
    }

    let bracket = idx
        .checked_sub(1)
        .and_then(|lower| Some((lower, rows.get(lower)?, rows.get(idx)?)));
    let Some((lower_idx, lower, upper)) = bracket else {
        // 축 열이 단조 증가하지 않으면 여기에 도달할 수 있다.
        return Err(QueryError::Range {
            axis,
            value,
            min,
            max,
            side: RangeSide::Above,
        });
    };

    let r = ratio(value, key(lower), key(upper));
    let mut row = lower.lerp(upper, r);
    row.set_key(axis, value);
    debug!(table, %axis, value, lower = lower_idx, upper = idx, ratio = r, "interpolated");
    Ok(Lookup {
        row,
        axis,
        query: value,
        source: LookupSource::Interpolated {
            lower: lower_idx,
            upper: idx,
            ratio: r,
        },
    })
}
