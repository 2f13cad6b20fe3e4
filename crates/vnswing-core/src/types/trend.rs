//! 추세 상태 정의.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 종목의 현재 추세 상태.
///
/// SMA20/SMA50 대비 이격도로 판정되는 5단계 추세입니다.
/// 동일한 입력에 대해 항상 동일한 상태가 나오는 순수 분류입니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendState {
    /// 강한 상승 추세 (SMA20/50 모두 +5% 초과)
    StrongUp,
    /// 상승 추세 (SMA20/50 모두 +2% 초과)
    Uptrend,
    /// 횡보
    Sideways,
    /// 하락 추세 (SMA20/50 모두 -2% 미만)
    Downtrend,
    /// 강한 하락 추세 (SMA20/50 모두 -5% 미만)
    StrongDown,
}

impl TrendState {
    /// 상승 계열(STRONG_UP/UPTREND) 여부.
    pub fn is_up(&self) -> bool {
        matches!(self, TrendState::StrongUp | TrendState::Uptrend)
    }

    /// 하락 계열(STRONG_DOWN/DOWNTREND) 여부.
    pub fn is_down(&self) -> bool {
        matches!(self, TrendState::StrongDown | TrendState::Downtrend)
    }
}

impl fmt::Display for TrendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendState::StrongUp => write!(f, "strong_up"),
            TrendState::Uptrend => write!(f, "uptrend"),
            TrendState::Sideways => write!(f, "sideways"),
            TrendState::Downtrend => write!(f, "downtrend"),
            TrendState::StrongDown => write!(f, "strong_down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_labels() {
        assert_eq!(TrendState::StrongUp.to_string(), "strong_up");
        assert_eq!(TrendState::Sideways.to_string(), "sideways");
        assert_eq!(TrendState::StrongDown.to_string(), "strong_down");
    }

    #[test]
    fn test_direction_helpers() {
        assert!(TrendState::Uptrend.is_up());
        assert!(TrendState::StrongDown.is_down());
        assert!(!TrendState::Sideways.is_up());
        assert!(!TrendState::Sideways.is_down());
    }
}
