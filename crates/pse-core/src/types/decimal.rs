//! 가격 및 거래량 타입.

use rust_decimal::Decimal;

/// 가격 타입 (numeric(14, 5) 컬럼에 저장).
pub type Price = Decimal;

/// 거래량 (주식 수).
pub type Volume = u64;

/// 표시용 가격 소수점 자릿수.
pub const PRICE_DISPLAY_SCALE: u32 = 6;

/// 가격을 고정 소수점 6자리 문자열로 변환합니다 (예: "101.000000").
///
/// 6자리를 넘는 값은 은행가 반올림으로 정리한 뒤 출력합니다.
pub fn format_price(price: Price) -> String {
    let rounded = price.round_dp(PRICE_DISPLAY_SCALE);
    format!("{:.*}", PRICE_DISPLAY_SCALE as usize, rounded)
}
