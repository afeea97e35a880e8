use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// 价格旁展示的近似值系数 (仅用于展示)
pub const PRICE_APPROX_FACTOR: Decimal = dec!(0.98);
/// 名义价值旁展示的近似值系数 (仅用于展示)
pub const NOTIONAL_APPROX_FACTOR: Decimal = dec!(1.02);

/// 四舍五入 (远离零) 到固定小数位，并补齐尾部的零
fn fixed(value: Decimal, decimals: u32) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(decimals);
    rounded
}

/// 整数部分按千分位插入逗号
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// # Summary
/// 按 en-US 习惯格式化美元金额。
///
/// # Logic
/// 1. 按 `decimals` 位四舍五入 (远离零)。
/// 2. 整数部分加千分位逗号，负号置于 `$` 之前；舍入后为零的负数不带负号。
///
/// # Arguments
/// * `value` - 金额。
/// * `decimals` - 固定小数位数。
///
/// # Returns
/// * 如 `"$3,744.70"`、`"-$242.48"`。
pub fn format_usd(value: Decimal, decimals: u32) -> String {
    let rounded = fixed(value, decimals);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    match frac_part {
        Some(frac) => format!("{}${}.{}", sign, group_thousands(int_part), frac),
        None => format!("{}${}", sign, group_thousands(int_part)),
    }
}

/// 价格：美元，两位小数
pub fn format_price(price: Decimal) -> String {
    format_usd(price, 2)
}

/// 名义价值：美元，不保留小数
pub fn format_notional(notional: Decimal) -> String {
    format_usd(notional, 0)
}

/// 数量：两位小数，不分组
pub fn format_quantity(quantity: Decimal) -> String {
    let rounded = fixed(quantity, 2);
    if rounded.is_zero() {
        // 避免输出 "-0.00"
        return fixed(Decimal::ZERO, 2).to_string();
    }
    rounded.to_string()
}

/// 盈亏：正数带 `+` 前缀
pub fn format_pnl(pnl: Decimal) -> String {
    if pnl > Decimal::ZERO {
        format!("+{}", format_price(pnl))
    } else {
        format_price(pnl)
    }
}

/// 持仓时长，如 `"118H 33M"`
pub fn format_holding_time(minutes: u32) -> String {
    format!("{}H {}M", minutes / 60, minutes % 60)
}

/// 成交时间，如 `"10/23, 6:43 AM"`
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format("%m/%d, %-I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec!(3744.70)), "$3,744.70");
        assert_eq!(format_price(dec!(3744.7)), "$3,744.70");
        assert_eq!(format_price(dec!(2.4666)), "$2.47");
        assert_eq!(format_price(dec!(0)), "$0.00");
        assert_eq!(format_price(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(format_price(dec!(-242.48)), "-$242.48");
        assert_eq!(format_price(dec!(-0.001)), "$0.00");
    }

    #[test]
    fn test_format_notional() {
        assert_eq!(format_notional(dec!(10972)), "$10,972");
        assert_eq!(format_notional(dec!(999.5)), "$1,000");
        assert_eq!(format_notional(dec!(100)), "$100");
    }

    #[test]
    fn test_formatting_is_idempotent() {
        let once = format_price(dec!(3744.70));
        let twice = format_price(dec!(3744.70));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_approximate_values() {
        assert_eq!(format_price(dec!(3744.7) * PRICE_APPROX_FACTOR), "$3,669.81");
        assert_eq!(format_notional(dec!(10972) * NOTIONAL_APPROX_FACTOR), "$11,191");
    }

    #[test]
    fn test_format_quantity_and_pnl() {
        assert_eq!(format_quantity(dec!(-2.93)), "-2.93");
        assert_eq!(format_quantity(dec!(3542.0)), "3542.00");
        assert_eq!(format_quantity(dec!(-0.001)), "0.00");
        assert_eq!(format_pnl(dec!(12.5)), "+$12.50");
        assert_eq!(format_pnl(dec!(0)), "$0.00");
        assert_eq!(format_pnl(dec!(-657.41)), "-$657.41");
    }

    #[test]
    fn test_format_times() {
        assert_eq!(format_holding_time(238), "3H 58M");
        assert_eq!(format_holding_time(7113), "118H 33M");
        let ts = NaiveDate::from_ymd_opt(2025, 10, 23)
            .and_then(|d| d.and_hms_opt(6, 43, 0))
            .unwrap();
        assert_eq!(format_timestamp(&ts), "10/23, 6:43 AM");
        let pm = NaiveDate::from_ymd_opt(2025, 10, 23)
            .and_then(|d| d.and_hms_opt(15, 9, 0))
            .unwrap();
        assert_eq!(format_timestamp(&pm), "10/23, 3:09 PM");
    }
}
