use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use log::*;

/// Format of the payment deadline stored on an order.
pub const PAY_END_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";
/// Order ids are creation timestamps in this compact format.
const ORDER_ID_FORMAT: &str = "%Y%m%d%H%M%S";
const PAY_END_DATE_SHAPE: &[u8] = b"dddd/dd/dd dd:dd:dd";
const ORDER_ID_SHAPE: &[u8] = b"dddddddddddddd";

/// chrono accepts unpadded fields, signed years and runs of whitespace, so the fixed layout is checked byte by byte
/// first. `d` in `shape` stands for an ASCII digit, anything else must match exactly.
fn has_shape(value: &str, shape: &[u8]) -> bool {
    value.len() == shape.len()
        && value.bytes().zip(shape.iter().copied()).all(|(b, s)| match s {
            b'd' => b.is_ascii_digit(),
            s => b == s,
        })
}

/// 0001-01-01T00:00:00Z, the value unreadable deadlines collapse to.
pub fn zero_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).single().unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Parses a payment deadline (UTC). Malformed values map to [`zero_time`], which is in the past for any realistic
/// clock, so unpaid orders with a broken deadline read as expired.
pub fn parse_pay_end_date(value: &str) -> DateTime<Utc> {
    if !has_shape(value, PAY_END_DATE_SHAPE) {
        debug!("PayEndDate '{value}' is not in YYYY/MM/DD HH:mm:ss form");
        return zero_time();
    }
    match NaiveDateTime::parse_from_str(value, PAY_END_DATE_FORMAT) {
        Ok(dt) => Utc.from_utc_datetime(&dt),
        Err(e) => {
            debug!("Could not parse PayEndDate '{value}'. {e}");
            zero_time()
        },
    }
}

/// Renders an order id of the form `YYYYMMDDHHmmss` as `YYYY/MM/DD HH:mm:ss`. Anything else is returned unchanged.
pub fn format_order_date(order_id: &str) -> String {
    if !has_shape(order_id, ORDER_ID_SHAPE) {
        return order_id.to_string();
    }
    match NaiveDateTime::parse_from_str(order_id, ORDER_ID_FORMAT) {
        Ok(dt) => dt.format(PAY_END_DATE_FORMAT).to_string(),
        Err(_) => order_id.to_string(),
    }
}
