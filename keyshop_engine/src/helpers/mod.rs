mod checksum;
mod dates;

pub use checksum::{calculate_checksum, verify_checksum};
pub use dates::{format_order_date, parse_pay_end_date, zero_time, PAY_END_DATE_FORMAT};
