//! Verification code for gateway settlement notices.
//!
//! The gateway signs each notice with a short numeric code derived from the merchant's verification code, the purchase
//! amount and the tail of the gateway's transaction id:
//!
//! 1. `A`: the merchant code, left-padded with `0` to four characters.
//! 2. `B`: the purchase amount as an integer, zero-padded to eight characters.
//! 3. `C`: the last four bytes of the transaction id, non-digits replaced by `9`, left-padded with `0` to four.
//! 4. The code is `3 × Σ(digits at even positions) + 9 × Σ(digits at odd positions)` over `A‖B‖C`, counting positions
//!    from 1.

/// Returns true if `received` is the verification code for the given notice fields.
///
/// An empty merchant code never validates, and neither does a received code that is not an integer. Surrounding
/// whitespace makes the code unreadable.
pub fn verify_checksum(merchant_code: &str, purchase_amount: &str, transaction_suffix: &str, received: &str) -> bool {
    if merchant_code.is_empty() {
        return false;
    }
    match received.parse::<i64>() {
        Ok(received) => calculate_checksum(merchant_code, purchase_amount, transaction_suffix) == received,
        Err(_) => false,
    }
}

pub fn calculate_checksum(merchant_code: &str, purchase_amount: &str, transaction_suffix: &str) -> i64 {
    let digits = checksum_digits(merchant_code, purchase_amount, transaction_suffix);
    let (even, odd) = digits.chars().enumerate().fold((0i64, 0i64), |(even, odd), (i, c)| {
        let d = i64::from(c.to_digit(10).unwrap_or(0));
        if (i + 1) % 2 == 0 {
            (even + d, odd)
        } else {
            (even, odd + d)
        }
    });
    3 * even + 9 * odd
}

fn checksum_digits(merchant_code: &str, purchase_amount: &str, transaction_suffix: &str) -> String {
    let a = format!("{merchant_code:0>4}");
    // An unparseable amount contributes zeroes, as the gateway does
    let amount = purchase_amount.parse::<i64>().unwrap_or(0);
    let b = format!("{amount:08}");
    let c = format!("{:0>4}", suffix_digits(transaction_suffix));
    format!("{a}{b}{c}")
}

/// Maps the last four bytes of the transaction id to digits. Each whole character in that window contributes one digit,
/// and each byte of a character cut by the window counts as a non-digit.
fn suffix_digits(transaction_suffix: &str) -> String {
    let bytes = transaction_suffix.as_bytes();
    let mut tail = String::with_capacity(4);
    for chunk in bytes[bytes.len().saturating_sub(4)..].utf8_chunks() {
        tail.extend(chunk.valid().chars().map(|c| if c.is_ascii_digit() { c } else { '9' }));
        tail.extend(chunk.invalid().iter().map(|_| '9'));
    }
    tail
}
