//! Colombian peso amounts as users type and read them.

/// Parse "300.000.000" (or "300,000,000", or "300000000") into whole pesos.
///
/// Dots and commas are grouping separators. Returns `None` for empty input,
/// any other non-digit, or overflow.
pub fn parse_cop(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    if trimmed.is_empty() {
        return None;
    }

    let mut value: i64 = 0;
    let mut digits = 0;
    for c in trimmed.chars() {
        match c {
            '.' | ',' => continue,
            '0'..='9' => {
                value = value
                    .checked_mul(10)?
                    .checked_add(i64::from(c as u8 - b'0'))?;
                digits += 1;
            }
            _ => return None,
        }
    }
    (digits > 0).then_some(value)
}

/// Render whole pesos as "$ 300.000.000".
pub fn format_cop(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-$ {grouped}")
    } else {
        format!("$ {grouped}")
    }
}
