//! en-IN number and rupee formatting (lakh/crore digit grouping).

pub const RUPEE: &str = "₹";

/// Groups an unsigned digit string the Indian way: the last three digits,
/// then pairs. "12345678" -> "1,23,45,678".
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

/// Rounds to `frac` digits and groups the integer part. Returns the sign
/// separately so currency symbols can sit between sign and digits.
fn grouped_parts(value: f64, frac: usize) -> (bool, String) {
    let rendered = format!("{:.*}", frac, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let mut out = group_indian(int_part);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }

    // "-0.00" is still zero
    let negative = value < 0.0 && out.chars().any(|c| c.is_ascii_digit() && c != '0');
    (negative, out)
}

/// Grouped number with at most `max_frac` fraction digits, trailing zeros
/// trimmed. 1234.5 -> "1,234.5", 1000.0 -> "1,000".
pub fn format_decimal(value: f64, max_frac: usize) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }

    let (negative, mut body) = grouped_parts(value, max_frac);
    if body.contains('.') {
        while body.ends_with('0') {
            body.pop();
        }
        if body.ends_with('.') {
            body.pop();
        }
    }

    if negative {
        format!("-{}", body)
    } else {
        body
    }
}

/// Plain grouped number, up to three fraction digits.
pub fn format_number(value: f64) -> String {
    format_decimal(value, 3)
}

/// Rupee amount with exactly two fraction digits: "₹1,00,000.00".
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "N/A".to_string();
    }
    let (negative, body) = grouped_parts(value, 2);
    if negative {
        format!("-{}{}", RUPEE, body)
    } else {
        format!("{}{}", RUPEE, body)
    }
}

/// Rupee amount with up to `max_frac` fraction digits, zeros trimmed.
pub fn format_rupees(value: f64, max_frac: usize) -> String {
    let body = format_decimal(value, max_frac);
    match body.strip_prefix('-') {
        Some(rest) => format!("-{}{}", RUPEE, rest),
        None if body == "N/A" => body,
        None => format!("{}{}", RUPEE, body),
    }
}

/// "+1.25%" / "-0.40%".
pub fn format_signed_pct(value: f64) -> String {
    let sign = if value >= 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, value)
}
