// File: crates/history-core/src/format.rs
// Summary: Rupee price formatting for labels, tooltips and axis ticks.

const RUPEE: char = '₹';

/// Group an integer the Indian way: last three digits, then pairs (12,34,567).
fn group_indian(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    let lead = head.len() % 2;
    if lead == 1 {
        out.push_str(&head[..1]);
    }
    for (i, pair) in head.as_bytes()[lead..].chunks(2).enumerate() {
        if i > 0 || lead == 1 {
            out.push(',');
        }
        out.extend(pair.iter().map(|&b| b as char));
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// Full price, e.g. `₹7,999`, `₹1,23,456.50`, `-₹2,500`.
/// Paise are shown only when non-zero after rounding to two places.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{RUPEE}{amount}");
    }
    let paise = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && paise > 0 { "-" } else { "" };
    let (whole, frac) = (paise / 100, paise % 100);
    if frac == 0 {
        format!("{sign}{RUPEE}{}", group_indian(whole))
    } else {
        format!("{sign}{RUPEE}{}.{frac:02}", group_indian(whole))
    }
}

/// Short tick label: `₹850`, `₹12.5K`, `₹1.2L`, `₹3.4Cr`.
pub fn format_compact_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("{RUPEE}{amount}");
    }
    let abs = amount.abs();
    let sign = if amount < 0.0 && abs.round() > 0.0 { "-" } else { "" };
    let (scaled, suffix) = if abs >= 1e7 {
        (abs / 1e7, "Cr")
    } else if abs >= 1e5 {
        (abs / 1e5, "L")
    } else if abs >= 1e3 {
        (abs / 1e3, "K")
    } else {
        return format!("{sign}{RUPEE}{}", abs.round() as u64);
    };
    let mut num = format!("{scaled:.1}");
    if num.ends_with(".0") {
        num.truncate(num.len() - 2);
    }
    format!("{sign}{RUPEE}{num}{suffix}")
}
