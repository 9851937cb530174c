// Rupee formatting with Indian digit grouping (12,34,567).

const MIN_FRACTION_DIGITS: usize = 2;

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

pub fn format_currency(amount: f64, max_fraction_digits: usize) -> String {
    let min_digits = MIN_FRACTION_DIGITS.min(max_fraction_digits);
    let fixed = format!("{:.*}", max_fraction_digits, amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac)) => (int_part, frac),
        None => (fixed.as_str(), ""),
    };

    let mut frac = frac_part.to_string();
    while frac.len() > min_digits && frac.ends_with('0') {
        frac.pop();
    }

    let sign = if amount < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    let grouped = group_indian(int_part);

    if frac.is_empty() {
        format!("{}₹{}", sign, grouped)
    } else {
        format!("{}₹{}.{}", sign, grouped, frac)
    }
}
