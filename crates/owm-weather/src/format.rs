//! Number and text formatting for rendered weather values.

/// Round to the nearest integer when `round` is set, halves away from zero.
pub fn maybe_round(value: f64, round: bool) -> f64 {
    if round {
        value.round()
    } else {
        value
    }
}

/// Shortest decimal form: `73.0` prints as `73`, `72.6` as `72.6`.
pub fn format_number(value: f64) -> String {
    // Avoid printing "-0" for values that round to zero.
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

/// Round to an integer and group thousands with commas (`10000` → `10,000`).
pub fn format_grouped(value: f64) -> String {
    let rounded = value.round();
    if !rounded.is_finite() {
        return "0".to_string();
    }

    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Lower-case the text, then upper-case the first letter of each word.
pub fn title_case(text: &str) -> String {
    let lower = text.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut at_word_start = true;
    for c in lower.chars() {
        if at_word_start {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}
