//! Price text normalization.
//!
//! Search pages mix currency symbols, Arabic-script labels, US grouping
//! (`1,299.00`) and European grouping (`1.299,00`); one heuristic handles
//! all of them without per-site configuration.

/// Normalizes raw price text into a positive decimal value.
///
/// Returns `None` when the text carries no parseable number. Callers apply
/// their own `> 0` check before accepting the value.
pub fn parse_price(text: &str) -> Option<f64> {
    let cleaned: String =
        text.chars().filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',')).collect();

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        // Both separators present: the one occurring last is the decimal
        // mark, the other groups thousands.
        (Some(comma), Some(dot)) if comma > dot => {
            cleaned.replace('.', "").replace(',', ".")
        }
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        // Comma only: a single trailing group of <= 2 digits is a decimal
        // part, anything else is thousands grouping.
        (Some(_), None) => {
            let parts: Vec<&str> = cleaned.split(',').collect();
            if parts.len() == 2 && parts[1].len() <= 2 {
                cleaned.replace(',', ".")
            } else {
                cleaned.replace(',', "")
            }
        }
        _ => cleaned,
    };

    leading_number(&normalized)
}

/// Extracts the first maximal `integer[.fraction]` substring and parses it.
fn leading_number(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];

    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in rest.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot {
            // A dot belongs to the number only when a digit follows it.
            match rest[i + 1..].chars().next() {
                Some(d) if d.is_ascii_digit() => seen_dot = true,
                _ => break,
            }
        } else {
            break;
        }
    }

    rest[..end].parse().ok()
}
