/// Pull a numeric value out of free-form price text such as
/// `"₹ 1,20,000 / month"`, for filtering and sorting.
///
/// Every character other than digits and `.` is dropped, then the longest
/// leading decimal number is parsed (so `"85.5 per sq.ft"` gives 85.5).
/// Returns 0 when nothing parses.
#[must_use]
pub fn extract_numeric_price(price: &str) -> f64 {
    let cleaned = price.chars().filter(|c| c.is_ascii_digit() || *c == '.');

    let mut number = String::new();
    let mut seen_dot = false;
    for c in cleaned {
        if c == '.' {
            if seen_dot {
                break;
            }
            seen_dot = true;
        }
        number.push(c);
    }

    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_plain_number() {
        assert!(approx(extract_numeric_price("45000"), 45000.0));
    }

    #[test]
    fn test_rupee_sign_and_indian_grouping() {
        assert!(approx(extract_numeric_price("₹ 1,20,000 / month"), 120_000.0));
    }

    #[test]
    fn test_trailing_dots_are_ignored() {
        assert!(approx(extract_numeric_price("₹85.5 per sq.ft"), 85.5));
        assert!(approx(extract_numeric_price("1.2.3"), 1.2));
    }

    #[test]
    fn test_unparseable_is_zero() {
        assert!(approx(extract_numeric_price("Price on request"), 0.0));
        assert!(approx(extract_numeric_price(""), 0.0));
        assert!(approx(extract_numeric_price("."), 0.0));
    }
}
