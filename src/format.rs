// src/format.rs
// Number and value rendering shared by every handler
//
// Un-rounded results use the shortest decimal that round-trips to the same
// f64. Plain notation is used for magnitudes in [1e-6, 1e21); outside that
// range the mantissa/exponent form `1.5e-7` / `1e+21` is used. Negative zero
// renders as `0`, non-finite values as `NaN` / `Infinity` / `-Infinity`.

/// Render a float with the default (shortest round-trip) rule
pub fn num(x: f64) -> String {
    if let Some(s) = non_finite(x) {
        return s;
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let magnitude = x.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{}", x);
    }

    // Rust's `{:e}` already yields the shortest mantissa; only the sign of a
    // non-negative exponent differs.
    let sci = format!("{:e}", x);
    match sci.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => sci,
    }
}

/// Render a float with a fixed number of decimal places
pub fn fixed(x: f64, decimals: usize) -> String {
    if let Some(s) = non_finite(x) {
        return s;
    }
    let s = format!("{:.*}", decimals, x);
    // A negative value that rounds to zero renders without its sign
    match s.strip_prefix('-') {
        Some(rest) if rest.bytes().all(|b| b == b'0' || b == b'.') => rest.to_string(),
        _ => s,
    }
}

/// Render a ratio as a percentage with a fixed number of decimals
pub fn percent(ratio: f64, decimals: usize) -> String {
    format!("{}%", fixed(ratio * 100.0, decimals))
}

/// Join a list of floats with `", "` using the default rule
pub fn list(values: &[f64]) -> String {
    values.iter().map(|v| num(*v)).collect::<Vec<_>>().join(", ")
}

/// Render a complex number as `a + bi`, `a - bi`, `bi` or `a`
pub fn complex(real: f64, imag: f64) -> String {
    if imag == 0.0 {
        return num(real);
    }
    if real == 0.0 {
        return match imag {
            i if i == 1.0 => "i".to_string(),
            i if i == -1.0 => "-i".to_string(),
            i => format!("{}i", num(i)),
        };
    }
    let imag_part = if imag.abs() == 1.0 {
        "i".to_string()
    } else {
        format!("{}i", num(imag.abs()))
    };
    if imag >= 0.0 {
        format!("{} + {}", num(real), imag_part)
    } else {
        format!("{} - {}", num(real), imag_part)
    }
}

/// Render matrix rows as `[a, b]` lines, optionally with fixed decimals
pub fn matrix(rows: &[Vec<f64>], decimals: Option<usize>) -> String {
    rows.iter()
        .map(|row| {
            let cells: Vec<String> = row
                .iter()
                .map(|v| match decimals {
                    Some(d) => fixed(*v, d),
                    None => num(*v),
                })
                .collect();
            format!("[{}]", cells.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn non_finite(x: f64) -> Option<String> {
    if x.is_nan() {
        Some("NaN".to_string())
    } else if x == f64::INFINITY {
        Some("Infinity".to_string())
    } else if x == f64::NEG_INFINITY {
        Some("-Infinity".to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_integers_have_no_fraction() {
        assert_eq!(num(120.0), "120");
        assert_eq!(num(-3.0), "-3");
        assert_eq!(num(0.0), "0");
        assert_eq!(num(-0.0), "0");
    }

    #[test]
    fn test_num_shortest_round_trip() {
        assert_eq!(num(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(num(2.5), "2.5");
        assert_eq!(num(0.000001), "0.000001");
    }

    #[test]
    fn test_num_exponent_forms() {
        assert_eq!(num(1e21), "1e+21");
        assert_eq!(num(1.5e-7), "1.5e-7");
        assert_eq!(num(7.257415615307994e306), "7.257415615307994e+306");
    }

    #[test]
    fn test_fixed_drops_sign_of_rounded_zero() {
        assert_eq!(fixed(-0.0, 2), "0.00");
        assert_eq!(fixed(-0.0001, 2), "0.00");
        assert_eq!(fixed(-0.4, 0), "0");
        assert_eq!(fixed(-0.005, 3), "-0.005");
        assert_eq!(fixed(-1.25, 1), "-1.2");
    }

    #[test]
    fn test_num_non_finite() {
        assert_eq!(num(f64::NAN), "NaN");
        assert_eq!(num(f64::INFINITY), "Infinity");
        assert_eq!(num(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(3.14159, 2), "3.14");
        assert_eq!(fixed(1.0, 6), "1.000000");
        assert_eq!(fixed(-0.0, 2), "0.00");
        assert_eq!(percent(0.05, 2), "5.00%");
    }

    #[test]
    fn test_complex_forms() {
        assert_eq!(complex(3.0, 4.0), "3 + 4i");
        assert_eq!(complex(3.0, -4.0), "3 - 4i");
        assert_eq!(complex(0.0, 1.0), "i");
        assert_eq!(complex(0.0, -1.0), "-i");
        assert_eq!(complex(0.0, 2.5), "2.5i");
        assert_eq!(complex(2.0, 0.0), "2");
        assert_eq!(complex(2.0, -1.0), "2 - i");
    }

    #[test]
    fn test_matrix_rows() {
        let rows = vec![vec![1.0, 2.0], vec![3.0, 4.5]];
        assert_eq!(matrix(&rows, None), "[1, 2]\n[3, 4.5]");
        assert_eq!(matrix(&rows, Some(1)), "[1.0, 2.0]\n[3.0, 4.5]");
    }
}
