//! Human-readable number formatting for the detail panel.

use atlas_core::Coordinates;

/// Group digits in threes: `40218234` → `"40,218,234"`.
pub fn fmt_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Area with grouped digits, at most two decimals, and the unit:
/// `652230.0` → `"652,230 km²"`, `0.44` → `"0.44 km²"`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::as_conversions
)]
pub fn fmt_area(km2: f64) -> String {
    let hundredths = (km2.max(0.0) * 100.0).round() as u64;
    let whole = fmt_thousands(hundredths / 100);
    let frac = hundredths % 100;
    if frac == 0 {
        format!("{whole} km²")
    } else {
        let frac = format!("{frac:02}");
        format!("{whole}.{} km²", frac.trim_end_matches('0'))
    }
}

/// `"33, 65"`, or `N/A` when the record has no coordinates.
pub fn fmt_coordinates(coords: Option<Coordinates>) -> String {
    coords.map_or_else(|| "N/A".into(), |c| c.to_string())
}

/// Comma-joined list, or `N/A` when empty.
pub fn fmt_list<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        return "N/A".into();
    }
    items
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(", ")
}
