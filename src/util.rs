// Parsing and formatting helpers.
//
// Cell text from the statistics export is messy (full-width digits, thousands
// separators, placeholder marks), so everything numeric goes through here.
use num_format::{Locale, ToFormattedString};

/// Map full-width digits and punctuation to their ASCII forms.
fn normalize_width(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            '－' | '−' => '-',
            '＋' => '+',
            '，' => ',',
            '．' => '.',
            '\u{3000}' => ' ',
            other => other,
        })
        .collect()
}

/// Parse a cell into `f64`, forgiving about formatting quirks.
///
/// - Trims whitespace (including the ideographic space).
/// - Strips thousands separators before parsing; exponent notation is fine.
/// - Returns `None` for anything that cannot be parsed or is not finite, so
///   `NaN`/`inf` spellings count as missing.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = normalize_width(s?);
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn format_number(n: f64, decimals: usize) -> String {
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // `num-format` inserts the commas into the integer portion; anything past
    // u128 keeps its plain digits.
    let mut res = match int_part.parse::<u128>() {
        Ok(v) => v.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Counts print without decimals; anything fractional keeps two places.
pub fn format_value(v: f64) -> String {
    if v.fract() == 0.0 {
        format_number(v, 0)
    } else {
        format_number(v, 2)
    }
}

pub fn format_cell(v: Option<f64>) -> String {
    v.map(format_value).unwrap_or_else(|| "-".to_string())
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}
