// CSS color values -> uppercase RRGGBB, the only color form a run carries.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RGB_FN: Regex =
        Regex::new(r"(?i)^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*[0-9.]+%?\s*)?\)$")
            .unwrap();
}

const NAMED: &[(&str, &str)] = &[
    ("black", "000000"),
    ("silver", "C0C0C0"),
    ("gray", "808080"),
    ("grey", "808080"),
    ("white", "FFFFFF"),
    ("maroon", "800000"),
    ("red", "FF0000"),
    ("purple", "800080"),
    ("fuchsia", "FF00FF"),
    ("green", "008000"),
    ("lime", "00FF00"),
    ("olive", "808000"),
    ("yellow", "FFFF00"),
    ("navy", "000080"),
    ("blue", "0000FF"),
    ("teal", "008080"),
    ("aqua", "00FFFF"),
];

/// Parses a CSS `color` value. Returns `None` for anything we don't
/// understand (`inherit`, `currentColor`, hsl(), ...), which callers ignore.
pub fn parse_css_color(value: &str) -> Option<String> {
    let v = value.trim();
    if let Some(hex) = v.strip_prefix('#') {
        return parse_hex(hex);
    }
    if let Some(caps) = RGB_FN.captures(v) {
        let mut out = String::with_capacity(6);
        for i in 1..=3 {
            let n: u16 = caps[i].parse().ok()?;
            out.push_str(&format!("{:02X}", n.min(255)));
        }
        return Some(out);
    }
    let low = v.to_ascii_lowercase();
    NAMED
        .iter()
        .find(|(name, _)| *name == low)
        .map(|(_, hex)| hex.to_string())
}

fn parse_hex(hex: &str) -> Option<String> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => Some(
            hex.chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_uppercase(),
        ),
        6 => Some(hex.to_ascii_uppercase()),
        // #AARRGGBB as some office editors emit it; alpha dropped.
        8 => Some(hex[2..].to_ascii_uppercase()),
        _ => None,
    }
}

/// Validates a run color (RRGGBB or AARRGGBB, no `#`) and uppercases it.
pub fn normalize_run_color(color: &str) -> Option<String> {
    let c = color.trim().trim_start_matches('#');
    let ok = matches!(c.len(), 6 | 8) && c.chars().all(|ch| ch.is_ascii_hexdigit());
    ok.then(|| c.to_ascii_uppercase())
}

/// The RGB part of a run color, dropping a leading alpha byte.
pub fn rgb_part(color: &str) -> &str {
    if color.len() == 8 && color.is_ascii() {
        &color[2..]
    } else {
        color
    }
}

/// Black is the spreadsheet default font color and is treated as unset.
pub fn is_black(color: &str) -> bool {
    color.eq_ignore_ascii_case("000000") || color.eq_ignore_ascii_case("FF000000")
}
