//! Welcome banner: "PRO FINDER" in FIGlet letters with a vertical gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const TITLE: &str = "PRO FINDER";

/// Map-pin red (#e63946).
const PIN_RED: (u8, u8, u8) = (0xe6, 0x39, 0x46);
/// Sheet blue (#457b9d).
const SHEET_BLUE: (u8, u8, u8) = (0x45, 0x7b, 0x9d);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Banner art. Falls back to the plain title if the built-in font cannot render.
fn art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert(TITLE).map(|figure| figure.to_string()))
        .unwrap_or_else(|| TITLE.to_string())
}

pub fn print_welcome() {
    let mut out = stdout();
    let art = art();
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let t = if total <= 1 {
            1.0
        } else {
            i as f64 / (total - 1) as f64
        };
        let (r, g, b) = lerp_rgb(PIN_RED, SHEET_BLUE, t);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: SHEET_BLUE.0,
        g: SHEET_BLUE.1,
        b: SHEET_BLUE.2,
    }));
    let _ = out.execute(Print(format!(
        "v{}  local business prospecting\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(PIN_RED, SHEET_BLUE, 0.0), PIN_RED);
        assert_eq!(lerp_rgb(PIN_RED, SHEET_BLUE, 1.0), SHEET_BLUE);
    }

    #[test]
    fn test_art_is_multiline() {
        assert!(art().lines().count() > 1);
    }
}
