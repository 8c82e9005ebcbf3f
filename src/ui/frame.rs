//! Shared screen chrome: title bar, footer and line fitting.

use anyhow::Result;

use super::terminal::{Style, TerminalRenderer};

/// Truncates or pads `text` to exactly `width` characters.
pub fn fit(text: &str, width: usize) -> String {
    let mut out: String = text.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

/// Centred `=== title ===` on row 0 and a rule on row 1.
pub fn draw_header<T: TerminalRenderer>(renderer: &mut T, title: &str) -> Result<()> {
    let (width, _) = renderer.dimensions();
    let header = format!("=== {} ===", title);
    let col = (width as usize).saturating_sub(header.chars().count()) / 2;
    renderer.write_at(0, 0, &fit("", width as usize), Style::Normal)?;
    renderer.write_at(col as u16, 0, &header, Style::Header)?;
    renderer.write_at(0, 1, &"-".repeat(width as usize), Style::Header)
}

/// Rule on the second-to-last row and key help on the last.
pub fn draw_footer<T: TerminalRenderer>(renderer: &mut T, help: &str) -> Result<()> {
    let (width, height) = renderer.dimensions();
    if height < 2 {
        return Ok(());
    }
    renderer.write_at(0, height - 2, &"-".repeat(width as usize), Style::Header)?;
    renderer.write_at(
        2,
        height - 1,
        &fit(help, (width as usize).saturating_sub(2)),
        Style::Normal,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestScreen;

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdef", 3), "abc");
        assert_eq!(fit("héllo", 2), "hé");
        assert_eq!(fit("", 0), "");
    }

    #[test]
    fn test_header_and_footer_layout() {
        let mut screen = TestScreen::new(30, 10);
        draw_header(&mut screen, "Title").unwrap();
        draw_footer(&mut screen, "X: Exit").unwrap();

        assert_eq!(screen.line(0), format!("{}=== Title ===", " ".repeat(8)));
        assert_eq!(screen.line(1), "-".repeat(30));
        assert_eq!(screen.line(8), "-".repeat(30));
        assert_eq!(screen.line(9), "  X: Exit");
        assert_eq!(screen.style_at(10, 0), Style::Header);
    }
}
