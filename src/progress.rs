use std::io::{self, Write};

const BAR_WIDTH: usize = 20;
/// Smallest fraction rendered, so the first call already shows something.
const MIN_FRACTION: f64 = 0.01001;

/// Renders `\r[=====               ] 25%  text` for item `index` (0-based) of `total`.
///
/// The leading carriage return redraws the bar in place; anything printed in
/// between starts a new bar.
pub fn format_progress_bar(index: usize, total: usize, post_text: &str) -> String {
    let fraction = if total == 0 {
        1.0
    } else {
        ((index + 1) as f64 / total as f64).clamp(MIN_FRACTION, 1.0)
    };

    let filled = "=".repeat((BAR_WIDTH as f64 * fraction) as usize);
    format!(
        "\r[{:<width$}] {}%  {}",
        filled,
        (100.0 * fraction) as usize,
        post_text,
        width = BAR_WIDTH
    )
}

pub fn print_progress_bar<W: Write>(
    out: &mut W,
    index: usize,
    total: usize,
    post_text: &str,
) -> io::Result<()> {
    out.write_all(format_progress_bar(index, total, post_text).as_bytes())?;
    out.flush()
}
