//! Text progress bars.

/// Default number of glyphs in a bar.
pub const DEFAULT_PROGRESS_WIDTH: usize = 10;

const FILLED: char = '█';
const EMPTY: char = '░';

/// Renders a bar of `width` glyphs for `percent` (clamped to `0..=100`).
///
/// `floor(percent * width / 100)` glyphs are filled.
///
/// # Example
///
/// ```
/// use tgkit_core::progress::render_progress_bar;
///
/// assert_eq!(render_progress_bar(50.0, 10), "█████░░░░░");
/// ```
pub fn render_progress_bar(percent: f64, width: usize) -> String {
    let percent = if percent.is_nan() { 0.0 } else { percent.clamp(0.0, 100.0) };
    let filled = ((percent * width as f64 / 100.0).floor() as usize).min(width);

    let mut bar = String::with_capacity(width * FILLED.len_utf8());
    bar.extend(std::iter::repeat_n(FILLED, filled));
    bar.extend(std::iter::repeat_n(EMPTY, width - filled));
    bar
}
