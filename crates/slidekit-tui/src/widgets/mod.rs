mod popup;
pub mod slider;
mod status_bar;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub use popup::MenuWidget;
pub use slider::SliderWidget;
pub use status_bar::StatusBarWidget;

/// Truncate to a display width, marking the cut with an ellipsis
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(1);
        if used + w > max_width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
