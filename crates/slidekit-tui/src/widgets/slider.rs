use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::truncate_to_width;
use crate::app::{App, SliderPanel};
use crate::theme::Theme;

/// Columns taken by one pagination dot (glyph + gap)
const DOT_STRIDE: u16 = 2;

pub struct SliderWidget;

impl SliderWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App, index: usize) {
        let Some(panel) = app.panels.get(index) else {
            return;
        };
        let theme = &app.theme;
        let is_focused = app.focus == index;

        let border_style = if is_focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.grey0)
        };

        let block = Block::default()
            .title(Self::title(panel, app.is_hovered(index)))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 2 || inner.width == 0 {
            return;
        }
        let track = Rect::new(inner.x, inner.y, inner.width, inner.height - 1);
        Self::render_track(frame, track, panel, theme);
        Self::render_dots(frame, dots_row(area), panel, theme);
    }

    fn title(panel: &SliderPanel, hovered: bool) -> String {
        let controller = &panel.controller;
        let mut title = format!(" {}", panel.kind.title());
        if let Some(category) = controller.active_category() {
            title.push_str(&format!(" · {}", category));
        }
        if controller.page_count() > 0 {
            title.push_str(&format!(
                " · {}/{}",
                controller.current_page() + 1,
                controller.page_count()
            ));
        }
        if controller.is_autoplaying() {
            title.push_str(" · ▶");
        } else if hovered && controller.config().pause_on_hover {
            title.push_str(" · ⏸");
        }
        title.push(' ');
        title
    }

    /// Draw every slide of the active sequence at its position on the strip,
    /// clipped to the track
    fn render_track(frame: &mut Frame, area: Rect, panel: &SliderPanel, theme: &Theme) {
        let controller = &panel.controller;
        let slides = controller.slides();
        if slides.is_empty() {
            let empty = Paragraph::new("No slides")
                .style(Style::default().fg(theme.grey1))
                .alignment(Alignment::Center);
            frame.render_widget(empty, area);
            return;
        }

        let view_frame = controller.view().frame();
        let track_width = f64::from(area.width);
        let card_width = track_width / controller.page_size().max(1) as f64;
        let shift = view_frame.offset_percent / 100.0 * track_width;

        for (position, &id) in slides.iter().enumerate() {
            let left = (position as f64 * card_width + shift).max(0.0);
            let right = ((position + 1) as f64 * card_width + shift).min(track_width);
            if right - left < 1.0 {
                continue;
            }

            let x = left.round() as u16;
            let width = (right.round() as u16).saturating_sub(x);
            if width == 0 {
                continue;
            }
            let card = Rect::new(area.x + x, area.y, width, area.height);
            Self::render_card(frame, card, panel, id, view_frame.dragging, theme);
        }
    }

    fn render_card(
        frame: &mut Frame,
        area: Rect,
        panel: &SliderPanel,
        id: usize,
        dragging: bool,
        theme: &Theme,
    ) {
        let Some(content) = panel.content(id) else {
            return;
        };

        let border = if dragging { theme.dragging } else { theme.grey1 };
        let title_width = area.width.saturating_sub(4) as usize;
        let block = Block::default()
            .title(format!(" {} ", truncate_to_width(&content.title, title_width)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.bg1));

        let mut lines = Vec::new();
        if let Some(category) = &content.category {
            lines.push(Line::from(Span::styled(
                category.clone(),
                Style::default().fg(theme.aqua).add_modifier(Modifier::ITALIC),
            )));
        }
        if let Some(body) = &content.body {
            lines.push(Line::from(Span::styled(
                body.clone(),
                Style::default().fg(theme.fg0),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }

    fn render_dots(frame: &mut Frame, area: Rect, panel: &SliderPanel, theme: &Theme) {
        let controller = &panel.controller;
        let active = controller.view().frame().active_page;

        let spans: Vec<Span> = controller
            .view()
            .dots()
            .iter()
            .map(|dot| {
                if active == Some(dot.page) {
                    Span::styled("● ", Style::default().fg(theme.active_dot))
                } else {
                    Span::styled("○ ", Style::default().fg(theme.inactive_dot))
                }
            })
            .collect();

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

/// Row holding the pagination dots of a panel drawn in `area`
pub fn dots_row(area: Rect) -> Rect {
    Rect::new(
        area.x.saturating_add(1),
        (area.y + area.height).saturating_sub(2),
        area.width.saturating_sub(2),
        1,
    )
}

/// Page of the dot under (`column`, `row`), if any
pub fn dot_at(area: Rect, dots: usize, column: u16, row: u16) -> Option<usize> {
    if area.height < 3 {
        return None;
    }
    let row_area = dots_row(area);
    if row != row_area.y || column < row_area.x {
        return None;
    }
    let offset = column - row_area.x;
    // The gap after a glyph does not count as a hit
    if offset % DOT_STRIDE != 0 {
        return None;
    }
    let page = usize::from(offset / DOT_STRIDE);
    (page < dots).then_some(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dots_row_is_last_inner_row() {
        let area = Rect::new(0, 10, 40, 8);
        assert_eq!(dots_row(area), Rect::new(1, 16, 38, 1));
    }

    #[test]
    fn test_dot_at() {
        let area = Rect::new(0, 10, 40, 8);
        assert_eq!(dot_at(area, 3, 1, 16), Some(0));
        assert_eq!(dot_at(area, 3, 5, 16), Some(2));
        assert_eq!(dot_at(area, 3, 2, 16), None);
        assert_eq!(dot_at(area, 3, 7, 16), None);
        assert_eq!(dot_at(area, 3, 1, 15), None);
    }
}
