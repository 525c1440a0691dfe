use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;

pub struct MenuWidget;

impl MenuWidget {
    /// Render the navigation menu over the page
    pub fn render(frame: &mut Frame, app: &App) {
        let theme = &app.theme;
        let area = frame.area();

        let popup_width = 36u16.min(area.width.saturating_sub(4));
        let popup_height = (app.panels.len() as u16 + 4).min(area.height.saturating_sub(2));
        let popup_area = centered_rect(popup_width, popup_height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(" Menu ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let mut lines: Vec<Line> = app
            .panels
            .iter()
            .enumerate()
            .map(|(i, panel)| {
                if i == app.menu_cursor {
                    Line::from(Span::styled(
                        format!("> {}", panel.kind.title()),
                        Style::default()
                            .fg(theme.yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else if app.is_section_active(panel.kind) {
                    Line::from(Span::styled(
                        format!("  {}", panel.kind.title()),
                        Style::default().fg(theme.accent),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {}", panel.kind.title()),
                        Style::default().fg(theme.fg0),
                    ))
                }
            })
            .collect();
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "j/k move  enter go  esc close",
            Style::default().fg(theme.grey1),
        )));

        frame.render_widget(Paragraph::new(lines).block(block), popup_area);
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
