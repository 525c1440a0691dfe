use ratatui::style::Color;

/// Runtime theme colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Background colors
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,

    // Foreground colors
    pub fg0: Color,
    pub grey0: Color,
    pub grey1: Color,
    pub grey2: Color,

    // Palette colors
    pub yellow: Color,
    pub green: Color,
    pub aqua: Color,

    // Semantic colors
    pub accent: Color,
    pub active_dot: Color,
    pub inactive_dot: Color,
    pub dragging: Color,
    pub warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Material dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg1: Color::Rgb(0x32, 0x30, 0x2f),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey0: Color::Rgb(0x7c, 0x6f, 0x64),
            grey1: Color::Rgb(0x92, 0x83, 0x74),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            yellow: Color::Rgb(0xd8, 0xa6, 0x57),
            green: Color::Rgb(0xa9, 0xb6, 0x65),
            aqua: Color::Rgb(0x89, 0xb4, 0x82),
            accent: Color::Rgb(0x89, 0xb4, 0x82),
            active_dot: Color::Rgb(0xd8, 0xa6, 0x57),
            inactive_dot: Color::Rgb(0x7c, 0x6f, 0x64),
            dragging: Color::Rgb(0xe7, 0x8a, 0x4e),
            warning: Color::Rgb(0xe7, 0x8a, 0x4e),
        }
    }
}
