use ratatui::style::Color;

/// Fill colors for the category breakdown, cycled in order.
pub const SLICE_COLORS: [Color; 6] = [
    Color::Rgb(0x4F, 0x46, 0xE5),
    Color::Rgb(0x7C, 0x3A, 0xED),
    Color::Rgb(0xEC, 0x48, 0x99),
    Color::Rgb(0xEF, 0x44, 0x44),
    Color::Rgb(0xF5, 0x9E, 0x0B),
    Color::Rgb(0x10, 0xB9, 0x81),
];

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub border: Color,
    pub income: Color,
    pub expense: Color,
    pub error: Color,
}

impl Theme {
    pub fn slice(&self, index: usize) -> Color {
        SLICE_COLORS[index % SLICE_COLORS.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(8, 12, 16),
            surface: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(0x4F, 0x46, 0xE5),
            border: Color::Rgb(60, 66, 72),
            income: Color::Rgb(0x10, 0xB9, 0x81),
            expense: Color::Rgb(0xEF, 0x44, 0x44),
            error: Color::Rgb(200, 80, 80),
        }
    }
}
