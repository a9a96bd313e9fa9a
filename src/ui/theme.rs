use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border: Color,
    pub status_bg: Color,
    pub wall: Color,
    pub weight: Color,
    pub visited: Color,  // Teal for cells and nodes already looked at
    pub frontier: Color, // Yellow for the open set
    pub current: Color,  // Pink for the node being expanded
    pub path: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border: Color::Rgb(108, 112, 134),
    status_bg: Color::Rgb(50, 50, 70),
    wall: Color::Rgb(69, 71, 90),
    weight: Color::Rgb(180, 165, 120),
    visited: Color::Rgb(148, 226, 213),
    frontier: Color::Rgb(249, 226, 175),
    current: Color::Rgb(245, 194, 231),
    path: Color::Rgb(166, 227, 161),
};
