//! # Theme System
//!
//! Centralized colors for the TUI. Rendering code references [`Theme`]
//! fields instead of hardcoding `ratatui::style::Color` values; the active
//! theme can be cycled at runtime from the command palette and the choice
//! is persisted via [`crate::ui::config::Config`].

use ratatui::style::Color;

/// All colors used by the UI, grouped by semantic role.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Human-readable name displayed in the palette and persisted in config.
    pub name: &'static str,

    /// Main background color for panels and modals.
    pub bg: Color,
    /// Primary text color.
    pub fg: Color,
    /// Muted/secondary text (hints, separators, timestamps).
    pub fg_dim: Color,

    /// Primary accent: focused borders, selected rows, the active tab.
    pub accent: Color,
    /// Secondary accent: highlighted names, the dirty marker.
    pub secondary: Color,

    /// Success / green indicator.
    pub success: Color,
    /// Error / red indicator.
    pub error: Color,
    /// Informational / blue indicator (terminal `info` entries).
    pub info: Color,
}

impl Theme {
    /// All built-in themes (order = cycling order).
    pub fn all() -> &'static [Theme] {
        &BUILT_IN_THEMES
    }

    /// Find a built-in theme by name (case-insensitive).
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        BUILT_IN_THEMES
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// The default theme (Catppuccin Mocha).
    pub fn default_theme() -> &'static Theme {
        &BUILT_IN_THEMES[0]
    }

    /// The theme after `name` in cycling order, wrapping around.
    pub fn next_after(name: &str) -> &'static Theme {
        let index = BUILT_IN_THEMES
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
            .unwrap_or(0);
        &BUILT_IN_THEMES[(index + 1) % BUILT_IN_THEMES.len()]
    }
}

// ---------------------------------------------------------------------------
// Built-in theme definitions
// ---------------------------------------------------------------------------

static BUILT_IN_THEMES: [Theme; 5] = [
    // 0 - Catppuccin Mocha (default)
    Theme {
        name: "Catppuccin Mocha",
        bg: Color::Rgb(30, 30, 46),           // base
        fg: Color::Rgb(205, 214, 244),        // text
        fg_dim: Color::Rgb(108, 112, 134),    // overlay0
        accent: Color::Rgb(137, 180, 250),    // blue
        secondary: Color::Rgb(249, 226, 175), // yellow
        success: Color::Rgb(166, 227, 161),   // green
        error: Color::Rgb(243, 139, 168),     // red
        info: Color::Rgb(137, 220, 235),      // sky
    },
    // 1 - Dracula
    Theme {
        name: "Dracula",
        bg: Color::Rgb(40, 42, 54),
        fg: Color::Rgb(248, 248, 242),
        fg_dim: Color::Rgb(98, 114, 164),
        accent: Color::Rgb(139, 233, 253),    // cyan
        secondary: Color::Rgb(241, 250, 140), // yellow
        success: Color::Rgb(80, 250, 123),
        error: Color::Rgb(255, 85, 85),
        info: Color::Rgb(189, 147, 249), // purple
    },
    // 2 - Nord
    Theme {
        name: "Nord",
        bg: Color::Rgb(46, 52, 64),
        fg: Color::Rgb(216, 222, 233),
        fg_dim: Color::Rgb(76, 86, 106),
        accent: Color::Rgb(136, 192, 208),    // frost
        secondary: Color::Rgb(235, 203, 139), // yellow
        success: Color::Rgb(163, 190, 140),
        error: Color::Rgb(191, 97, 106),
        info: Color::Rgb(129, 161, 193),
    },
    // 3 - Tokyo Night
    Theme {
        name: "Tokyo Night",
        bg: Color::Rgb(26, 27, 38),
        fg: Color::Rgb(169, 177, 214),
        fg_dim: Color::Rgb(86, 95, 137),
        accent: Color::Rgb(122, 162, 247),    // blue
        secondary: Color::Rgb(224, 175, 104), // yellow
        success: Color::Rgb(115, 218, 202),
        error: Color::Rgb(247, 118, 142),
        info: Color::Rgb(125, 207, 255),
    },
    // 4 - Gruvbox Dark
    Theme {
        name: "Gruvbox Dark",
        bg: Color::Rgb(40, 40, 40),
        fg: Color::Rgb(235, 219, 178),
        fg_dim: Color::Rgb(146, 131, 116),
        accent: Color::Rgb(131, 165, 152),   // blue
        secondary: Color::Rgb(250, 189, 47), // yellow
        success: Color::Rgb(184, 187, 38),
        error: Color::Rgb(251, 73, 52),
        info: Color::Rgb(142, 192, 124),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_is_case_insensitive() {
        assert!(Theme::by_name("dracula").is_some());
        assert!(Theme::by_name("DRACULA").is_some());
        assert!(Theme::by_name("no such theme").is_none());
    }

    #[test]
    fn cycling_wraps_around() {
        let last = &BUILT_IN_THEMES[BUILT_IN_THEMES.len() - 1];
        assert_eq!(Theme::next_after(last.name).name, BUILT_IN_THEMES[0].name);
    }

    #[test]
    fn unknown_name_cycles_from_the_start() {
        assert_eq!(Theme::next_after("bogus").name, BUILT_IN_THEMES[1].name);
    }
}
