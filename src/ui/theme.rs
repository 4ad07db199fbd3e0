use std::fs;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

const BUILTIN_THEMES: &[&str] = &["default", "paper"];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThemeColors {
    pub bg: String,
    pub fg: String,
    pub muted: String,
    pub accent: String,
    pub blank: String,
    pub selected_bg: String,
    pub border: String,
    pub border_focused: String,
    pub header_bg: String,
    pub header_fg: String,
    pub bar_empty: String,
    pub mastered: String,
    pub learning: String,
    pub unmastered: String,
    pub error: String,
    pub warning: String,
    pub success: String,
}

impl Theme {
    /// User themes in `<config_dir>/wordrill/themes/<name>.toml` shadow the
    /// built-in ones.
    pub fn load(name: &str) -> Option<Self> {
        if let Some(config_dir) = dirs::config_dir() {
            let user_theme_path = config_dir
                .join("wordrill")
                .join("themes")
                .join(format!("{name}.toml"));
            if let Ok(content) = fs::read_to_string(&user_theme_path)
                && let Ok(theme) = toml::from_str::<Theme>(&content)
            {
                return Some(theme);
            }
        }

        Self::builtin(name)
    }

    pub fn builtin(name: &str) -> Option<Self> {
        let colors = match name {
            "default" => ThemeColors::default(),
            "paper" => ThemeColors::paper(),
            _ => return None,
        };
        Some(Self {
            name: name.to_string(),
            colors,
        })
    }

    pub fn available_themes() -> Vec<String> {
        let mut names: Vec<String> = BUILTIN_THEMES.iter().map(|n| n.to_string()).collect();
        if let Some(config_dir) = dirs::config_dir()
            && let Ok(entries) = fs::read_dir(config_dir.join("wordrill").join("themes"))
        {
            for entry in entries.flatten() {
                let file_name = entry.file_name().to_string_lossy().to_string();
                if let Some(name) = file_name.strip_suffix(".toml")
                    && !names.iter().any(|n| n == name)
                {
                    names.push(name.to_string());
                }
            }
        }
        names
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            colors: ThemeColors::default(),
        }
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            bg: "#1e1e2e".to_string(),
            fg: "#cdd6f4".to_string(),
            muted: "#6c7086".to_string(),
            accent: "#89b4fa".to_string(),
            blank: "#f9e2af".to_string(),
            selected_bg: "#313244".to_string(),
            border: "#45475a".to_string(),
            border_focused: "#89b4fa".to_string(),
            header_bg: "#313244".to_string(),
            header_fg: "#cdd6f4".to_string(),
            bar_empty: "#313244".to_string(),
            mastered: "#a6e3a1".to_string(),
            learning: "#f9e2af".to_string(),
            unmastered: "#6c7086".to_string(),
            error: "#f38ba8".to_string(),
            warning: "#fab387".to_string(),
            success: "#a6e3a1".to_string(),
        }
    }
}

impl ThemeColors {
    fn paper() -> Self {
        Self {
            bg: "#eff1f5".to_string(),
            fg: "#4c4f69".to_string(),
            muted: "#9ca0b0".to_string(),
            accent: "#1e66f5".to_string(),
            blank: "#df8e1d".to_string(),
            selected_bg: "#ccd0da".to_string(),
            border: "#bcc0cc".to_string(),
            border_focused: "#1e66f5".to_string(),
            header_bg: "#dce0e8".to_string(),
            header_fg: "#4c4f69".to_string(),
            bar_empty: "#ccd0da".to_string(),
            mastered: "#40a02b".to_string(),
            learning: "#df8e1d".to_string(),
            unmastered: "#9ca0b0".to_string(),
            error: "#d20f39".to_string(),
            warning: "#fe640b".to_string(),
            success: "#40a02b".to_string(),
        }
    }

    pub fn parse_color(hex: &str) -> Color {
        let hex = hex.trim_start_matches('#');
        if hex.len() == 6
            && let (Ok(r), Ok(g), Ok(b)) = (
                u8::from_str_radix(&hex[0..2], 16),
                u8::from_str_radix(&hex[2..4], 16),
                u8::from_str_radix(&hex[4..6], 16),
            )
        {
            return Color::Rgb(r, g, b);
        }
        Color::White
    }

    pub fn bg(&self) -> Color { Self::parse_color(&self.bg) }
    pub fn fg(&self) -> Color { Self::parse_color(&self.fg) }
    pub fn muted(&self) -> Color { Self::parse_color(&self.muted) }
    pub fn accent(&self) -> Color { Self::parse_color(&self.accent) }
    pub fn blank(&self) -> Color { Self::parse_color(&self.blank) }
    pub fn selected_bg(&self) -> Color { Self::parse_color(&self.selected_bg) }
    pub fn border(&self) -> Color { Self::parse_color(&self.border) }
    pub fn border_focused(&self) -> Color { Self::parse_color(&self.border_focused) }
    pub fn header_bg(&self) -> Color { Self::parse_color(&self.header_bg) }
    pub fn header_fg(&self) -> Color { Self::parse_color(&self.header_fg) }
    pub fn bar_empty(&self) -> Color { Self::parse_color(&self.bar_empty) }
    pub fn mastered(&self) -> Color { Self::parse_color(&self.mastered) }
    pub fn learning(&self) -> Color { Self::parse_color(&self.learning) }
    pub fn unmastered(&self) -> Color { Self::parse_color(&self.unmastered) }
    pub fn error(&self) -> Color { Self::parse_color(&self.error) }
    pub fn warning(&self) -> Color { Self::parse_color(&self.warning) }
    pub fn success(&self) -> Color { Self::parse_color(&self.success) }
}
