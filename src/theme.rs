use eframe::egui::{self, Color32};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Light / dark display mode
// ---------------------------------------------------------------------------

/// Display mode. Only affects colours, never any computed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Surface and text colours of one theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemeColors {
    pub background: Color32,
    pub text: Color32,
    pub card: Color32,
    pub subcontainer: Color32,
    pub header: Color32,
    /// Highlight of the selected tab.
    pub primary: Color32,
}

const LIGHT: ThemeColors = ThemeColors {
    background: Color32::from_rgb(0xf8, 0xf9, 0xfa),
    text: Color32::from_rgb(0x2c, 0x3e, 0x50),
    card: Color32::from_rgb(0xff, 0xff, 0xff),
    subcontainer: Color32::from_rgb(0xec, 0xf0, 0xf1),
    header: Color32::from_rgb(0xff, 0xff, 0xff),
    primary: Color32::from_rgb(0x34, 0x98, 0xdb),
};

const DARK: ThemeColors = ThemeColors {
    background: Color32::from_rgb(0x2c, 0x3e, 0x50),
    text: Color32::from_rgb(0xec, 0xf0, 0xf1),
    card: Color32::from_rgb(0x34, 0x49, 0x5e),
    subcontainer: Color32::from_rgb(0x34, 0x49, 0x5e),
    header: Color32::from_rgb(0x34, 0x49, 0x5e),
    primary: Color32::from_rgb(0x29, 0x80, 0xb9),
};

impl Theme {
    pub fn colors(self) -> ThemeColors {
        match self {
            Theme::Light => LIGHT,
            Theme::Dark => DARK,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    /// egui visuals for this theme, starting from egui's own light/dark base.
    pub fn visuals(self) -> egui::Visuals {
        let colors = self.colors();
        let mut visuals = match self {
            Theme::Light => egui::Visuals::light(),
            Theme::Dark => egui::Visuals::dark(),
        };
        visuals.panel_fill = colors.background;
        visuals.window_fill = colors.card;
        visuals.faint_bg_color = colors.subcontainer;
        visuals.override_text_color = Some(colors.text);
        visuals.selection.bg_fill = colors.primary;
        visuals
    }

    pub fn apply(self, ctx: &egui::Context) {
        ctx.set_visuals(self.visuals());
    }

    /// Frame of the top header bar, filled with the theme's header colour.
    pub fn header_frame(self, style: &egui::Style) -> egui::Frame {
        egui::Frame::side_top_panel(style).fill(self.colors().header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visuals_follow_palette() {
        let dark = Theme::Dark.visuals();
        assert!(dark.dark_mode);
        assert_eq!(dark.panel_fill, Color32::from_rgb(0x2c, 0x3e, 0x50));

        let light = Theme::Light.visuals();
        assert!(!light.dark_mode);
        assert_eq!(light.override_text_color, Some(LIGHT.text));
    }

    #[test]
    fn test_header_frame_uses_header_colour() {
        let style = egui::Style::default();
        assert_eq!(Theme::Light.header_frame(&style).fill, LIGHT.header);
        assert_eq!(Theme::Dark.header_frame(&style).fill, DARK.header);
        assert_ne!(Theme::Dark.header_frame(&style).fill, DARK.background);
    }
}
