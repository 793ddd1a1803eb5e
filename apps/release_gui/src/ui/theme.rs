//! Palette and theme overrides layered over egui's default visuals.

use eframe::egui;

pub const SLATE_BLUE: egui::Color32 = egui::Color32::from_rgb(32, 70, 95); // #20465F
pub const BRIGHT_BLUE: egui::Color32 = egui::Color32::from_rgb(0, 153, 255); // #0099FF
pub const NAVY_BLUE: egui::Color32 = egui::Color32::from_rgb(38, 55, 64); // #263740
pub const LIGHT_BLUE: egui::Color32 = egui::Color32::from_rgb(149, 193, 218); // #95C1DA
pub const MUTED_BLUE: egui::Color32 = egui::Color32::from_rgb(79, 123, 148); // #4F7B94
pub const BLACK: egui::Color32 = egui::Color32::BLACK;
pub const WHITE: egui::Color32 = egui::Color32::WHITE;
pub const TRANSPARENT: egui::Color32 = egui::Color32::TRANSPARENT;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorToken {
    Background,
    Foreground,
    MenuBackground,
    HeaderBackground,
    OverlayBackground,
    InputBackground,
    InputBorder,
    Button,
    Hover,
    Focus,
    DisabledButton,
    Disabled,
    Selection,
    Hyperlink,
    Error,
    Warning,
    Separator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeToken {
    Padding,
    Text,
    HeadingText,
    InteractHeight,
    ScrollBarWidth,
    IconWidth,
}

/// Immutable theme handed to every panel and widget that paints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub variant: ThemeVariant,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            variant: ThemeVariant::Dark,
        }
    }
}

fn default_visuals(variant: ThemeVariant) -> egui::Visuals {
    match variant {
        ThemeVariant::Dark => egui::Visuals::dark(),
        ThemeVariant::Light => egui::Visuals::light(),
    }
}

impl Theme {
    /// Follows the light/dark preference egui reports for the system.
    pub fn for_egui_theme(theme: egui::Theme) -> Self {
        let variant = match theme {
            egui::Theme::Dark => ThemeVariant::Dark,
            egui::Theme::Light => ThemeVariant::Light,
        };
        Self { variant }
    }

    /// Overridden tokens ignore `variant`; the rest come from egui's
    /// defaults for that variant.
    pub fn color(&self, token: ColorToken, variant: ThemeVariant) -> egui::Color32 {
        match token {
            ColorToken::Background
            | ColorToken::MenuBackground
            | ColorToken::HeaderBackground
            | ColorToken::OverlayBackground
            | ColorToken::InputBackground
            | ColorToken::DisabledButton => NAVY_BLUE,
            ColorToken::Foreground => WHITE,
            ColorToken::InputBorder => LIGHT_BLUE,
            ColorToken::Button => TRANSPARENT,
            ColorToken::Hover | ColorToken::Focus => SLATE_BLUE,
            ColorToken::Disabled => MUTED_BLUE,
            ColorToken::Selection => default_visuals(variant).selection.bg_fill,
            ColorToken::Hyperlink => default_visuals(variant).hyperlink_color,
            ColorToken::Error => default_visuals(variant).error_fg_color,
            ColorToken::Warning => default_visuals(variant).warn_fg_color,
            ColorToken::Separator => {
                default_visuals(variant).widgets.noninteractive.bg_stroke.color
            }
        }
    }

    pub fn size(&self, token: SizeToken) -> f32 {
        let style = egui::Style::default();
        match token {
            SizeToken::Padding => 8.0,
            SizeToken::Text => 16.0,
            SizeToken::HeadingText => style
                .text_styles
                .get(&egui::TextStyle::Heading)
                .map(|font| font.size)
                .unwrap_or(18.0),
            SizeToken::InteractHeight => style.spacing.interact_size.y,
            SizeToken::ScrollBarWidth => style.spacing.scroll.bar_width,
            SizeToken::IconWidth => style.spacing.icon_width,
        }
    }

    /// Shorthand for [`Theme::color`] in this theme's own variant.
    pub fn fg(&self, token: ColorToken) -> egui::Color32 {
        self.color(token, self.variant)
    }

    pub fn visuals(&self) -> egui::Visuals {
        let mut visuals = default_visuals(self.variant);
        visuals.override_text_color = Some(self.fg(ColorToken::Foreground));
        visuals.panel_fill = self.fg(ColorToken::Background);
        visuals.window_fill = self.fg(ColorToken::OverlayBackground);
        visuals.extreme_bg_color = self.fg(ColorToken::InputBackground);
        visuals.faint_bg_color = self.fg(ColorToken::HeaderBackground);

        visuals.widgets.inactive.weak_bg_fill = self.fg(ColorToken::Button);
        visuals.widgets.inactive.bg_fill = self.fg(ColorToken::Button);
        visuals.widgets.inactive.bg_stroke =
            egui::Stroke::new(1.0, self.fg(ColorToken::InputBorder));
        visuals.widgets.hovered.weak_bg_fill = self.fg(ColorToken::Hover);
        visuals.widgets.hovered.bg_fill = self.fg(ColorToken::Hover);
        visuals.widgets.active.bg_stroke = egui::Stroke::new(1.2, self.fg(ColorToken::Focus));
        visuals.selection.stroke = egui::Stroke::new(1.0, self.fg(ColorToken::Focus));
        visuals.widgets.noninteractive.weak_bg_fill = self.fg(ColorToken::DisabledButton);
        visuals.widgets.noninteractive.fg_stroke =
            egui::Stroke::new(1.0, self.fg(ColorToken::Disabled));
        visuals.widgets.noninteractive.bg_stroke.color = self.fg(ColorToken::Separator);
        visuals.selection.bg_fill = self.fg(ColorToken::Selection);
        visuals.hyperlink_color = self.fg(ColorToken::Hyperlink);
        visuals.error_fg_color = self.fg(ColorToken::Error);
        visuals.warn_fg_color = self.fg(ColorToken::Warning);
        visuals
    }

    pub fn apply(&self, ctx: &egui::Context) {
        let padding = self.size(SizeToken::Padding);
        let text = self.size(SizeToken::Text);

        let mut style = (*ctx.style()).clone();
        style.visuals = self.visuals();
        for (text_style, font) in style.text_styles.iter_mut() {
            match text_style {
                egui::TextStyle::Body | egui::TextStyle::Button => font.size = text,
                egui::TextStyle::Monospace => font.size = text - 2.0,
                egui::TextStyle::Heading => font.size = self.size(SizeToken::HeadingText),
                _ => {}
            }
        }
        style.spacing.item_spacing = egui::vec2(padding, padding * 0.75);
        style.spacing.button_padding = egui::vec2(padding + 2.0, padding * 0.75);
        style.spacing.window_margin = egui::Margin::same(padding as i8);
        style.spacing.interact_size.y = self.size(SizeToken::InteractHeight);
        style.spacing.scroll.bar_width = self.size(SizeToken::ScrollBarWidth);
        style.spacing.icon_width = self.size(SizeToken::IconWidth);
        ctx.set_style(style);
    }
}
