use eframe::egui;

use crate::ui::theme::{SizeToken, Theme};

/// Seconds the darkened "pressed" colours stay up after a tap.
pub const PRESS_FLASH_SECS: f64 = 0.1;
const PRESSED_FILL_FACTOR: f32 = 0.85;
const PRESSED_TEXT_FACTOR: f32 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    pub fill: egui::Color32,
    pub text: egui::Color32,
    pub outline: egui::Color32,
}

impl ButtonColors {
    pub const fn new(fill: egui::Color32, text: egui::Color32, outline: egui::Color32) -> Self {
        Self {
            fill,
            text,
            outline,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonPalette {
    pub default: ButtonColors,
    pub hover: ButtonColors,
    pub selected: ButtonColors,
    pub disabled: ButtonColors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVisual {
    Default,
    Hovered,
    Selected,
    Disabled,
}

/// Disabled wins over selected, selected over hovered.
pub fn resolve_visual(disabled: bool, selected: bool, hovered: bool) -> ButtonVisual {
    if disabled {
        ButtonVisual::Disabled
    } else if selected {
        ButtonVisual::Selected
    } else if hovered {
        ButtonVisual::Hovered
    } else {
        ButtonVisual::Default
    }
}

/// Scales RGB by `factor`, keeping alpha.
pub fn darken_color(color: egui::Color32, factor: f32) -> egui::Color32 {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let scale = |channel: u8| (f32::from(channel) * factor) as u8;
    egui::Color32::from_rgba_unmultiplied(scale(r), scale(g), scale(b), a)
}

/// Tappable label with per-state colours and a short pressed flash.
pub struct ColoredButton {
    label: String,
    palette: ButtonPalette,
    on_tapped: Option<Box<dyn FnMut()>>,
    hovered: bool,
    selected: bool,
    disabled: bool,
    bold: bool,
    text_size: f32,
    min_size: egui::Vec2,
    pressed: Option<(f64, ButtonColors)>,
}

impl ColoredButton {
    pub fn new(label: impl Into<String>, palette: ButtonPalette, theme: &Theme) -> Self {
        Self {
            label: label.into(),
            palette,
            on_tapped: None,
            hovered: false,
            selected: false,
            disabled: false,
            bold: false,
            text_size: theme.size(SizeToken::Text),
            min_size: egui::Vec2::ZERO,
            pressed: None,
        }
    }

    pub fn on_tapped(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_tapped = Some(Box::new(callback));
        self
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = bold;
    }

    pub fn set_text_size(&mut self, size: f32) {
        self.text_size = size;
    }

    pub fn set_min_size(&mut self, size: egui::Vec2) {
        self.min_size = size;
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.hovered = false;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn mouse_in(&mut self) {
        if self.disabled || self.selected {
            return;
        }
        self.hovered = true;
    }

    pub fn mouse_out(&mut self) {
        if self.disabled || self.selected {
            return;
        }
        self.hovered = false;
    }

    pub fn visual(&self) -> ButtonVisual {
        resolve_visual(self.disabled, self.selected, self.hovered)
    }

    pub fn state_colors(&self) -> ButtonColors {
        match self.visual() {
            ButtonVisual::Disabled => self.palette.disabled,
            ButtonVisual::Selected => self.palette.selected,
            ButtonVisual::Hovered => self.palette.hover,
            ButtonVisual::Default => self.palette.default,
        }
    }

    /// Colours to paint at `now` (seconds on the egui clock).
    pub fn colors_at(&self, now: f64) -> ButtonColors {
        match self.pressed {
            Some((until, colors)) if now < until => colors,
            _ => self.state_colors(),
        }
    }

    /// Darkens the current colours until `now + PRESS_FLASH_SECS` and fires
    /// the callback. Returns `false` without doing anything while disabled.
    pub fn tapped(&mut self, now: f64) -> bool {
        if self.disabled {
            return false;
        }
        let current = self.colors_at(now);
        self.pressed = Some((
            now + PRESS_FLASH_SECS,
            ButtonColors {
                fill: darken_color(current.fill, PRESSED_FILL_FACTOR),
                text: darken_color(current.text, PRESSED_TEXT_FACTOR),
                outline: current.outline,
            },
        ));
        if let Some(callback) = self.on_tapped.as_mut() {
            callback();
        }
        true
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let font = egui::FontId::proportional(self.text_size);
        let galley = ui
            .painter()
            .layout_no_wrap(self.label.clone(), font.clone(), egui::Color32::PLACEHOLDER);
        let desired = (galley.size() + egui::vec2(30.0, 4.0) + ui.spacing().button_padding)
            .max(self.min_size);

        let sense = if self.disabled {
            egui::Sense::hover()
        } else {
            egui::Sense::click()
        };
        let (rect, response) = ui.allocate_exact_size(desired, sense);

        if response.hovered() != self.hovered {
            if response.hovered() {
                self.mouse_in();
            } else {
                self.mouse_out();
            }
        }

        let now = ui.input(|input| input.time);
        if response.clicked() && self.tapped(now) {
            ui.ctx()
                .request_repaint_after(std::time::Duration::from_secs_f64(PRESS_FLASH_SECS));
        }

        if ui.is_rect_visible(rect) {
            let colors = self.colors_at(now);
            let radius = egui::CornerRadius::same(4);
            let painter = ui.painter();
            painter.rect_filled(rect, radius, colors.fill);
            painter.rect_stroke(
                rect,
                radius,
                egui::Stroke::new(3.0, colors.outline),
                egui::StrokeKind::Inside,
            );

            // egui ships no bold face; a half-pixel overdraw stands in for one.
            let bold = self.bold || self.visual() == ButtonVisual::Selected;
            let center = rect.center();
            painter.text(center, egui::Align2::CENTER_CENTER, &self.label, font.clone(), colors.text);
            if bold {
                painter.text(
                    center + egui::vec2(0.6, 0.0),
                    egui::Align2::CENTER_CENTER,
                    &self.label,
                    font,
                    colors.text,
                );
            }
        }

        response.on_hover_cursor(if self.disabled {
            egui::CursorIcon::NotAllowed
        } else {
            egui::CursorIcon::PointingHand
        })
    }
}
