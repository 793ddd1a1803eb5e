use eframe::egui;

use crate::ui::theme::{SizeToken, Theme, LIGHT_BLUE};

/// Rounded outline drawn around its content. The default variant pads the
/// content; the hugging variant draws it flush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedBackground {
    color: egui::Color32,
    corner_radius: u8,
    stroke_width: f32,
    hug: bool,
}

impl RoundedBackground {
    pub fn new(color: egui::Color32, corner_radius: u8) -> Self {
        Self {
            color,
            corner_radius,
            stroke_width: 1.0,
            hug: false,
        }
    }

    pub fn with_hug(color: egui::Color32, corner_radius: u8) -> Self {
        Self {
            hug: true,
            ..Self::new(color, corner_radius)
        }
    }

    pub fn frame(&self, theme: &Theme) -> egui::Frame {
        let margin = if self.hug {
            egui::Margin::ZERO
        } else {
            egui::Margin::same(theme.size(SizeToken::Padding) as i8)
        };
        egui::Frame::new()
            .fill(egui::Color32::TRANSPARENT)
            .stroke(egui::Stroke::new(self.stroke_width, self.color))
            .corner_radius(egui::CornerRadius::same(self.corner_radius))
            .inner_margin(margin)
    }

    pub fn show<R>(
        &self,
        ui: &mut egui::Ui,
        theme: &Theme,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> egui::InnerResponse<R> {
        self.frame(theme).show(ui, add_contents)
    }
}

/// Right-pointing arrow placed between workflow step buttons.
pub fn step_arrow(ui: &mut egui::Ui, color: egui::Color32) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(egui::vec2(20.0, 20.0), egui::Sense::hover());
    if ui.is_rect_visible(rect) {
        let stroke = egui::Stroke::new(2.0, color);
        let tip = egui::pos2(rect.right() - 3.0, rect.center().y);
        let painter = ui.painter();
        painter.line_segment([egui::pos2(rect.left() + 3.0, rect.center().y), tip], stroke);
        painter.line_segment([tip + egui::vec2(-6.0, -5.0), tip], stroke);
        painter.line_segment([tip + egui::vec2(-6.0, 5.0), tip], stroke);
    }
    response
}

pub fn light_blue_label(text: impl Into<String>) -> egui::RichText {
    egui::RichText::new(text).color(LIGHT_BLUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_variant_pads_content() {
        let frame = RoundedBackground::new(LIGHT_BLUE, 16).frame(&Theme::default());
        assert_eq!(frame.inner_margin, egui::Margin::same(8));
        assert_eq!(frame.stroke, egui::Stroke::new(1.0, LIGHT_BLUE));
        assert_eq!(frame.corner_radius, egui::CornerRadius::same(16));
        assert_eq!(frame.fill, egui::Color32::TRANSPARENT);
    }

    #[test]
    fn hug_variant_draws_flush() {
        let frame = RoundedBackground::with_hug(LIGHT_BLUE, 4).frame(&Theme::default());
        assert_eq!(frame.inner_margin, egui::Margin::ZERO);
        assert_eq!(frame.corner_radius, egui::CornerRadius::same(4));
    }
}
