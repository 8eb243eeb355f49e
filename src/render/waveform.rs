//! Waveform display widget
//!
//! Draws the most recent mono output samples left to right, so each cue
//! shows up as a short burst with its envelope visible.

use eframe::egui::{self, Color32, Pos2, Rect, Stroke, Vec2};

/// Waveform display widget
pub struct WaveformView {
    /// Trace color
    pub color: Color32,

    /// Background color
    pub background: Color32,

    /// Vertical gain (cues are quiet, so the default magnifies)
    pub zoom: f32,

    /// Line thickness in pixels
    pub line_width: f32,
}

impl Default for WaveformView {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(100, 255, 100),
            background: Color32::from_rgb(10, 20, 10),
            zoom: 4.0,
            line_width: 1.0,
        }
    }
}

impl WaveformView {
    /// Map sample `index` of `count` with value `value` into `rect`
    fn sample_to_screen(&self, index: usize, count: usize, value: f32, rect: Rect) -> Pos2 {
        let t = if count > 1 {
            index as f32 / (count - 1) as f32
        } else {
            0.0
        };
        let v = (value * self.zoom).clamp(-1.0, 1.0);
        Pos2::new(
            rect.left() + t * rect.width(),
            rect.center().y - v * rect.height() * 0.5, // Screen Y grows downward
        )
    }

    /// Draw the waveform into the available width
    pub fn show(&self, ui: &mut egui::Ui, samples: &[f32], height: f32) -> egui::Response {
        let size = Vec2::new(ui.available_width(), height);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::hover());
        let rect = response.rect;

        painter.rect_filled(rect, 4.0, self.background);

        let axis = Stroke::new(1.0, Color32::from_rgba_unmultiplied(80, 100, 80, 150));
        painter.line_segment(
            [Pos2::new(rect.left(), rect.center().y), Pos2::new(rect.right(), rect.center().y)],
            axis,
        );

        if samples.len() >= 2 {
            let points: Vec<Pos2> = samples
                .iter()
                .enumerate()
                .map(|(i, s)| self.sample_to_screen(i, samples.len(), *s, rect))
                .collect();
            painter.add(egui::Shape::line(points, Stroke::new(self.line_width, self.color)));
        }

        response
    }
}
