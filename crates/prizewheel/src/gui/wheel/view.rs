use super::model::{Point, WheelState, line_offsets, wrap_words};
use super::{
    EMPTY_FONT_SIZE, HUB_RADIUS, LABEL_FONT_SIZE, LABEL_INSET, LABEL_LINE_HEIGHT,
    POINTER_HALF_WIDTH, POINTER_LENGTH, RIM_WIDTH, SEPARATOR_WIDTH, WHEEL_MARGIN, WHEEL_RADIUS,
};
use crate::gui::theme::WheelColors;
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;
use std::time::Instant;
use wheelcore::geometry::{Geometry, START_OFFSET};
use wheelcore::prizes::Label;

const EMPTY_TEXT: &str = "No prizes";

/// Where the wheel sits inside the drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelLayout {
    pub center: Point,
    pub radius: f64,
}

impl WheelLayout {
    /// Centers the wheel and shrinks it to fit, keeping room for the pointer.
    pub fn fit(width: f64, height: f64) -> Self {
        let available = (width.min(height) / 2.0 - WHEEL_MARGIN).max(HUB_RADIUS * 2.0);
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            radius: available.min(WHEEL_RADIUS),
        }
    }
}

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct SegmentRenderer<'a> {
    label: &'a Label,
    arc: (f64, f64),
    label_angle: f64,
    color: Srgba<f64>,
    highlighted: bool,
    layout: &'a WheelLayout,
}

impl SegmentRenderer<'_> {
    fn draw(&self, cr: &Context, colors: &WheelColors) -> Result<(), cairo::Error> {
        self.draw_slice(cr, colors)?;
        self.draw_label(cr, colors)
    }

    fn slice_path(&self, cr: &Context) {
        let Point { x, y } = self.layout.center;
        cr.move_to(x, y);
        cr.arc(x, y, self.layout.radius, self.arc.0, self.arc.1);
        cr.close_path();
    }

    fn draw_slice(&self, cr: &Context, colors: &WheelColors) -> Result<(), cairo::Error> {
        self.slice_path(cr);
        set_color(cr, self.color);
        cr.fill()?;

        if self.highlighted {
            self.slice_path(cr);
            set_color(cr, colors.highlight);
            cr.fill()?;
        }

        self.slice_path(cr);
        set_color(cr, colors.separator);
        cr.set_line_width(SEPARATOR_WIDTH);
        cr.stroke()
    }

    fn draw_label(&self, cr: &Context, colors: &WheelColors) -> Result<(), cairo::Error> {
        let Point { x, y } = self.layout.center;

        cr.save()?;
        cr.translate(x, y);
        cr.rotate(self.label_angle);
        set_color(cr, colors.text);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE);

        let max_width = self.layout.radius - LABEL_INSET;
        let lines = wrap_words(self.label, max_width, |s| {
            cr.text_extents(s).map(|e| e.x_advance()).unwrap_or(0.0)
        });

        // baseline sits below the visual middle of the glyphs
        let middle = LABEL_FONT_SIZE * 0.35;
        for (line, dy) in lines.iter().zip(line_offsets(lines.len(), LABEL_LINE_HEIGHT)) {
            cr.move_to(LABEL_INSET, dy + middle);
            cr.show_text(line)?;
        }
        cr.restore()
    }
}

pub fn draw(
    cr: &Context,
    wheel: &WheelState,
    layout: &WheelLayout,
    colors: &WheelColors,
    now: Instant,
) -> Result<(), cairo::Error> {
    let Ok(geometry) = Geometry::new(wheel.segments.len()) else {
        return draw_empty(cr, layout, colors);
    };
    let rotation = wheel.rotation_at(now);

    for (index, label) in wheel.segments.iter().enumerate() {
        let (Ok(arc), Ok(label_angle)) = (
            geometry.segment_arc(index, rotation),
            geometry.label_arc(index, rotation),
        ) else {
            continue;
        };

        SegmentRenderer {
            label,
            arc,
            label_angle,
            color: colors.segment(index),
            highlighted: wheel.highlight == Some(index),
            layout,
        }
        .draw(cr, colors)?;
    }

    draw_hub(cr, layout, colors)?;
    draw_pointer(cr, layout, colors)
}

fn draw_empty(cr: &Context, layout: &WheelLayout, colors: &WheelColors) -> Result<(), cairo::Error> {
    let Point { x, y } = layout.center;

    cr.arc(x, y, layout.radius, 0.0, 2.0 * PI);
    set_color(cr, colors.empty_fill);
    cr.fill_preserve()?;
    set_color(cr, colors.empty_rim);
    cr.set_line_width(RIM_WIDTH);
    cr.stroke()?;

    set_color(cr, colors.empty_text);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
    cr.set_font_size(EMPTY_FONT_SIZE);
    if let Ok(ext) = cr.text_extents(EMPTY_TEXT) {
        cr.move_to(x - ext.width() / 2.0, y + ext.height() / 2.0);
        cr.show_text(EMPTY_TEXT)?;
    }
    Ok(())
}

fn draw_hub(cr: &Context, layout: &WheelLayout, colors: &WheelColors) -> Result<(), cairo::Error> {
    let Point { x, y } = layout.center;
    cr.arc(x, y, HUB_RADIUS, 0.0, 2.0 * PI);
    set_color(cr, colors.hub);
    cr.fill_preserve()?;
    set_color(cr, colors.separator);
    cr.set_line_width(SEPARATOR_WIDTH);
    cr.stroke()
}

/// The pointer never turns: it marks the zero-reference the resolver measures from.
fn draw_pointer(cr: &Context, layout: &WheelLayout, colors: &WheelColors) -> Result<(), cairo::Error> {
    let Point { x, y } = layout.center;
    let (dx, dy) = (START_OFFSET.cos(), START_OFFSET.sin());
    let tip = Point::new(
        x + dx * (layout.radius - POINTER_LENGTH / 2.0),
        y + dy * (layout.radius - POINTER_LENGTH / 2.0),
    );
    let base = Point::new(
        x + dx * (layout.radius + POINTER_LENGTH / 2.0),
        y + dy * (layout.radius + POINTER_LENGTH / 2.0),
    );

    cr.move_to(tip.x, tip.y);
    cr.line_to(base.x - POINTER_HALF_WIDTH, base.y);
    cr.line_to(base.x + POINTER_HALF_WIDTH, base.y);
    cr.close_path();
    set_color(cr, colors.pointer);
    cr.fill_preserve()?;
    set_color(cr, colors.separator);
    cr.set_line_width(2.0);
    cr.stroke()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_fits_small_areas() {
        let layout = WheelLayout::fit(300.0, 500.0);
        assert_eq!(layout.center, Point::new(150.0, 250.0));
        assert_eq!(layout.radius, 150.0 - WHEEL_MARGIN);
    }

    #[test]
    fn test_layout_caps_radius() {
        let layout = WheelLayout::fit(2000.0, 2000.0);
        assert_eq!(layout.radius, WHEEL_RADIUS);
    }

    #[test]
    fn test_layout_never_collapses() {
        let layout = WheelLayout::fit(10.0, 10.0);
        assert_eq!(layout.radius, HUB_RADIUS * 2.0);
    }
}
