use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

/// Slice fills, cycled by segment index.
const SEGMENT_PALETTE: [(u8, u8, u8); 8] = [
    (0xff, 0x44, 0x44),
    (0xcc, 0x00, 0x00),
    (0xff, 0x66, 0x66),
    (0xaa, 0x00, 0x00),
    (0xff, 0x88, 0x88),
    (0x88, 0x00, 0x00),
    (0xff, 0xaa, 0xaa),
    (0x66, 0x00, 0x00),
];

fn rgb((r, g, b): (u8, u8, u8)) -> Srgba<f64> {
    Srgba::new(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        1.0,
    )
}

pub struct WheelColors {
    pub segments: Vec<Srgba<f64>>,
    pub separator: Srgba<f64>,
    pub text: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub pointer: Srgba<f64>,
    pub highlight: Srgba<f64>,
    pub empty_fill: Srgba<f64>,
    pub empty_rim: Srgba<f64>,
    pub empty_text: Srgba<f64>,
}

impl WheelColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            segments: SEGMENT_PALETTE.iter().copied().map(rgb).collect(),
            separator: rgb((0xff, 0xff, 0xff)),
            text: rgb((0xff, 0xff, 0xff)),
            hub: rgb((0xcc, 0x00, 0x00)),
            pointer: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.13, 0.13, 0.13, 1.0),
                Some(1.0),
            ),
            highlight: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(1.0, 0.84, 0.0, 0.45),
                Some(0.45),
            ),
            empty_fill: rgb((0xf0, 0xf0, 0xf0)),
            empty_rim: rgb((0xcc, 0x00, 0x00)),
            empty_text: rgb((0x66, 0x66, 0x66)),
        }
    }

    pub fn segment(&self, index: usize) -> Srgba<f64> {
        self.segments[index % self.segments.len()]
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.spin-button {
    font-weight: bold;
    font-size: 18px;
    padding: 10px 28px;
}
.status-line {
    font-size: 15px;
}
.prize-notice {
    color: #cc0000;
}
.winner-prize {
    font-weight: bold;
    font-size: 24px;
    color: #cc0000;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
