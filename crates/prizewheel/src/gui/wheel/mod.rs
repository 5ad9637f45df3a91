pub mod model;
pub mod view;

pub use model::{Point, WheelState};
pub use view::{WheelLayout, draw};

pub const WHEEL_RADIUS: f64 = 200.0;
pub const WHEEL_MARGIN: f64 = 30.0; // room for the pointer above the rim
pub const HUB_RADIUS: f64 = 20.0;
pub const SEPARATOR_WIDTH: f64 = 3.0;
pub const LABEL_INSET: f64 = 20.0; // label start, measured from the center
pub const LABEL_FONT_SIZE: f64 = 14.0;
pub const LABEL_LINE_HEIGHT: f64 = 16.0;
pub const EMPTY_FONT_SIZE: f64 = 20.0;
pub const RIM_WIDTH: f64 = 4.0;
pub const POINTER_HALF_WIDTH: f64 = 14.0;
pub const POINTER_LENGTH: f64 = 28.0;
