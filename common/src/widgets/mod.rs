//! Widget components for the bubble level display.
//!
//! All widgets are generic over `DrawTarget<Color = Rgb565>` for platform independence.

mod bar;
mod bullseye;
mod gate;
mod header;
mod level;
mod popups;
mod primitives;

pub use bar::{BarOrientation, bar_bubble_center, draw_bar_gauge, draw_bar_readout};
pub use bullseye::{bullseye_bubble_center, draw_bullseye, draw_bullseye_readout};
pub use gate::{GateStatus, draw_gate_screen, draw_gate_status};
pub use header::{APP_TITLE, draw_header};
pub use level::{draw_level_gauges, draw_level_labels};
pub use popups::{draw_fps_toggle_popup, draw_glitch_popup, draw_motion_popup};
pub use primitives::{angle_text, draw_panel, draw_sparkline};
