//! Screen modules for the boot console and debug view.

mod boot;
mod debug;

pub use boot::{BootLine, run_boot_screen};
pub use debug::{SensorSnapshot, draw_debug_page};
