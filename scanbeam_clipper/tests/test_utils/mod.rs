#![allow(dead_code)]

mod debug;
mod path_modifiers;
mod path_test_properties;
mod winding;

pub use debug::*;
pub use path_modifiers::*;
pub use path_test_properties::*;
pub use winding::*;

/// Install `env_logger` for the test binary (once, output captured per test).
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
