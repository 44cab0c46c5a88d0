//! Terminal screens for the `brailleboard` binary.

mod device_selector;
mod error;
mod typing_monitor;

pub use device_selector::device_selector;
pub use error::BoardGuiError;
pub use typing_monitor::typing_monitor;
