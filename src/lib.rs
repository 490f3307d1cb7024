//! MyWeather display core: turns a weather reading and the user's
//! preferences into label text and alerts.

pub mod desk;
pub mod labels;

pub use desk::Desk;
pub use labels::{Greeting, Labels};
