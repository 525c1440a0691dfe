pub mod config;
pub mod deck;
pub mod error;
pub mod page;
pub mod scheduler;
pub mod slider;

pub use config::{AppConfig, SliderConfig};
pub use deck::{Deck, SlideContent};
pub use error::{Error, Result};
pub use slider::{SliderController, SliderFrame, SliderInput};
