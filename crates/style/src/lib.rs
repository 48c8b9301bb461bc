pub mod font;
pub mod text;
pub mod theme;

pub use font::{FontStyle, FontWeight};
pub use text::TextAlign;
pub use theme::{FONT_CHOICES, StyleConfig, StylePatch};
