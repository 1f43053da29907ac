pub mod renderer;
pub mod style;

pub use renderer::{Banner, Renderer};
pub use style::{BlockStyle, CellKind, CellStyle, SpriteStyle};
