//! Engine-agnostic building blocks shared by the game and its tooling.

pub mod animation;
pub mod input;
pub mod rect;
pub mod time;

pub use animation::AnimatedSprite;
pub use rect::Rect;
