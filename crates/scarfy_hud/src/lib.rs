pub mod overlay;

pub use overlay::{Banner, HudOverlay, OverlayStats};
