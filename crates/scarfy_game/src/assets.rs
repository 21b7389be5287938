//! The fixed texture set and the sizes the simulation derives its geometry from.
//!
//! All five textures are required. The loader in `main` treats a missing or
//! undecodable file as fatal before the first frame.

use std::path::Path;

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Background,
    Midground,
    Foreground,
    Player,
    Enemy,
}

impl TextureSlot {
    /// All slots in back-to-front draw order.
    pub const ALL: [TextureSlot; 5] = [
        TextureSlot::Background,
        TextureSlot::Midground,
        TextureSlot::Foreground,
        TextureSlot::Player,
        TextureSlot::Enemy,
    ];

    /// Path relative to the working directory.
    pub fn path(self) -> &'static str {
        match self {
            Self::Background => "textures/far-buildings.png",
            Self::Midground => "textures/back-buildings.png",
            Self::Foreground => "textures/foreground.png",
            Self::Player => "textures/scarfy.png",
            Self::Enemy => "textures/12_nebula_spritesheet.png",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Background => "background",
            Self::Midground => "midground",
            Self::Foreground => "foreground",
            Self::Player => "player",
            Self::Enemy => "enemy",
        }
    }
}

impl std::fmt::Display for TextureSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Pixel size of every loaded texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetDims {
    pub background: Vec2,
    pub midground: Vec2,
    pub foreground: Vec2,
    pub player: Vec2,
    pub enemy: Vec2,
}

impl SheetDims {
    pub fn get(&self, slot: TextureSlot) -> Vec2 {
        match slot {
            TextureSlot::Background => self.background,
            TextureSlot::Midground => self.midground,
            TextureSlot::Foreground => self.foreground,
            TextureSlot::Player => self.player,
            TextureSlot::Enemy => self.enemy,
        }
    }

    pub fn set(&mut self, slot: TextureSlot, size: Vec2) {
        match slot {
            TextureSlot::Background => self.background = size,
            TextureSlot::Midground => self.midground = size,
            TextureSlot::Foreground => self.foreground = size,
            TextureSlot::Player => self.player = size,
            TextureSlot::Enemy => self.enemy = size,
        }
    }
}

impl Default for SheetDims {
    /// Sizes of the reference art set. The loader overwrites every entry with
    /// the size actually decoded.
    fn default() -> Self {
        Self {
            background: Vec2::new(272.0, 160.0),
            midground: Vec2::new(272.0, 160.0),
            foreground: Vec2::new(352.0, 160.0),
            player: Vec2::new(768.0, 128.0),
            enemy: Vec2::new(800.0, 800.0),
        }
    }
}

/// Fail fast with every missing texture named, before any GPU work starts.
pub fn verify_assets_present(root: &Path) -> Result<(), String> {
    let missing: Vec<String> = TextureSlot::ALL
        .iter()
        .map(|slot| root.join(slot.path()))
        .filter(|path| !path.is_file())
        .map(|path| path.display().to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(format!("Missing texture asset(s): {}", missing.join(", ")))
    }
}
