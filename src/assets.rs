//! Texture lookup and graceful fallback
//!
//! The host owns loading. The core only asks "does texture X exist" and
//! degrades to a default vehicle or a placeholder key when it does not.

use std::collections::HashSet;

use crate::sim::{EntityKind, Vehicle};

/// Key rendered when a kind's own texture is missing
pub const PLACEHOLDER_TEXTURE: &str = "placeholder";

/// Asset lookup provided by the host
pub trait AssetCatalog {
    fn has_texture(&self, key: &str) -> bool;
}

/// Solid-colour rectangle generated at boot in place of missing art
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderTexture {
    pub key: &'static str,
    pub width: u32,
    pub height: u32,
    pub color: u32,
}

/// Rectangles the boot scene generates before any image loads
pub const BOOT_PLACEHOLDERS: [PlaceholderTexture; 8] = [
    PlaceholderTexture { key: "oysterCage", width: 60, height: 40, color: 0x4b4b4b },
    PlaceholderTexture { key: "jetSki", width: 80, height: 30, color: 0xff0000 },
    PlaceholderTexture { key: "oyster", width: 20, height: 20, color: 0xffffff },
    PlaceholderTexture { key: "fireworks", width: 25, height: 25, color: 0xffff00 },
    PlaceholderTexture { key: "sunglasses", width: 30, height: 15, color: 0x000000 },
    PlaceholderTexture { key: "water", width: 64, height: 64, color: 0x1e90ff },
    PlaceholderTexture { key: "bridge", width: 240, height: 40, color: 0xaaaaaa },
    PlaceholderTexture { key: PLACEHOLDER_TEXTURE, width: 40, height: 40, color: 0xff00ff },
];

/// Image files the boot scene tries to load, by texture key
pub const BOOT_IMAGES: [(&str, &str); 8] = [
    ("player", "assets/images/powerboat.png"),
    ("sailboat", "assets/images/sailboat.png"),
    ("buoy", "assets/images/buoy.png"),
    ("kayaker", "assets/images/kayaker.png"),
    ("log", "assets/images/log.png"),
    ("geese", "assets/images/geese.png"),
    ("jetski", "assets/images/jetski.png"),
    ("magicOyster", "assets/images/magic_oyster.png"),
];

/// A fixed set of known texture keys
#[derive(Debug, Clone, Default)]
pub struct TextureSet {
    keys: HashSet<String>,
}

impl TextureSet {
    /// Only the generated placeholders (no image loaded)
    pub fn placeholders() -> Self {
        BOOT_PLACEHOLDERS.iter().map(|p| p.key).collect()
    }

    /// Placeholders plus every image the boot scene knows about
    pub fn everything() -> Self {
        let mut set = Self::placeholders();
        set.extend(BOOT_IMAGES.iter().map(|(key, _)| *key));
        set.extend(
            EntityKind::OBSTACLES
                .iter()
                .chain(EntityKind::POWER_UPS.iter())
                .map(|k| k.profile().texture),
        );
        set
    }
}

impl<S: Into<String>> FromIterator<S> for TextureSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for TextureSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.keys.extend(iter.into_iter().map(Into::into));
    }
}

impl AssetCatalog for TextureSet {
    fn has_texture(&self, key: &str) -> bool {
        self.keys.contains(key)
    }
}

/// The requested vehicle if its texture exists, otherwise the powerboat
pub fn resolve_vehicle(catalog: &dyn AssetCatalog, requested: Vehicle) -> Vehicle {
    if catalog.has_texture(requested.texture_key()) {
        return requested;
    }
    log::warn!(
        "Texture `{}` for {:?} missing, falling back to {:?}",
        requested.texture_key(),
        requested,
        Vehicle::Powerboat
    );
    Vehicle::Powerboat
}

/// Texture key to render `kind` with
pub fn texture_for(catalog: &dyn AssetCatalog, kind: EntityKind) -> &'static str {
    let key = kind.profile().texture;
    if catalog.has_texture(key) {
        key
    } else {
        PLACEHOLDER_TEXTURE
    }
}

/// Texture key to render the player's vehicle with
pub fn vehicle_texture(catalog: &dyn AssetCatalog, vehicle: Vehicle) -> &'static str {
    let key = vehicle.texture_key();
    if catalog.has_texture(key) {
        key
    } else {
        PLACEHOLDER_TEXTURE
    }
}
