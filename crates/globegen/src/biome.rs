//! Biome classification for the voxel globe.
//!
//! Each biome has a single-character map code, a flat display colour and a
//! land flag used to pick power grid node candidates.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Biome {
    #[default]
    Ocean,
    Land,
    Desert,
    Ice,
    Mountain,
}

impl Biome {
    pub const ALL: [Biome; 5] = [
        Biome::Ocean,
        Biome::Land,
        Biome::Desert,
        Biome::Ice,
        Biome::Mountain,
    ];

    /// Parses a map code. Unknown codes return `None`; callers treat that as ocean.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'0' => Some(Biome::Ocean),
            b'1' => Some(Biome::Land),
            b'2' => Some(Biome::Desert),
            b'3' => Some(Biome::Ice),
            b'4' => Some(Biome::Mountain),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Biome::Ocean => b'0',
            Biome::Land => b'1',
            Biome::Desert => b'2',
            Biome::Ice => b'3',
            Biome::Mountain => b'4',
        }
    }

    /// Land, desert and mountain cells can carry towers. Ice does not.
    pub fn is_land(self) -> bool {
        matches!(self, Biome::Land | Biome::Desert | Biome::Mountain)
    }

    /// Display colour as 8-bit sRGB.
    pub fn srgb(self) -> [u8; 3] {
        match self {
            Biome::Ocean => [0x1e, 0x88, 0xe5],
            Biome::Land => [0x38, 0x8e, 0x3c],
            Biome::Desert => [0xfb, 0xc0, 0x2d],
            Biome::Ice => [0xe3, 0xf2, 0xfd],
            Biome::Mountain => [0x5d, 0x40, 0x37],
        }
    }

    /// Display colour as linear RGBA, ready for vertex colours.
    pub fn linear_rgba(self) -> [f32; 4] {
        srgb_to_linear_rgba(self.srgb())
    }
}

fn srgb_channel_to_linear(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn srgb_to_linear_rgba([r, g, b]: [u8; 3]) -> [f32; 4] {
    [
        srgb_channel_to_linear(r),
        srgb_channel_to_linear(g),
        srgb_channel_to_linear(b),
        1.0,
    ]
}

/// Classifies a pixel of a satellite/topography image.
///
/// Rules are checked in order, so a bright pixel is ice before anything else
/// and a dark blue one is ocean before it could count as mountain.
pub fn classify_pixel(r: u8, g: u8, b: u8) -> Biome {
    let (r, g, b) = (r as i32, g as i32, b as i32);

    if r > 210 && g > 210 && b > 210 {
        return Biome::Ice;
    }
    if b > r + 10 && b > g + 10 {
        return Biome::Ocean;
    }
    // deep water is close to black in most imagery
    if r < 50 && g < 60 && b < 80 {
        return Biome::Ocean;
    }
    if r > 160 && g > 130 && b < 140 && r > b + 30 {
        return Biome::Desert;
    }
    if g > r && g > b {
        return Biome::Land;
    }
    if r < 100 && g < 100 && b < 100 {
        return Biome::Mountain;
    }

    if r > g { Biome::Desert } else { Biome::Land }
}
