//! Fixed-size equirectangular grid of biome codes.
//!
//! Row 0 is the north pole, column 0 is longitude -180°. Lookups never fail:
//! anything outside the grid or any unknown code reads as [`Biome::Ocean`].

use crate::biome::{Biome, classify_pixel};
use crate::error::GlobeGenError;
use image::DynamicImage;
use image::imageops::FilterType;
use std::path::Path;

pub const EARTH_MAP_WIDTH: usize = 128;
pub const EARTH_MAP_HEIGHT: usize = 64;

const EARTH_MAP: &str = include_str!("../assets/earth_map.txt");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiomeMap {
    width: usize,
    height: usize,
    codes: Vec<u8>,
}

impl BiomeMap {
    /// Parses map text, ignoring line breaks and other whitespace.
    ///
    /// The remaining characters must number exactly `width * height`.
    pub fn parse(width: usize, height: usize, text: &str) -> Result<Self, GlobeGenError> {
        let codes: Vec<u8> = text
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        Self::from_codes(width, height, codes)
    }

    pub fn from_codes(width: usize, height: usize, codes: Vec<u8>) -> Result<Self, GlobeGenError> {
        let expected = width * height;
        if codes.len() != expected {
            return Err(GlobeGenError::MapSize {
                width,
                height,
                expected,
                actual: codes.len(),
            });
        }
        Ok(Self {
            width,
            height,
            codes,
        })
    }

    pub fn load_from_file(
        path: impl AsRef<Path>,
        width: usize,
        height: usize,
    ) -> Result<Self, GlobeGenError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| GlobeGenError::io(path.display().to_string(), err))?;
        Self::parse(width, height, &text)
    }

    /// The embedded 128x64 Earth map.
    pub fn earth() -> Self {
        let codes: Vec<u8> = EARTH_MAP
            .bytes()
            .filter(|b| !b.is_ascii_whitespace())
            .collect();
        Self {
            width: EARTH_MAP_WIDTH,
            height: EARTH_MAP_HEIGHT,
            codes,
        }
    }

    pub fn uniform(width: usize, height: usize, biome: Biome) -> Self {
        Self {
            width,
            height,
            codes: vec![biome.code(); width * height],
        }
    }

    /// Downsamples an equirectangular image and classifies every pixel.
    pub fn from_image(image: &DynamicImage, width: usize, height: usize) -> Self {
        let resized = image::imageops::resize(
            &image.to_rgb8(),
            width as u32,
            height as u32,
            FilterType::Triangle,
        );
        let codes = resized
            .pixels()
            .map(|pixel| {
                let [r, g, b] = pixel.0;
                classify_pixel(r, g, b).code()
            })
            .collect();
        Self {
            width,
            height,
            codes,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Biome {
        if x >= self.width || y >= self.height {
            return Biome::Ocean;
        }
        self.codes
            .get(y * self.width + x)
            .and_then(|&code| Biome::from_code(code))
            .unwrap_or_default()
    }

    /// Looks up texture coordinates in `[0, 1]`. `u` wraps, `v` clamps.
    pub fn sample_uv(&self, u: f32, v: f32) -> Biome {
        if self.width == 0 || self.height == 0 || !u.is_finite() || !v.is_finite() {
            return Biome::Ocean;
        }
        let map_x = ((u * self.width as f32).floor() as i64).rem_euclid(self.width as i64) as usize;
        let map_y = ((v * self.height as f32).floor() as i64).clamp(0, self.height as i64 - 1) as usize;
        self.get(map_x, map_y)
    }

    /// Renders the map as text, one row per line.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(self.codes.len() + self.height);
        if self.width == 0 {
            return out;
        }
        for row in self.codes.chunks(self.width) {
            out.extend(row.iter().map(|&code| code as char));
            out.push('\n');
        }
        out
    }

    pub fn count(&self, biome: Biome) -> usize {
        self.codes
            .iter()
            .filter(|&&code| Biome::from_code(code).unwrap_or_default() == biome)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use rstest::rstest;

    #[test]
    fn test_embedded_earth_has_expected_size() {
        let earth = BiomeMap::earth();
        assert_eq!(earth.width(), EARTH_MAP_WIDTH);
        assert_eq!(earth.height(), EARTH_MAP_HEIGHT);
        assert_eq!(earth.codes.len(), EARTH_MAP_WIDTH * EARTH_MAP_HEIGHT);
    }

    #[test]
    fn test_embedded_earth_parses_strictly() {
        assert!(BiomeMap::parse(EARTH_MAP_WIDTH, EARTH_MAP_HEIGHT, EARTH_MAP).is_ok());
    }

    #[test]
    fn test_embedded_earth_has_every_biome() {
        let earth = BiomeMap::earth();
        for biome in Biome::ALL {
            assert!(earth.count(biome) > 0, "{biome:?} missing from the Earth map");
        }
        // mostly water, like the real thing
        assert!(earth.count(Biome::Ocean) > earth.count(Biome::Land));
    }

    #[test]
    fn test_parse_strips_newlines() {
        let map = BiomeMap::parse(3, 2, "012\n340\n").unwrap();
        assert_eq!(map.get(0, 0), Biome::Ocean);
        assert_eq!(map.get(1, 0), Biome::Land);
        assert_eq!(map.get(2, 0), Biome::Desert);
        assert_eq!(map.get(0, 1), Biome::Ice);
        assert_eq!(map.get(1, 1), Biome::Mountain);
    }

    #[rstest]
    #[case("0123")]
    #[case("0123401")]
    #[case("")]
    fn test_parse_rejects_wrong_length(#[case] text: &str) {
        let result = BiomeMap::parse(3, 2, text);
        assert!(matches!(
            result,
            Err(GlobeGenError::MapSize { expected: 6, .. })
        ));
    }

    #[test]
    fn test_unknown_codes_read_as_ocean() {
        let map = BiomeMap::parse(2, 1, "x1").unwrap();
        assert_eq!(map.get(0, 0), Biome::Ocean);
        assert_eq!(map.get(1, 0), Biome::Land);
    }

    #[rstest]
    #[case(2, 0)]
    #[case(0, 1)]
    #[case(usize::MAX, usize::MAX)]
    fn test_out_of_range_reads_as_ocean(#[case] x: usize, #[case] y: usize) {
        let map = BiomeMap::uniform(2, 1, Biome::Land);
        assert_eq!(map.get(x, y), Biome::Ocean);
    }

    #[test]
    fn test_sample_uv_wraps_longitude_and_clamps_latitude() {
        let map = BiomeMap::parse(4, 2, "1000\n0002").unwrap();
        assert_eq!(map.sample_uv(0.0, 0.0), Biome::Land);
        // u == 1.0 wraps back to column 0
        assert_eq!(map.sample_uv(1.0, 0.0), Biome::Land);
        // v == 1.0 clamps to the last row
        assert_eq!(map.sample_uv(0.99, 1.0), Biome::Desert);
        assert_eq!(map.sample_uv(0.99, 2.5), Biome::Desert);
        assert_eq!(map.sample_uv(0.0, -1.0), Biome::Land);
    }

    #[test]
    fn test_sample_uv_on_empty_map_is_ocean() {
        let map = BiomeMap::parse(0, 0, "").unwrap();
        assert_eq!(map.sample_uv(0.5, 0.5), Biome::Ocean);
        assert_eq!(BiomeMap::earth().sample_uv(f32::NAN, 0.5), Biome::Ocean);
    }

    #[test]
    fn test_ascii_output_parses_back() {
        let earth = BiomeMap::earth();
        let text = earth.to_ascii();
        assert_eq!(text.lines().count(), EARTH_MAP_HEIGHT);
        assert_eq!(BiomeMap::parse(EARTH_MAP_WIDTH, EARTH_MAP_HEIGHT, &text).unwrap(), earth);
    }

    #[test]
    fn test_from_image_classifies_each_pixel() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([240, 240, 240]));
        img.put_pixel(1, 0, Rgb([20, 40, 180]));
        img.put_pixel(0, 1, Rgb([60, 130, 40]));
        img.put_pixel(1, 1, Rgb([220, 190, 110]));

        let map = BiomeMap::from_image(&DynamicImage::ImageRgb8(img), 2, 2);
        assert_eq!(map.get(0, 0), Biome::Ice);
        assert_eq!(map.get(1, 0), Biome::Ocean);
        assert_eq!(map.get(0, 1), Biome::Land);
        assert_eq!(map.get(1, 1), Biome::Desert);
    }
}
