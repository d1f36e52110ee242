//! Heat palette shared by the rising sun and the ember animation.
//!
//! Sixteen anchors running black, red, orange, yellow, white. Any index in
//! 0..=255 is sampled by linear interpolation between the two nearest
//! anchors, so index 0 is black and index 255 is white.

use palette::{Mix, Srgb};

/// Anchor colors of the heat gradient.
pub const HEAT_ANCHORS: [Srgb<u8>; 16] = [
    Srgb::new(0x00, 0x00, 0x00),
    Srgb::new(0x33, 0x00, 0x00),
    Srgb::new(0x66, 0x00, 0x00),
    Srgb::new(0x99, 0x00, 0x00),
    Srgb::new(0xcc, 0x00, 0x00),
    Srgb::new(0xff, 0x00, 0x00),
    Srgb::new(0xff, 0x33, 0x00),
    Srgb::new(0xff, 0x66, 0x00),
    Srgb::new(0xff, 0x99, 0x00),
    Srgb::new(0xff, 0xcc, 0x00),
    Srgb::new(0xff, 0xff, 0x00),
    Srgb::new(0xff, 0xff, 0x33),
    Srgb::new(0xff, 0xff, 0x66),
    Srgb::new(0xff, 0xff, 0x99),
    Srgb::new(0xff, 0xff, 0xcc),
    Srgb::new(0xff, 0xff, 0xff),
];

/// Fully black pixel.
pub const BLACK: Srgb<u8> = Srgb::new(0, 0, 0);

/// Samples the heat palette at `index`.
pub fn heat_color(index: u8) -> Srgb<u8> {
    let segments = (HEAT_ANCHORS.len() - 1) as u32;
    let scaled = index as u32 * segments;
    let lower = (scaled / 255) as usize;

    if lower >= HEAT_ANCHORS.len() - 1 {
        return HEAT_ANCHORS[HEAT_ANCHORS.len() - 1];
    }

    let factor = (scaled % 255) as f32 / 255.0;
    let from: Srgb<f32> = HEAT_ANCHORS[lower].into_format();
    let to: Srgb<f32> = HEAT_ANCHORS[lower + 1].into_format();

    from.mix(to, factor).into_format()
}

/// Scales a color by a 0-255 brightness, 255 leaving it unchanged.
#[inline]
pub fn scale(color: Srgb<u8>, brightness: u8) -> Srgb<u8> {
    let scale_channel = |c: u8| ((c as u16 * (brightness as u16 + 1)) >> 8) as u8;
    Srgb::new(
        scale_channel(color.red),
        scale_channel(color.green),
        scale_channel(color.blue),
    )
}
