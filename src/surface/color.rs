/// 8-bit-per-channel color as programmed into a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Normalized floats to bytes: clamp to [0, 1], scale by 255, round toward zero.
    pub fn from_normalized(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: channel_to_byte(r),
            g: channel_to_byte(g),
            b: channel_to_byte(b),
            a: channel_to_byte(a),
        }
    }

    /// Decodes one `0xAARRGGBB` pixel value.
    pub const fn from_argb(pixel: u32) -> Self {
        let [a, r, g, b] = pixel.to_be_bytes();
        Self { r, g, b, a }
    }

    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

fn channel_to_byte(value: f32) -> u8 {
    // NaN clamps to NaN and then casts to 0
    (value.clamp(0.0, 1.0) * 255.0) as u8
}
