use crate::surface::Rgba8;

/// CPU-side RGBA8 texture shared by the software-composited backends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaTexture {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RgbaTexture {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Converts `0xAARRGGBB` values into RGBA byte order.
    pub fn upload_argb(&mut self, pixels: &[u32]) {
        for (dst, &pixel) in self.data.chunks_exact_mut(4).zip(pixels) {
            dst.copy_from_slice(&Rgba8::from_argb(pixel).to_bytes());
        }
    }
}

pub fn fill(frame: &mut [u8], color: [u8; 4]) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&color);
    }
}

/// Nearest-neighbour scale of `src` over a whole `width` x `height` frame.
pub fn blit_stretched(src: &RgbaTexture, frame: &mut [u8], width: u32, height: u32) {
    if src.width == 0 || src.height == 0 || width == 0 || height == 0 {
        return;
    }

    let (src_w, src_h) = (src.width as usize, src.height as usize);
    let (dst_w, dst_h) = (width as usize, height as usize);
    for y in 0..dst_h {
        let sy = y * src_h / dst_h;
        for x in 0..dst_w {
            let sx = x * src_w / dst_w;
            let di = (y * dst_w + x) * 4;
            let si = (sy * src_w + sx) * 4;
            if di + 4 <= frame.len() && si + 4 <= src.data.len() {
                frame[di..di + 4].copy_from_slice(&src.data[si..si + 4]);
            }
        }
    }
}
