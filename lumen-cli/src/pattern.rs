/// Animated test card in `0xAARRGGBB`: red ramps left to right, green top to
/// bottom, blue cycles with `tick`.
pub fn gradient(width: u32, height: u32, tick: u64) -> Vec<u32> {
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    let blue = (tick % 256) as u32;
    for y in 0..height {
        let green = y * 255 / height.saturating_sub(1).max(1);
        for x in 0..width {
            let red = x * 255 / width.saturating_sub(1).max(1);
            pixels.push(0xFF00_0000 | (red << 16) | (green << 8) | blue);
        }
    }
    pixels
}
