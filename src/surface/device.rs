use super::color::Rgba8;
use super::config::SurfaceConfig;
use super::error::SurfaceResult;

/// Native primitives a backend provides to `DeviceSurface`.
///
/// `open` must be atomic: on error nothing it created may stay alive.
/// `close` releases the drawing context before the window and must tolerate
/// being called when `open` never succeeded.
pub trait Device {
    type Texture;

    fn open(&mut self, config: &SurfaceConfig) -> SurfaceResult<()>;

    fn set_draw_color(&mut self, color: Rgba8);

    /// Fills the whole target with the current draw color.
    fn clear(&mut self);

    fn create_texture(&mut self, width: u32, height: u32) -> SurfaceResult<Self::Texture>;

    /// `pixels` holds exactly `width * height` values in `0xAARRGGBB` order.
    fn update_texture(&mut self, texture: &mut Self::Texture, pixels: &[u32]);

    /// Draws the texture stretched over the entire target.
    fn draw_texture(&mut self, texture: &Self::Texture);

    fn destroy_texture(&mut self, texture: Self::Texture);

    fn present(&mut self);

    /// Returns `false` once the window asked to close.
    fn pump_events(&mut self) -> bool {
        true
    }

    fn close(&mut self);
}
