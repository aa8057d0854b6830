use super::raster::{self, RgbaTexture};
use crate::surface::{Device, Rgba8, SurfaceConfig, SurfaceError, SurfaceResult};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Snapshot of the headless render target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Frame {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            rgba: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut out = [0u8; 4];
        out.copy_from_slice(&self.rgba[i..i + 4]);
        Some(out)
    }
}

#[derive(Debug, Default)]
struct Counters {
    windows_opened: Cell<u64>,
    windows_closed: Cell<u64>,
    textures_created: Cell<u64>,
    textures_destroyed: Cell<u64>,
    peak_live_textures: Cell<u64>,
    frames_presented: Cell<u64>,
    last_clear: Cell<Option<Rgba8>>,
    last_frame: RefCell<Option<Frame>>,
    close_requested: Cell<bool>,
}

/// Shared view of what a `HeadlessDevice` did. Clones observe the same device.
#[derive(Debug, Clone, Default)]
pub struct DeviceStats(Rc<Counters>);

impl DeviceStats {
    pub fn windows_open(&self) -> u64 {
        self.0.windows_opened.get() - self.0.windows_closed.get()
    }

    pub fn textures_created(&self) -> u64 {
        self.0.textures_created.get()
    }

    pub fn live_textures(&self) -> u64 {
        self.0.textures_created.get() - self.0.textures_destroyed.get()
    }

    /// Most textures ever alive at once.
    pub fn peak_live_textures(&self) -> u64 {
        self.0.peak_live_textures.get()
    }

    pub fn frames_presented(&self) -> u64 {
        self.0.frames_presented.get()
    }

    pub fn last_clear(&self) -> Option<Rgba8> {
        self.0.last_clear.get()
    }

    pub fn last_frame(&self) -> Option<Frame> {
        self.0.last_frame.borrow().clone()
    }

    /// Simulates the user closing the window.
    pub fn request_close(&self) {
        self.0.close_requested.set(true);
    }

    fn bump(counter: &Cell<u64>) {
        counter.set(counter.get() + 1);
    }
}

/// In-memory device: no window system, every operation lands in a plain
/// RGBA target that `DeviceStats` can inspect.
#[derive(Debug, Default)]
pub struct HeadlessDevice {
    stats: DeviceStats,
    target: Option<Frame>,
    draw_color: Rgba8,
    open_failures: u32,
}

impl HeadlessDevice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_stats(stats: DeviceStats) -> Self {
        Self {
            stats,
            ..Self::default()
        }
    }

    /// The next `count` calls to `open` fail.
    pub fn with_open_failures(mut self, count: u32) -> Self {
        self.open_failures = count;
        self
    }

    pub fn stats(&self) -> &DeviceStats {
        &self.stats
    }
}

impl Device for HeadlessDevice {
    type Texture = RgbaTexture;

    fn open(&mut self, config: &SurfaceConfig) -> SurfaceResult<()> {
        if self.open_failures > 0 {
            self.open_failures -= 1;
            return Err(SurfaceError::Window("headless window refused".into()));
        }
        self.target = Some(Frame::new(config.width, config.height));
        self.draw_color = Rgba8::BLACK;
        DeviceStats::bump(&self.stats.0.windows_opened);
        Ok(())
    }

    fn set_draw_color(&mut self, color: Rgba8) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        if let Some(target) = self.target.as_mut() {
            raster::fill(&mut target.rgba, self.draw_color.to_bytes());
            self.stats.0.last_clear.set(Some(self.draw_color));
        }
    }

    fn create_texture(&mut self, width: u32, height: u32) -> SurfaceResult<RgbaTexture> {
        DeviceStats::bump(&self.stats.0.textures_created);
        let live = self.stats.live_textures();
        let peak = &self.stats.0.peak_live_textures;
        peak.set(peak.get().max(live));
        Ok(RgbaTexture::new(width, height))
    }

    fn update_texture(&mut self, texture: &mut RgbaTexture, pixels: &[u32]) {
        texture.upload_argb(pixels);
    }

    fn draw_texture(&mut self, texture: &RgbaTexture) {
        if let Some(target) = self.target.as_mut() {
            raster::blit_stretched(texture, &mut target.rgba, target.width, target.height);
        }
    }

    fn destroy_texture(&mut self, texture: RgbaTexture) {
        drop(texture);
        DeviceStats::bump(&self.stats.0.textures_destroyed);
    }

    fn present(&mut self) {
        if let Some(target) = self.target.as_ref() {
            DeviceStats::bump(&self.stats.0.frames_presented);
            *self.stats.0.last_frame.borrow_mut() = Some(target.clone());
        }
    }

    fn pump_events(&mut self) -> bool {
        !self.stats.0.close_requested.get()
    }

    fn close(&mut self) {
        if self.target.take().is_some() {
            DeviceStats::bump(&self.stats.0.windows_closed);
        }
    }
}
