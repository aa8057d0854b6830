use super::buffer::PresentationBuffer;
use super::color::Rgba8;
use super::config::SurfaceConfig;
use super::device::Device;
use super::error::{SurfaceError, SurfaceResult};
use super::{RenderSurface, SurfaceState};

/// The one `RenderSurface` implementation, generic over the native device.
pub struct DeviceSurface<D: Device> {
    device: D,
    state: SurfaceState,
    size: (u32, u32),
    buffer: PresentationBuffer<D::Texture>,
    close_requested: bool,
}

impl<D: Device> DeviceSurface<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            state: SurfaceState::Uninitialized,
            size: (0, 0),
            buffer: PresentationBuffer::new(),
            close_requested: false,
        }
    }

    /// Window size requested at init. `(0, 0)` unless `Ready`.
    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn buffer(&self) -> &PresentationBuffer<D::Texture> {
        &self.buffer
    }

    fn is_ready(&self, op: &str) -> bool {
        if self.state != SurfaceState::Ready {
            log::debug!("Ignoring {} on {:?} surface", op, self.state);
            return false;
        }
        true
    }
}

impl<D: Device> RenderSurface for DeviceSurface<D> {
    fn init(&mut self, config: &SurfaceConfig) -> SurfaceResult<()> {
        match self.state {
            SurfaceState::Ready => {
                log::warn!("Surface already initialized, keeping existing window");
                return Ok(());
            }
            SurfaceState::Shutdown => {
                log::error!("Surface init failed: {}", SurfaceError::ShutDown);
                return Err(SurfaceError::ShutDown);
            }
            SurfaceState::Uninitialized => {}
        }

        if let Err(e) = config.validate().and_then(|_| self.device.open(config)) {
            log::error!("Surface init failed: {}", e);
            return Err(e);
        }

        self.state = SurfaceState::Ready;
        self.size = (config.width, config.height);
        self.close_requested = false;
        log::info!(
            "Surface ready: {}x{} \"{}\"",
            config.width,
            config.height,
            config.title
        );
        Ok(())
    }

    fn begin_frame(&mut self) {
        // the whole target is redrawn each frame, nothing to prepare
        self.is_ready("begin_frame");
    }

    fn end_frame(&mut self) {
        if !self.is_ready("end_frame") {
            return;
        }
        self.device.present();
    }

    fn clear(&mut self, r: f32, g: f32, b: f32, a: f32) {
        if !self.is_ready("clear") {
            return;
        }
        self.device.set_draw_color(Rgba8::from_normalized(r, g, b, a));
        self.device.clear();
    }

    fn present_pixels(&mut self, pixels: &[u32], width: u32, height: u32) {
        if !self.is_ready("present_pixels") {
            return;
        }
        if width == 0 || height == 0 {
            log::warn!("Ignoring {}x{} pixel payload", width, height);
            return;
        }

        let count = width as usize * height as usize;
        if pixels.len() < count {
            log::warn!(
                "Pixel payload too short: {} values for {}x{}",
                pixels.len(),
                width,
                height
            );
            return;
        }

        let texture = match self.buffer.acquire(&mut self.device, width, height) {
            Ok(texture) => texture,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };
        self.device.update_texture(texture, &pixels[..count]);
        self.device.draw_texture(texture);
    }

    fn shutdown(&mut self) {
        if self.state != SurfaceState::Ready {
            return;
        }
        self.buffer.release(&mut self.device);
        self.device.close();
        self.state = SurfaceState::Shutdown;
        self.size = (0, 0);
        log::info!("Surface shut down");
    }

    fn pump_events(&mut self) -> bool {
        if self.state != SurfaceState::Ready {
            return false;
        }
        if !self.close_requested && !self.device.pump_events() {
            log::info!("Window close requested");
            self.close_requested = true;
        }
        !self.close_requested
    }

    fn state(&self) -> SurfaceState {
        self.state
    }
}

impl<D: Device> Drop for DeviceSurface<D> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
