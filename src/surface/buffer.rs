use super::device::Device;
use super::error::{SurfaceError, SurfaceResult};

/// Destination texture for raw pixel uploads.
///
/// Sized to the last presented payload. A size change releases the old
/// texture before creating the new one, so at most one is ever alive.
#[derive(Debug)]
pub struct PresentationBuffer<T> {
    texture: Option<T>,
    width: u32,
    height: u32,
    allocations: u64,
}

impl<T> Default for PresentationBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PresentationBuffer<T> {
    pub fn new() -> Self {
        Self {
            texture: None,
            width: 0,
            height: 0,
            allocations: 0,
        }
    }

    /// `(0, 0)` while unallocated.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn is_allocated(&self) -> bool {
        self.texture.is_some()
    }

    /// Number of textures created over this buffer's lifetime.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    pub fn needs_realloc(&self, width: u32, height: u32) -> bool {
        self.texture.is_none() || self.width != width || self.height != height
    }

    /// Returns a texture of exactly `width` x `height`, reallocating if needed.
    pub fn acquire<D>(&mut self, device: &mut D, width: u32, height: u32) -> SurfaceResult<&mut T>
    where
        D: Device<Texture = T>,
    {
        if self.needs_realloc(width, height) {
            self.release(device);
            let texture = device.create_texture(width, height)?;
            self.texture = Some(texture);
            self.width = width;
            self.height = height;
            self.allocations += 1;
            log::debug!("Allocated {}x{} presentation buffer", width, height);
        }

        self.texture.as_mut().ok_or_else(|| SurfaceError::Texture {
            width,
            height,
            reason: "buffer not allocated".into(),
        })
    }

    pub fn release<D>(&mut self, device: &mut D)
    where
        D: Device<Texture = T>,
    {
        if let Some(texture) = self.texture.take() {
            device.destroy_texture(texture);
        }
        self.width = 0;
        self.height = 0;
    }
}
