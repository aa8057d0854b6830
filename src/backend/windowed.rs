use super::raster::{self, RgbaTexture};
use crate::surface::{Device, Rgba8, SurfaceConfig, SurfaceError, SurfaceResult};
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{Event, WindowEvent};
use winit::event_loop::EventLoop;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window, WindowBuilder, WindowId};

// winit allows a single event loop per process and never lets it be rebuilt,
// so it outlives individual surfaces and is shared by every window on this thread.
// Whichever surface pumps it files events for every window into the mailbox.
thread_local! {
    static EVENT_LOOP: RefCell<Option<EventLoop<()>>> = const { RefCell::new(None) };
    static MAILBOX: RefCell<EventMailbox<WindowId>> = RefCell::new(EventMailbox::default());
}

/// Window events that have been pumped but not yet collected by their window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingEvents {
    pub close_requested: bool,
    /// Only the latest size matters.
    pub resized: Option<PhysicalSize<u32>>,
}

/// Per-window pending events, plus a sticky flag for the loop itself exiting.
#[derive(Debug)]
pub struct EventMailbox<K> {
    pending: HashMap<K, PendingEvents>,
    loop_exited: bool,
}

impl<K> Default for EventMailbox<K> {
    fn default() -> Self {
        Self {
            pending: HashMap::new(),
            loop_exited: false,
        }
    }
}

impl<K: Eq + Hash> EventMailbox<K> {
    pub fn record(&mut self, window: K, event: &WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.pending.entry(window).or_default().close_requested = true;
            }
            WindowEvent::Resized(size) => {
                self.pending.entry(window).or_default().resized = Some(*size);
            }
            _ => {}
        }
    }

    pub fn mark_exited(&mut self) {
        self.loop_exited = true;
    }

    /// Drains what was recorded for `window`. An exited loop reads as a close.
    pub fn take(&mut self, window: &K) -> PendingEvents {
        let mut events = self.pending.remove(window).unwrap_or_default();
        events.close_requested |= self.loop_exited;
        events
    }

    pub fn forget(&mut self, window: &K) {
        self.pending.remove(window);
    }
}

fn with_event_loop<R>(f: impl FnOnce(&mut EventLoop<()>) -> R) -> SurfaceResult<R> {
    EVENT_LOOP.with_borrow_mut(|slot| {
        if slot.is_none() {
            let event_loop =
                EventLoop::new().map_err(|e| SurfaceError::EventLoop(e.to_string()))?;
            *slot = Some(event_loop);
        }
        slot.as_mut()
            .map(f)
            .ok_or_else(|| SurfaceError::EventLoop("event loop not created".into()))
    })
}

/// Native window through `winit`, presented on the GPU by `pixels`.
///
/// The `pixels` frame always matches the window's physical size; uploaded
/// textures are scaled into it on the CPU before `render`.
pub struct WinitDevice {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    draw_color: Rgba8,
}

impl WinitDevice {
    pub fn new() -> Self {
        Self {
            window: None,
            pixels: None,
            draw_color: Rgba8::BLACK,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(pixels) = self.pixels.as_mut() {
            if let Err(e) = pixels.resize_surface(width, height) {
                log::error!("Failed to resize surface: {}", e);
            }
            if let Err(e) = pixels.resize_buffer(width, height) {
                log::error!("Failed to resize frame buffer: {}", e);
            }
        }
    }
}

impl Default for WinitDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for WinitDevice {
    type Texture = RgbaTexture;

    fn open(&mut self, config: &SurfaceConfig) -> SurfaceResult<()> {
        let window = with_event_loop(|event_loop| {
            WindowBuilder::new()
                .with_title(config.title.as_str())
                .with_inner_size(LogicalSize::new(config.width, config.height))
                .with_resizable(config.resizable)
                .build(&**event_loop)
        })?
        .map_err(|e| SurfaceError::Window(e.to_string()))?;
        let window = Arc::new(window);

        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));
        let surface = SurfaceTexture::new(width, height, Arc::clone(&window));
        let pixels = PixelsBuilder::new(width, height, surface)
            .enable_vsync(config.vsync)
            .build()
            .map_err(|e| SurfaceError::Context(e.to_string()))?;

        log::debug!(
            "Opened {}x{} window ({}x{} physical)",
            config.width,
            config.height,
            width,
            height
        );
        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }

    fn set_draw_color(&mut self, color: Rgba8) {
        self.draw_color = color;
    }

    fn clear(&mut self) {
        if let Some(pixels) = self.pixels.as_mut() {
            raster::fill(pixels.frame_mut(), self.draw_color.to_bytes());
        }
    }

    fn create_texture(&mut self, width: u32, height: u32) -> SurfaceResult<RgbaTexture> {
        Ok(RgbaTexture::new(width, height))
    }

    fn update_texture(&mut self, texture: &mut RgbaTexture, pixels: &[u32]) {
        texture.upload_argb(pixels);
    }

    fn draw_texture(&mut self, texture: &RgbaTexture) {
        if let Some(pixels) = self.pixels.as_mut() {
            let extent = pixels.context().texture_extent;
            raster::blit_stretched(texture, pixels.frame_mut(), extent.width, extent.height);
        }
    }

    fn destroy_texture(&mut self, texture: RgbaTexture) {
        drop(texture);
    }

    fn present(&mut self) {
        if let Some(pixels) = self.pixels.as_mut() {
            if let Err(e) = pixels.render() {
                log::error!("Failed to present frame: {}", e);
            }
        }
    }

    fn pump_events(&mut self) -> bool {
        let Some(window_id) = self.window.as_ref().map(|w| w.id()) else {
            return false;
        };

        let status = with_event_loop(|event_loop| {
            event_loop.pump_events(Some(Duration::ZERO), |event, _| {
                if let Event::WindowEvent { window_id: id, event } = event {
                    MAILBOX.with_borrow_mut(|mailbox| mailbox.record(id, &event));
                }
            })
        });

        match status {
            Ok(PumpStatus::Exit(code)) => {
                log::debug!("Event loop exited with code {}", code);
                MAILBOX.with_borrow_mut(EventMailbox::mark_exited);
            }
            Ok(PumpStatus::Continue) => {}
            Err(e) => log::error!("{}", e),
        }

        let events = MAILBOX.with_borrow_mut(|mailbox| mailbox.take(&window_id));
        if let Some(size) = events.resized {
            self.resize(size.width, size.height);
        }
        !events.close_requested
    }

    fn close(&mut self) {
        if let Some(window) = self.window.as_ref() {
            let id = window.id();
            MAILBOX.with_borrow_mut(|mailbox| mailbox.forget(&id));
        }
        self.pixels = None;
        self.window = None;
    }
}
