use crate::pattern;
use anyhow::{Context, Result};
use lumen::{BackendKind, RenderSurface, SurfaceConfig};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub backend: BackendKind,
    pub config: Option<PathBuf>,
    pub frames: u64,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            config: None,
            frames: 120,
        }
    }
}

/// Opens a surface and animates the test card until the window closes or
/// `frames` frames were shown. Returns the number of frames presented.
pub fn run_demo(options: &DemoOptions) -> Result<u64> {
    let config = match &options.config {
        Some(path) => SurfaceConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SurfaceConfig::default(),
    };

    let mut surface = options.backend.create_surface();
    surface
        .init(&config)
        .with_context(|| format!("Failed to open {} surface", options.backend))?;

    let presented = drive(surface.as_mut(), &config, options.frames);
    surface.shutdown();

    log::info!("Presented {} frames", presented);
    Ok(presented)
}

fn drive(surface: &mut dyn RenderSurface, config: &SurfaceConfig, frames: u64) -> u64 {
    // Half resolution so every frame exercises the stretch path.
    let (width, height) = ((config.width / 2).max(1), (config.height / 2).max(1));

    let mut tick = 0;
    while tick < frames {
        if !surface.pump_events() {
            break;
        }
        let pixels = pattern::gradient(width, height, tick);

        surface.begin_frame();
        surface.clear(0.0, 0.0, 0.0, 1.0);
        surface.present_pixels(&pixels, width, height);
        surface.end_frame();
        tick += 1;
    }
    tick
}
