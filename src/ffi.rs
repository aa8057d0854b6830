//! Flat C ABI over `RenderSurface`.
//!
//! Handles are generation-checked slot keys packed into a `u64`; `0` is the
//! null handle. A destroyed handle is never reused for a different surface,
//! so calls through it are detected and ignored. Surfaces live in a registry
//! local to the calling thread because native windows must stay on the thread
//! that created them; a handle used from another thread is simply unknown.
//! Handles are 64 bits on every target, including 32-bit ones where a pointer
//! would be narrower.
//!
//! No panic or error crosses this boundary: failures become `false`, `0` or a
//! silent no-op. A caught panic is still reported by the process panic hook
//! (message on stderr, backtrace if enabled) before the default is returned;
//! hosts that want silence install their own hook with `std::panic::set_hook`.

use crate::backend::BackendKind;
use crate::logging::{self, LogLevel};
use crate::surface::{RenderSurface, SurfaceConfig};
use slotmap::{Key, KeyData, SlotMap, new_key_type};
use std::borrow::Cow;
use std::cell::RefCell;
use std::ffi::{CStr, c_char, c_int, c_void};
use std::panic::{self, AssertUnwindSafe};

pub type SurfaceHandle = u64;

pub const NULL_HANDLE: SurfaceHandle = 0;

new_key_type! {
    struct SurfaceKey;
}

thread_local! {
    static SURFACES: RefCell<SlotMap<SurfaceKey, Box<dyn RenderSurface>>> =
        RefCell::new(SlotMap::with_key());
}

fn key_of(handle: SurfaceHandle) -> Option<SurfaceKey> {
    (handle != NULL_HANDLE).then(|| SurfaceKey::from(KeyData::from_ffi(handle)))
}

fn guarded<R: Default>(op: &str, f: impl FnOnce() -> R) -> R {
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => value,
        Err(_) => {
            log::error!("{} panicked, returning default", op);
            R::default()
        }
    }
}

fn with_surface<R: Default>(
    op: &str,
    handle: SurfaceHandle,
    f: impl FnOnce(&mut dyn RenderSurface) -> R,
) -> R {
    let Some(key) = key_of(handle) else {
        return R::default();
    };

    guarded(op, || {
        SURFACES.with_borrow_mut(|surfaces| match surfaces.get_mut(key) {
            Some(surface) => f(surface.as_mut()),
            None => {
                log::debug!("{} on unknown handle {:#x}", op, handle);
                R::default()
            }
        })
    })
}

/// Puts a surface in this thread's handle table and returns its handle.
pub fn register_surface(surface: Box<dyn RenderSurface>) -> SurfaceHandle {
    SURFACES
        .with_borrow_mut(|surfaces| surfaces.insert(surface))
        .data()
        .as_ffi()
}

fn create_with(kind: BackendKind) -> SurfaceHandle {
    guarded("lumen_create", || {
        let _ = logging::init();
        let handle = register_surface(kind.create_surface());
        log::debug!("Created {} surface {:#x}", kind, handle);
        handle
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn lumen_create() -> SurfaceHandle {
    create_with(BackendKind::default())
}

#[unsafe(no_mangle)]
pub extern "C" fn lumen_create_headless() -> SurfaceHandle {
    create_with(BackendKind::Headless)
}

#[unsafe(no_mangle)]
pub extern "C" fn lumen_destroy(handle: SurfaceHandle) {
    let Some(key) = key_of(handle) else {
        return;
    };

    guarded("lumen_destroy", || {
        // dropped outside the registry borrow so shutdown never runs while it is held
        let removed = SURFACES.with_borrow_mut(|surfaces| surfaces.remove(key));
        match removed {
            Some(surface) => {
                drop(surface);
                log::debug!("Destroyed surface {:#x}", handle);
            }
            None => log::debug!("lumen_destroy on unknown handle {:#x}", handle),
        }
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn lumen_is_valid(handle: SurfaceHandle) -> bool {
    let Some(key) = key_of(handle) else {
        return false;
    };
    guarded("lumen_is_valid", || {
        SURFACES.with_borrow(|surfaces| surfaces.contains_key(key))
    })
}

/// # Safety
///
/// `title` must be null or point to a NUL-terminated string.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lumen_init(
    handle: SurfaceHandle,
    width: c_int,
    height: c_int,
    title: *const c_char,
) -> bool {
    with_surface("lumen_init", handle, |surface| {
        let title = if title.is_null() {
            SurfaceConfig::default().title
        } else {
            unsafe { CStr::from_ptr(title) }
                .to_string_lossy()
                .into_owned()
        };
        let config = SurfaceConfig::from_c_dimensions(width, height, title);
        surface.init(&config).is_ok()
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn lumen_begin_frame(handle: SurfaceHandle) {
    with_surface("lumen_begin_frame", handle, |surface| surface.begin_frame())
}

#[unsafe(no_mangle)]
pub extern "C" fn lumen_end_frame(handle: SurfaceHandle) {
    with_surface("lumen_end_frame", handle, |surface| surface.end_frame())
}

#[unsafe(no_mangle)]
pub extern "C" fn lumen_clear(handle: SurfaceHandle, r: f32, g: f32, b: f32, a: f32) {
    with_surface("lumen_clear", handle, |surface| surface.clear(r, g, b, a))
}

/// # Safety
///
/// `pixels` must be null or point to `width * height` readable 32-bit values.
/// Any alignment is accepted.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn lumen_present_pixels(
    handle: SurfaceHandle,
    pixels: *const c_void,
    width: c_int,
    height: c_int,
) {
    with_surface("lumen_present_pixels", handle, |surface| {
        if pixels.is_null() || width <= 0 || height <= 0 {
            log::warn!(
                "Ignoring pixel payload {:p} with size {}x{}",
                pixels,
                width,
                height
            );
            return;
        }

        let (width, height) = (width as u32, height as u32);
        let Some(len) = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
        else {
            return;
        };

        let bytes = unsafe { std::slice::from_raw_parts(pixels.cast::<u8>(), len) };
        let values: Cow<'_, [u32]> = match bytemuck::try_cast_slice(bytes) {
            Ok(values) => Cow::Borrowed(values),
            Err(_) => Cow::Owned(
                bytes
                    .chunks_exact(4)
                    .map(|c| u32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                    .collect(),
            ),
        };
        surface.present_pixels(&values, width, height);
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn lumen_shutdown(handle: SurfaceHandle) {
    with_surface("lumen_shutdown", handle, |surface| surface.shutdown())
}

#[unsafe(no_mangle)]
pub extern "C" fn lumen_pump_events(handle: SurfaceHandle) -> bool {
    with_surface("lumen_pump_events", handle, |surface| surface.pump_events())
}

#[unsafe(no_mangle)]
pub extern "C" fn lumen_set_log_level(level: c_int) {
    logging::set_log_level(LogLevel::from_raw(level));
}

#[unsafe(no_mangle)]
pub extern "C" fn lumen_log_level() -> c_int {
    logging::log_level() as c_int
}

