// eglman/src/surface.rs
//
//! Drawable surfaces bound to a display.

use crate::display::Display;
use crate::egl;
use crate::egl::types::EGLSurface;
use crate::error::ToEglError;

use log::{debug, warn};
use std::fmt;
use std::rc::Rc;

/// A drawable target owned by the driver, scoped to the display it was
/// created against.
///
/// `Surface` is cheap to clone; the native surface is destroyed when the
/// last clone drops. Each surface holds its [`Display`] alive.
#[derive(Clone)]
pub struct Surface {
    shared: Rc<SurfaceShared>,
}

struct SurfaceShared {
    display: Display,
    raw: EGLSurface,
}

impl Drop for SurfaceShared {
    fn drop(&mut self) {
        let egl = self.display.functions();
        unsafe {
            if egl.DestroySurface(self.display.raw(), self.raw) == egl::FALSE {
                warn!(
                    "EGL: unable to destroy surface {:?} ({})",
                    self.raw,
                    egl.GetError().to_egl_error()
                );
                return;
            }
        }
        debug!("EGL: destroyed surface {:?}", self.raw);
    }
}

impl Surface {
    /// Wraps a surface handle created outside this crate.
    ///
    /// # Safety
    ///
    /// `raw` must be a live surface created against `display`. The returned
    /// value takes ownership and destroys the surface when the last clone
    /// drops.
    pub unsafe fn from_raw(display: &Display, raw: EGLSurface) -> Surface {
        Surface {
            shared: Rc::new(SurfaceShared {
                display: display.clone(),
                raw,
            }),
        }
    }

    /// The display this surface was created against.
    #[inline]
    pub fn display(&self) -> &Display {
        &self.shared.display
    }

    /// Returns the raw `EGLSurface` handle.
    #[inline]
    pub fn raw(&self) -> EGLSurface {
        self.shared.raw
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "Surface({:?})", self.shared.raw)
    }
}
