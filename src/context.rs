// eglman/src/context.rs
//
//! Rendering contexts and the current-context binding.

use crate::display::Display;
use crate::egl;
use crate::egl::types::EGLContext;
use crate::error::{Error, ToEglError};
use crate::surface::Surface;

use log::{debug, error, warn};
use std::fmt;
use std::rc::Rc;

/// A rendering context owned by the driver, created against a display and
/// one of its configurations.
///
/// `Context` is cheap to clone; the native context is destroyed when the
/// last clone drops. The "current" binding is per-thread driver state and
/// is not owned by this object.
#[derive(Clone)]
pub struct Context {
    shared: Rc<ContextShared>,
}

struct ContextShared {
    display: Display,
    raw: EGLContext,
}

impl Drop for ContextShared {
    fn drop(&mut self) {
        let egl = self.display.functions();
        unsafe {
            if egl.DestroyContext(self.display.raw(), self.raw) == egl::FALSE {
                warn!(
                    "EGL: unable to destroy context {:?} ({})",
                    self.raw,
                    egl.GetError().to_egl_error()
                );
                return;
            }
        }
        debug!("EGL: destroyed context {:?}", self.raw);
    }
}

impl Context {
    /// Wraps a context handle created outside this crate.
    ///
    /// # Safety
    ///
    /// `raw` must be a live context created against `display`. The returned
    /// value takes ownership and destroys the context when the last clone
    /// drops.
    pub unsafe fn from_raw(display: &Display, raw: EGLContext) -> Context {
        Context {
            shared: Rc::new(ContextShared {
                display: display.clone(),
                raw,
            }),
        }
    }

    /// Binds this context to one surface for both drawing and reading, on
    /// the calling thread.
    pub fn make_current(&self, surface: &Surface) -> Result<(), Error> {
        self.make_current_draw_read(surface, surface)
    }

    /// Binds this context with distinct draw and read surfaces.
    ///
    /// Losing the current binding mid-frame is usually fatal to a renderer,
    /// so failures are logged at error severity before being returned; the
    /// previously current context is left in place by the driver.
    pub fn make_current_draw_read(&self, draw: &Surface, read: &Surface) -> Result<(), Error> {
        let display = &self.shared.display;
        let egl = display.functions();
        unsafe {
            if egl.MakeCurrent(display.raw(), draw.raw(), read.raw(), self.shared.raw)
                == egl::FALSE
            {
                let err = egl.GetError().to_egl_error();
                error!(
                    "EGL: cannot make context {:?} current on display {:?} ({})",
                    self.shared.raw,
                    display.raw(),
                    err
                );
                return Err(Error::MakeCurrentFailed(err));
            }
        }
        Ok(())
    }

    /// The display this context was created against.
    #[inline]
    pub fn display(&self) -> &Display {
        &self.shared.display
    }

    /// Returns the raw `EGLContext` handle.
    #[inline]
    pub fn raw(&self) -> EGLContext {
        self.shared.raw
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "Context({:?})", self.shared.raw)
    }
}
