// eglman/src/display.rs
//
//! Display connections and framebuffer configuration enumeration.

use crate::context::Context;
use crate::device::{Device, EGL_FUNCTIONS};
use crate::egl;
use crate::egl::types::{EGLConfig, EGLDisplay, EGLNativeDisplayType, EGLint};
use crate::egl::Egl;
use crate::error::{Error, ToEglError};
use crate::gl::Gl;
use crate::surface::Surface;

use log::{debug, error, warn};
use std::ffi::CString;
use std::fmt;
use std::os::raw::c_void;
use std::ptr;
use std::rc::Rc;

/// An opaque token describing one framebuffer pixel/capability
/// configuration supported by a display.
///
/// Configurations are borrowed from the driver-managed list; there is
/// nothing to release.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config(pub(crate) EGLConfig);

impl Config {
    /// Returns the raw `EGLConfig` handle.
    #[inline]
    pub fn raw(self) -> EGLConfig {
        self.0
    }
}

/// A live, initialized connection to the native display subsystem.
///
/// `Display` is cheap to clone. All clones share one connection, which is
/// terminated when the last clone drops; surfaces and contexts created from
/// a display each hold a clone, so the connection outlives them all.
#[derive(Clone)]
pub struct Display {
    shared: Rc<DisplayShared>,
}

struct DisplayShared {
    egl: Rc<Egl>,
    raw: EGLDisplay,
}

impl Drop for DisplayShared {
    fn drop(&mut self) {
        unsafe {
            if self.egl.Terminate(self.raw) == egl::FALSE {
                warn!(
                    "EGL: unable to terminate connection to display {:?} ({})",
                    self.raw,
                    self.egl.GetError().to_egl_error()
                );
                return;
            }
        }
        debug!("EGL: closed connection to display {:?}", self.raw);
    }
}

impl Display {
    /// Opens and initializes the default display.
    pub fn new() -> Result<Display, Error> {
        Display::from_native(egl::DEFAULT_DISPLAY)
    }

    /// Opens and initializes the display for a native display handle.
    pub fn from_native(native_display: EGLNativeDisplayType) -> Result<Display, Error> {
        EGL_FUNCTIONS.with(|egl| Display::open(egl.clone(), native_display))
    }

    /// Opens the display bound to an enumerated platform device, resolved
    /// through `eglGetPlatformDisplayEXT`.
    ///
    /// Fails with [`Error::MissingExtension`] when the driver does not
    /// expose that entry point.
    pub fn from_device(device: &Device) -> Result<Display, Error> {
        EGL_FUNCTIONS.with(|egl| Display::open_device(egl.clone(), device))
    }

    pub(crate) fn open(
        egl: Rc<Egl>,
        native_display: EGLNativeDisplayType,
    ) -> Result<Display, Error> {
        let raw = unsafe { egl.GetDisplay(native_display) };
        Display::initialize(egl, raw)
    }

    pub(crate) fn open_device(egl: Rc<Egl>, device: &Device) -> Result<Display, Error> {
        if !egl.GetPlatformDisplayEXT.is_loaded() {
            return Err(Error::MissingExtension("eglGetPlatformDisplayEXT"));
        }
        let raw = unsafe {
            egl.GetPlatformDisplayEXT(
                egl::PLATFORM_DEVICE_EXT,
                device.raw() as *mut c_void,
                ptr::null(),
            )
        };
        Display::initialize(egl, raw)
    }

    fn initialize(egl: Rc<Egl>, raw: EGLDisplay) -> Result<Display, Error> {
        if raw == egl::NO_DISPLAY {
            error!("EGL: no display found");
            return Err(Error::NoDisplayFound);
        }

        let (mut major, mut minor) = (0, 0);
        unsafe {
            if egl.Initialize(raw, &mut major, &mut minor) == egl::FALSE {
                let err = egl.GetError().to_egl_error();
                error!("EGL: cannot initialize display connection ({})", err);
                return Err(Error::DisplayInitializationFailed(err));
            }
        }

        debug!(
            "EGL: initialized display {:?} (EGL version {}.{})",
            raw, major, minor
        );
        Ok(Display {
            shared: Rc::new(DisplayShared { egl, raw }),
        })
    }

    /// Returns the raw `EGLDisplay` handle for interop with native code.
    #[inline]
    pub fn raw(&self) -> EGLDisplay {
        self.shared.raw
    }

    pub(crate) fn functions(&self) -> &Rc<Egl> {
        &self.shared.egl
    }

    /// Returns the available framebuffer configurations, in driver order.
    ///
    /// A `limit` of zero or less fetches all of them: the count is queried
    /// first and the result sized to exactly what the driver reports. A
    /// positive `limit` caps the fetch.
    pub fn get_configs(&self, limit: EGLint) -> Result<Vec<Config>, Error> {
        let egl = &self.shared.egl;
        unsafe {
            let mut config_count = 0;
            let limit = if limit <= 0 {
                if egl.GetConfigs(self.raw(), ptr::null_mut(), 0, &mut config_count) == egl::FALSE
                {
                    return Err(Error::ConfigQueryFailed(egl.GetError().to_egl_error()));
                }
                config_count
            } else {
                limit
            };

            let mut configs: Vec<EGLConfig> = vec![ptr::null(); limit as usize];
            if egl.GetConfigs(self.raw(), configs.as_mut_ptr(), limit, &mut config_count)
                == egl::FALSE
            {
                return Err(Error::ConfigQueryFailed(egl.GetError().to_egl_error()));
            }

            configs.truncate(config_count as usize);
            Ok(configs.into_iter().map(Config).collect())
        }
    }

    /// Returns the configurations matching an attribute list, best match
    /// first.
    ///
    /// `attribs` is a key/value list terminated by `egl::NONE`. Sizing
    /// behaves as in [`Display::get_configs`].
    pub fn choose_configs(&self, attribs: &[EGLint], limit: EGLint) -> Result<Vec<Config>, Error> {
        let egl = &self.shared.egl;
        let attribs_ptr = attrib_list_ptr(attribs);
        unsafe {
            let mut config_count = 0;
            let limit = if limit <= 0 {
                if egl.ChooseConfig(self.raw(), attribs_ptr, ptr::null_mut(), 0, &mut config_count)
                    == egl::FALSE
                {
                    return Err(Error::ConfigChoiceFailed(egl.GetError().to_egl_error()));
                }
                config_count
            } else {
                limit
            };

            let mut configs: Vec<EGLConfig> = vec![ptr::null(); limit as usize];
            if egl.ChooseConfig(
                self.raw(),
                attribs_ptr,
                configs.as_mut_ptr(),
                limit,
                &mut config_count,
            ) == egl::FALSE
            {
                return Err(Error::ConfigChoiceFailed(egl.GetError().to_egl_error()));
            }

            configs.truncate(config_count as usize);
            Ok(configs.into_iter().map(Config).collect())
        }
    }

    /// Creates an off-screen pixel buffer surface from a configuration.
    ///
    /// `attribs` is a key/value list terminated by `egl::NONE`; an empty
    /// slice selects the driver defaults.
    pub fn create_pbuffer_surface(
        &self,
        config: Config,
        attribs: &[EGLint],
    ) -> Result<Surface, Error> {
        let egl = &self.shared.egl;
        unsafe {
            let raw = egl.CreatePbufferSurface(self.raw(), config.0, attrib_list_ptr(attribs));
            if raw == egl::NO_SURFACE {
                let err = egl.GetError().to_egl_error();
                error!("EGL: cannot create surface ({})", err);
                return Err(Error::SurfaceCreationFailed(err));
            }
            debug!("EGL: created surface {:?} at display {:?}", raw, self.raw());
            Ok(Surface::from_raw(self, raw))
        }
    }

    /// Creates a rendering context from a configuration.
    ///
    /// `attribs` is a key/value list terminated by `egl::NONE` (empty for
    /// driver defaults); `share` names a context to share objects with.
    pub fn create_context(
        &self,
        config: Config,
        attribs: &[EGLint],
        share: Option<&Context>,
    ) -> Result<Context, Error> {
        let egl = &self.shared.egl;
        let share_context = share.map_or(egl::NO_CONTEXT, |context| context.raw());
        unsafe {
            let raw =
                egl.CreateContext(self.raw(), config.0, share_context, attrib_list_ptr(attribs));
            if raw == egl::NO_CONTEXT {
                let err = egl.GetError().to_egl_error();
                error!(
                    "EGL: cannot create context at display {:?} ({})",
                    self.raw(),
                    err
                );
                return Err(Error::ContextCreationFailed(err));
            }
            debug!("EGL: created context {:?} at display {:?}", raw, self.raw());
            Ok(Context::from_raw(self, raw))
        }
    }

    /// Loads the GL entry points reachable through `eglGetProcAddress` into
    /// a function table for the shader and framebuffer wrappers. Call this
    /// with a context current.
    pub fn load_gl(&self) -> Rc<Gl> {
        let egl = &self.shared.egl;
        Rc::new(Gl::load_with(|symbol| {
            let symbol = CString::new(symbol).unwrap();
            unsafe { egl.GetProcAddress(symbol.as_ptr()) as *const c_void }
        }))
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "Display({:?})", self.shared.raw)
    }
}

fn attrib_list_ptr(attribs: &[EGLint]) -> *const EGLint {
    if attribs.is_empty() {
        ptr::null()
    } else {
        attribs.as_ptr()
    }
}
