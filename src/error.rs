// eglman/src/error.rs
//
//! Various errors that methods can produce.

use crate::egl;
use crate::egl::types::{EGLenum, EGLint};
use crate::gl;
use crate::gl::types::GLenum;

use std::error;
use std::fmt;

/// Failures reported while creating or driving native EGL and GL objects.
///
/// Creation failures are raised immediately and carry the driver's
/// translated diagnostic; destruction failures are never raised (they are
/// logged instead, since destructors must not fail).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// No EGL display matched the requested native display.
    NoDisplayFound,
    /// The display connection could not be initialized.
    DisplayInitializationFailed(EglError),
    /// Querying the available framebuffer configurations failed.
    ConfigQueryFailed(EglError),
    /// Filtering framebuffer configurations by attributes failed.
    ConfigChoiceFailed(EglError),
    /// The driver could not create the requested surface.
    SurfaceCreationFailed(EglError),
    /// The driver could not create the rendering context.
    ContextCreationFailed(EglError),
    /// The context could not be made current against the given surfaces.
    MakeCurrentFailed(EglError),
    /// Enumerating platform devices failed.
    DeviceQueryFailed(EglError),
    /// An optional driver extension entry point could not be resolved.
    MissingExtension(&'static str),
    /// The driver returned no shader object.
    ShaderCreationFailed,
    /// Shader compilation failed. Carries the driver's info log, which may
    /// be empty.
    ShaderCompilationFailed(String),
    /// The driver returned no program object.
    ProgramCreationFailed,
    /// Program linking failed. Carries the driver's info log, which may be
    /// empty.
    ProgramLinkFailed(String),
    /// A GL error was raised while setting up an object.
    Gl(GlError),
    /// A freshly assembled framebuffer did not validate as complete; the
    /// display text is the native status name.
    FramebufferIncomplete(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::NoDisplayFound => write!(f, "EGL: no display found"),
            Error::DisplayInitializationFailed(err) => {
                write!(f, "EGL: cannot initialize display connection ({})", err)
            }
            Error::ConfigQueryFailed(err) => {
                write!(f, "EGL: cannot get available configurations ({})", err)
            }
            Error::ConfigChoiceFailed(err) => {
                write!(f, "EGL: cannot choose configuration ({})", err)
            }
            Error::SurfaceCreationFailed(err) => {
                write!(f, "EGL: cannot create surface ({})", err)
            }
            Error::ContextCreationFailed(err) => {
                write!(f, "EGL: cannot create context ({})", err)
            }
            Error::MakeCurrentFailed(err) => {
                write!(f, "EGL: cannot make context current ({})", err)
            }
            Error::DeviceQueryFailed(err) => write!(f, "EGL: cannot query devices ({})", err),
            Error::MissingExtension(name) => {
                write!(f, "EGL: unable to get <{}> extension", name)
            }
            Error::ShaderCreationFailed => write!(f, "GL: cannot create shader"),
            Error::ShaderCompilationFailed(ref log) if log.is_empty() => {
                write!(f, "GL: cannot compile shader")
            }
            Error::ShaderCompilationFailed(ref log) => {
                write!(f, "GL: cannot compile shader: {}", log)
            }
            Error::ProgramCreationFailed => write!(f, "GL: cannot create program"),
            Error::ProgramLinkFailed(ref log) if log.is_empty() => {
                write!(f, "GL: cannot link program")
            }
            Error::ProgramLinkFailed(ref log) => write!(f, "GL: cannot link program: {}", log),
            Error::Gl(err) => write!(f, "{}", err),
            Error::FramebufferIncomplete(status) => f.write_str(status),
        }
    }
}

impl error::Error for Error {}

/// EGL error codes, translated to the driver's diagnostic text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EglError {
    /// The last function succeeded.
    Success,
    /// EGL is not initialized, or could not be initialized, for the display.
    NotInitialized,
    /// EGL cannot access a requested resource.
    BadAccess,
    /// EGL failed to allocate resources for the requested operation.
    BadAlloc,
    /// An unrecognized attribute or attribute value was passed.
    BadAttribute,
    /// An `EGLConfig` argument does not name a valid configuration.
    BadConfig,
    /// An `EGLContext` argument does not name a valid rendering context.
    BadContext,
    /// The current surface of the calling thread is no longer valid.
    BadCurrentSurface,
    /// An `EGLDisplay` argument does not name a valid display connection.
    BadDisplay,
    /// Arguments are inconsistent with each other.
    BadMatch,
    /// A native pixmap argument does not refer to a valid native pixmap.
    BadNativePixmap,
    /// A native window argument does not refer to a valid native window.
    BadNativeWindow,
    /// One or more argument values are invalid.
    BadParameter,
    /// An `EGLSurface` argument does not name a valid surface.
    BadSurface,
    /// A power management event has occurred.
    ContextLost,
    /// The driver reported a code this crate does not know about.
    Unknown,
}

impl EglError {
    /// The driver's human-readable description of this error, verbatim.
    pub fn description(self) -> &'static str {
        match self {
            EglError::Success => "The last function succeeded without error.",
            EglError::NotInitialized => {
                "EGL is not initialized, or could not be initialized, for the \
                 specified EGL display connection."
            }
            EglError::BadAccess => "EGL cannot access a requested resource",
            EglError::BadAlloc => {
                "EGL failed to allocate resources for the requested operation."
            }
            EglError::BadAttribute => {
                "An unrecognized attribute or attribute value was passed in the \
                 attribute list."
            }
            EglError::BadConfig => {
                "An EGLConfig argument does not name a valid EGL frame buffer \
                 configuration."
            }
            EglError::BadContext => {
                "An EGLContext argument does not name a valid EGL rendering context."
            }
            EglError::BadCurrentSurface => {
                "The current surface of the calling thread is a window, pixel \
                 buffer or pixmap that is no longer valid."
            }
            EglError::BadDisplay => {
                "An EGLDisplay argument does not name a valid EGL display connection."
            }
            EglError::BadMatch => {
                "Arguments are inconsistent (for example, a valid context requires \
                 buffers not supplied by a valid surface)."
            }
            EglError::BadNativePixmap => {
                "A NativePixmapType argument does not refer to a valid native pixmap."
            }
            EglError::BadNativeWindow => {
                "A NativeWindowType argument does not refer to a valid native window."
            }
            EglError::BadParameter => "One or more argument values are invalid.",
            EglError::BadSurface => {
                "An EGLSurface argument does not name a valid surface (window, \
                 pixel buffer or pixmap) configured for GL rendering."
            }
            EglError::ContextLost => {
                "A power management event has occurred. The application must \
                 destroy all contexts and reinitialise OpenGL ES state and objects \
                 to continue rendering."
            }
            EglError::Unknown => "Unknown error.",
        }
    }
}

impl fmt::Display for EglError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Translation of raw `eglGetError` codes.
pub(crate) trait ToEglError {
    fn to_egl_error(self) -> EglError;
}

impl ToEglError for EGLint {
    fn to_egl_error(self) -> EglError {
        match self as EGLenum {
            egl::SUCCESS => EglError::Success,
            egl::NOT_INITIALIZED => EglError::NotInitialized,
            egl::BAD_ACCESS => EglError::BadAccess,
            egl::BAD_ALLOC => EglError::BadAlloc,
            egl::BAD_ATTRIBUTE => EglError::BadAttribute,
            egl::BAD_CONFIG => EglError::BadConfig,
            egl::BAD_CONTEXT => EglError::BadContext,
            egl::BAD_CURRENT_SURFACE => EglError::BadCurrentSurface,
            egl::BAD_DISPLAY => EglError::BadDisplay,
            egl::BAD_MATCH => EglError::BadMatch,
            egl::BAD_NATIVE_PIXMAP => EglError::BadNativePixmap,
            egl::BAD_NATIVE_WINDOW => EglError::BadNativeWindow,
            egl::BAD_PARAMETER => EglError::BadParameter,
            egl::BAD_SURFACE => EglError::BadSurface,
            egl::CONTEXT_LOST => EglError::ContextLost,
            _ => EglError::Unknown,
        }
    }
}

/// GL error codes raised by `glGetError` during object setup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlError {
    /// An enum argument was out of range.
    InvalidEnum,
    /// A numeric argument was out of range.
    InvalidValue,
    /// The operation is not allowed in the current state.
    InvalidOperation,
    /// The framebuffer object is not complete.
    InvalidFramebufferOperation,
    /// There is not enough memory left to execute the command.
    OutOfMemory,
    /// The driver reported a code this crate does not know about.
    Unknown,
}

impl GlError {
    pub(crate) fn from_raw(code: GLenum) -> GlError {
        match code {
            gl::INVALID_ENUM => GlError::InvalidEnum,
            gl::INVALID_VALUE => GlError::InvalidValue,
            gl::INVALID_OPERATION => GlError::InvalidOperation,
            gl::INVALID_FRAMEBUFFER_OPERATION => GlError::InvalidFramebufferOperation,
            gl::OUT_OF_MEMORY => GlError::OutOfMemory,
            _ => GlError::Unknown,
        }
    }

    /// A short message naming this error.
    pub fn description(self) -> &'static str {
        match self {
            GlError::InvalidEnum => "gl_invalid_enum",
            GlError::InvalidValue => "gl_invalid_value",
            GlError::InvalidOperation => "gl_invalid_operation",
            GlError::InvalidFramebufferOperation => "gl_invalid_framebuffer_operation",
            GlError::OutOfMemory => "gl_out_of_memory",
            GlError::Unknown => "gl_unknown_error",
        }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.description())
    }
}
