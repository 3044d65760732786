// eglman/src/lib.rs
//
//! A low-level RAII toolkit for EGL display, context, and surface
//! management, plus thin wrappers for the OpenGL shader, program, and
//! framebuffer objects typically used with an off-screen context.
//!
//! Every type here is a lightweight handle around an object owned by the
//! GPU driver: construction forwards to the native entry point and
//! translates failure codes into [`Error`], destruction releases the native
//! object when the last handle drops. The wrapped operations themselves are
//! the driver's business.
//!
//! The usual flow is: open a [`Display`], pick a [`Config`], create a
//! [`Surface`] and a [`Context`] from it, make the context current, then
//! build [`Shader`]/[`Program`]/[`FrameBuffer`] objects with the function
//! table from [`Display::load_gl`].
//!
//! Nothing in this crate is thread-safe; contexts are current per thread,
//! exactly as the native API defines, and all handles are reference-counted
//! within one thread.

#[macro_use]
extern crate lazy_static;

#[allow(non_camel_case_types, non_snake_case, non_upper_case_globals, clippy::all)]
pub mod egl {
    //! Generated EGL 1.5 bindings, including the device enumeration and
    //! platform display extensions.
    use std::os::raw::{c_long, c_void};
    pub type khronos_utime_nanoseconds_t = khronos_uint64_t;
    pub type khronos_uint64_t = u64;
    pub type khronos_ssize_t = c_long;
    pub type EGLint = i32;
    pub type EGLNativeDisplayType = *const c_void;
    pub type EGLNativePixmapType = *const c_void;
    pub type EGLNativeWindowType = *const c_void;
    pub type NativeDisplayType = EGLNativeDisplayType;
    pub type NativePixmapType = EGLNativePixmapType;
    pub type NativeWindowType = EGLNativeWindowType;
    include!(concat!(env!("OUT_DIR"), "/egl_bindings.rs"));
}

#[allow(non_camel_case_types, non_snake_case, non_upper_case_globals, clippy::all)]
pub mod gl {
    //! Generated OpenGL 3.3 core bindings.
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}

mod context;
mod device;
mod display;
mod error;
mod framebuffer;
mod shader;
mod surface;

pub use crate::context::Context;
pub use crate::device::{query_devices, Device};
pub use crate::display::{Config, Display};
pub use crate::error::{EglError, Error, GlError};
pub use crate::framebuffer::{FrameBuffer, PixelType};
pub use crate::shader::{AttributeBindings, Program, Shader, ShaderKind};
pub use crate::surface::Surface;
