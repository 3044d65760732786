// eglman/src/device.rs
//
//! EGL entry point loading and platform device enumeration.

use crate::egl;
use crate::egl::types::EGLDeviceEXT;
use crate::egl::Egl;
use crate::error::{Error, ToEglError};

use libc::{dlopen, dlsym, RTLD_LAZY};
use std::ffi::CString;
use std::mem;
use std::os::raw::{c_char, c_void};
use std::ptr;
use std::rc::Rc;

thread_local! {
    pub(crate) static EGL_FUNCTIONS: Rc<Egl> = Rc::new(Egl::load_with(get_proc_address));
}

struct EGLLibraryWrapper(*mut c_void);

unsafe impl Send for EGLLibraryWrapper {}
unsafe impl Sync for EGLLibraryWrapper {}

lazy_static! {
    static ref EGL_LIBRARY: EGLLibraryWrapper = {
        for soname in [c"libEGL.so.1", c"libEGL.so"] {
            unsafe {
                let handle = dlopen(soname.as_ptr(), RTLD_LAZY);
                if !handle.is_null() {
                    return EGLLibraryWrapper(handle);
                }
            }
        }
        panic!("Unable to load the libEGL shared object");
    };
    static ref EGL_GET_PROC_ADDRESS: Option<EglGetProcAddress> = unsafe {
        let address = dlsym(EGL_LIBRARY.0, c"eglGetProcAddress".as_ptr());
        if address.is_null() {
            None
        } else {
            Some(mem::transmute::<*mut c_void, EglGetProcAddress>(address))
        }
    };
}

type EglGetProcAddress = extern "C" fn(name: *const c_char) -> *mut c_void;

fn get_proc_address(symbol_name: &str) -> *const c_void {
    unsafe {
        let symbol_name = CString::new(symbol_name).unwrap();
        let symbol_ptr = symbol_name.as_ptr();
        let address = dlsym(EGL_LIBRARY.0, symbol_ptr).cast_const();
        if !address.is_null() {
            return address;
        }

        // Extension entry points are only reachable through
        // `eglGetProcAddress`.
        match *EGL_GET_PROC_ADDRESS {
            Some(loader) => loader(symbol_ptr).cast_const(),
            None => ptr::null(),
        }
    }
}

/// An opaque platform-level GPU identifier, as reported by
/// [`query_devices`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Device(pub(crate) EGLDeviceEXT);

impl Device {
    /// Returns the raw `EGLDeviceEXT` token.
    #[inline]
    pub fn raw(self) -> EGLDeviceEXT {
        self.0
    }
}

/// Enumerates the platform GPU devices known to the driver, in the order
/// the driver reports them.
///
/// Fails with [`Error::MissingExtension`] when the driver does not expose
/// the `eglQueryDevicesEXT` entry point.
pub fn query_devices() -> Result<Vec<Device>, Error> {
    EGL_FUNCTIONS.with(|egl| query_devices_with(egl))
}

pub(crate) fn query_devices_with(egl: &Egl) -> Result<Vec<Device>, Error> {
    if !egl.QueryDevicesEXT.is_loaded() {
        return Err(Error::MissingExtension("eglQueryDevicesEXT"));
    }

    unsafe {
        let mut device_count = 0;
        if egl.QueryDevicesEXT(0, ptr::null_mut(), &mut device_count) == egl::FALSE {
            return Err(Error::DeviceQueryFailed(egl.GetError().to_egl_error()));
        }

        let mut devices: Vec<EGLDeviceEXT> = vec![ptr::null(); device_count as usize];
        if egl.QueryDevicesEXT(device_count, devices.as_mut_ptr(), &mut device_count) == egl::FALSE
        {
            return Err(Error::DeviceQueryFailed(egl.GetError().to_egl_error()));
        }

        devices.truncate(device_count as usize);
        Ok(devices.into_iter().map(Device).collect())
    }
}
