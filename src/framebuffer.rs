// eglman/src/framebuffer.rs
//
//! Off-screen render targets backed by depth and color textures.

use crate::error::{Error, GlError};
use crate::gl;
use crate::gl::types::{GLenum, GLint, GLuint};
use crate::gl::Gl;

use euclid::default::Size2D;
use log::warn;
use std::fmt;
use std::ptr;
use std::rc::Rc;

/// Color texture formats a [`FrameBuffer`] can allocate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelType {
    /// 8 bits per channel, no alpha.
    Rgb8,
    /// 8 bits per channel with alpha.
    Rgba8,
    /// 32-bit floating point channels, no alpha.
    Rgb32f,
    /// 32-bit floating point channels with alpha.
    Rgba32f,
}

impl PixelType {
    fn internal_format(self) -> GLenum {
        match self {
            PixelType::Rgb8 => gl::RGB8,
            PixelType::Rgba8 => gl::RGBA8,
            PixelType::Rgb32f => gl::RGB32F,
            PixelType::Rgba32f => gl::RGBA32F,
        }
    }

    fn format(self) -> GLenum {
        match self {
            PixelType::Rgb8 | PixelType::Rgb32f => gl::RGB,
            PixelType::Rgba8 | PixelType::Rgba32f => gl::RGBA,
        }
    }

    fn data_type(self) -> GLenum {
        match self {
            PixelType::Rgb8 | PixelType::Rgba8 => gl::UNSIGNED_BYTE,
            PixelType::Rgb32f | PixelType::Rgba32f => gl::FLOAT,
        }
    }
}

/// An off-screen render target: a framebuffer object with one depth and one
/// color texture attached.
///
/// Single-owner RAII; dropping the value deletes all three driver objects.
pub struct FrameBuffer {
    gl: Rc<Gl>,
    size: Size2D<i32>,
    pixel_type: PixelType,
    framebuffer: GLuint,
    depth_texture: GLuint,
    color_texture: GLuint,
}

impl FrameBuffer {
    /// Allocates the depth and color textures, attaches them to a fresh
    /// framebuffer object, and validates completeness. Call with a context
    /// current.
    pub fn new(
        gl: &Rc<Gl>,
        size: Size2D<i32>,
        pixel_type: PixelType,
    ) -> Result<FrameBuffer, Error> {
        let mut framebuffer = FrameBuffer {
            gl: gl.clone(),
            size,
            pixel_type,
            framebuffer: 0,
            depth_texture: 0,
            color_texture: 0,
        };
        framebuffer.init()?;
        Ok(framebuffer)
    }

    /// Allocates an 8-bit RGB target, with an alpha channel when requested.
    pub fn rgb(gl: &Rc<Gl>, size: Size2D<i32>, alpha: bool) -> Result<FrameBuffer, Error> {
        let pixel_type = if alpha {
            PixelType::Rgba8
        } else {
            PixelType::Rgb8
        };
        FrameBuffer::new(gl, size, pixel_type)
    }

    fn init(&mut self) -> Result<(), Error> {
        let gl = &self.gl;
        unsafe {
            check_gl(gl, "pre-framebuffer check")?;

            // Depth texture.
            gl.ActiveTexture(gl::TEXTURE0 + 5);
            gl.GenTextures(1, &mut self.depth_texture);
            gl.BindTexture(gl::TEXTURE_2D, self.depth_texture);
            gl.TexImage2D(
                gl::TEXTURE_2D,
                0,
                gl::DEPTH_COMPONENT32 as GLint,
                self.size.width,
                self.size.height,
                0,
                gl::DEPTH_COMPONENT,
                gl::UNSIGNED_INT,
                ptr::null(),
            );
            gl.TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as GLint);
            gl.TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as GLint);
            check_gl(gl, "update depth texture")?;

            // Color texture.
            gl.ActiveTexture(gl::TEXTURE0 + 7);
            gl.GenTextures(1, &mut self.color_texture);
            gl.BindTexture(gl::TEXTURE_2D, self.color_texture);
            gl.TexImage2D(
                gl::TEXTURE_2D,
                0,
                self.pixel_type.internal_format() as GLint,
                self.size.width,
                self.size.height,
                0,
                self.pixel_type.format(),
                self.pixel_type.data_type(),
                ptr::null(),
            );
            gl.TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, gl::NEAREST as GLint);
            gl.TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, gl::NEAREST as GLint);
            check_gl(gl, "update color texture")?;

            gl.GenFramebuffers(1, &mut self.framebuffer);
            gl.BindFramebuffer(gl::FRAMEBUFFER, self.framebuffer);
            gl.FramebufferTexture2D(
                gl::FRAMEBUFFER,
                gl::DEPTH_ATTACHMENT,
                gl::TEXTURE_2D,
                self.depth_texture,
                0,
            );
            gl.FramebufferTexture2D(
                gl::FRAMEBUFFER,
                gl::COLOR_ATTACHMENT0,
                gl::TEXTURE_2D,
                self.color_texture,
                0,
            );

            check_framebuffer_status(gl)?;
            check_gl(gl, "update frame buffer")?;
        }
        Ok(())
    }

    /// Binds the framebuffer object for rendering.
    pub fn bind(&self) {
        unsafe {
            self.gl.BindFramebuffer(gl::FRAMEBUFFER, self.framebuffer);
        }
    }

    /// Rebinds the default framebuffer.
    pub fn unbind(&self) {
        unsafe {
            self.gl.BindFramebuffer(gl::FRAMEBUFFER, 0);
        }
    }

    #[inline]
    pub fn size(&self) -> Size2D<i32> {
        self.size
    }

    #[inline]
    pub fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    /// Returns the raw framebuffer object name.
    #[inline]
    pub fn raw(&self) -> GLuint {
        self.framebuffer
    }

    #[inline]
    pub fn depth_texture(&self) -> GLuint {
        self.depth_texture
    }

    #[inline]
    pub fn color_texture(&self) -> GLuint {
        self.color_texture
    }
}

impl Drop for FrameBuffer {
    fn drop(&mut self) {
        // Deletion cannot fail in the GL contract. Zero names are ignored by
        // the driver, which also covers a partially initialized target.
        unsafe {
            self.gl.DeleteFramebuffers(1, &self.framebuffer);
            self.gl.DeleteTextures(1, &self.depth_texture);
            self.gl.DeleteTextures(1, &self.color_texture);
        }
    }
}

impl fmt::Debug for FrameBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
            f,
            "FrameBuffer({:?}, {:?}, {})",
            self.size, self.pixel_type, self.framebuffer
        )
    }
}

pub(crate) fn check_gl(gl: &Gl, operation: &str) -> Result<(), Error> {
    let code = unsafe { gl.GetError() };
    if code == gl::NO_ERROR {
        return Ok(());
    }
    warn!("GL error in <{}>", operation);
    Err(Error::Gl(GlError::from_raw(code)))
}

fn check_framebuffer_status(gl: &Gl) -> Result<(), Error> {
    let status = unsafe { gl.CheckFramebufferStatus(gl::FRAMEBUFFER) };
    match status {
        gl::FRAMEBUFFER_COMPLETE => Ok(()),
        gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => Err(Error::FramebufferIncomplete(
            "GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT",
        )),
        gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => Err(Error::FramebufferIncomplete(
            "GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT",
        )),
        gl::FRAMEBUFFER_UNSUPPORTED => {
            Err(Error::FramebufferIncomplete("GL_FRAMEBUFFER_UNSUPPORTED"))
        }
        _ => Err(Error::FramebufferIncomplete("unknown framebuffer status")),
    }
}
