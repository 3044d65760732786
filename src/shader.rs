// eglman/src/shader.rs
//
//! Compiled shader objects and linked programs.

use crate::error::Error;
use crate::gl;
use crate::gl::types::{GLchar, GLenum, GLint, GLsizei, GLuint};
use crate::gl::Gl;

use log::error;
use std::ffi::CString;
use std::fmt;
use std::rc::Rc;

/// The shader stages a [`Program`] links together.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl ShaderKind {
    fn gl_type(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

struct ShaderObject {
    gl: Rc<Gl>,
    raw: GLuint,
}

impl Drop for ShaderObject {
    fn drop(&mut self) {
        // The driver defers reclamation while the shader is still attached.
        unsafe {
            self.gl.DeleteShader(self.raw);
        }
    }
}

/// A compiled shader object.
///
/// Clones share one driver object; the deletion request is issued when the
/// last clone drops.
#[derive(Clone)]
pub struct Shader {
    object: Rc<ShaderObject>,
    kind: ShaderKind,
}

impl Shader {
    /// Compiles shader source of the given stage.
    ///
    /// On compile failure the error carries the driver's info log, when the
    /// driver produced one.
    pub fn compile(gl: &Rc<Gl>, kind: ShaderKind, source: &[u8]) -> Result<Shader, Error> {
        unsafe {
            let raw = gl.CreateShader(kind.gl_type());
            if raw == 0 {
                error!("GL: cannot create shader");
                return Err(Error::ShaderCreationFailed);
            }
            let object = ShaderObject {
                gl: gl.clone(),
                raw,
            };

            let data = source.as_ptr() as *const GLchar;
            let length = source.len() as GLint;
            gl.ShaderSource(raw, 1, &data, &length);
            gl.CompileShader(raw);

            let mut compiled = 0;
            gl.GetShaderiv(raw, gl::COMPILE_STATUS, &mut compiled);
            if compiled == 0 {
                let log = shader_info_log(gl, raw);
                if log.is_empty() {
                    error!("GL: cannot compile shader");
                } else {
                    error!("GL: cannot compile shader: {}", log);
                }
                return Err(Error::ShaderCompilationFailed(log));
            }

            Ok(Shader {
                object: Rc::new(object),
                kind,
            })
        }
    }

    /// Compiles vertex shader source.
    pub fn vertex(gl: &Rc<Gl>, source: &[u8]) -> Result<Shader, Error> {
        Shader::compile(gl, ShaderKind::Vertex, source)
    }

    /// Compiles fragment shader source.
    pub fn fragment(gl: &Rc<Gl>, source: &[u8]) -> Result<Shader, Error> {
        Shader::compile(gl, ShaderKind::Fragment, source)
    }

    #[inline]
    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    /// Returns the raw shader object name.
    #[inline]
    pub fn raw(&self) -> GLuint {
        self.object.raw
    }
}

impl fmt::Debug for Shader {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "Shader({:?}, {})", self.kind, self.object.raw)
    }
}

/// Vertex attribute locations to bind before linking a [`Program`].
///
/// Binding a name the shaders never declare is legal; the driver ignores it
/// at link time.
#[derive(Clone, Debug, Default)]
pub struct AttributeBindings {
    bindings: Vec<(GLuint, String)>,
}

impl AttributeBindings {
    pub fn new() -> AttributeBindings {
        AttributeBindings::default()
    }

    /// Adds one (location, name) binding.
    pub fn bind(mut self, index: GLuint, name: &str) -> AttributeBindings {
        self.bindings.push((index, name.to_owned()));
        self
    }
}

struct ProgramObject {
    gl: Rc<Gl>,
    raw: GLuint,
}

impl Drop for ProgramObject {
    fn drop(&mut self) {
        unsafe {
            self.gl.DeleteProgram(self.raw);
        }
    }
}

/// A linked program object.
///
/// The program keeps the two shaders it was linked from alive for its own
/// lifetime. Clones share one driver object, deleted when the last clone
/// drops.
#[derive(Clone)]
pub struct Program {
    object: Rc<ProgramObject>,
    vertex_shader: Shader,
    fragment_shader: Shader,
}

impl Program {
    /// Creates a program object, attaches both shaders, applies the
    /// attribute bindings, links, and checks the link status.
    pub fn link(
        gl: &Rc<Gl>,
        vertex_shader: Shader,
        fragment_shader: Shader,
        attributes: &AttributeBindings,
    ) -> Result<Program, Error> {
        unsafe {
            let raw = gl.CreateProgram();
            if raw == 0 {
                error!("GL: cannot create program");
                return Err(Error::ProgramCreationFailed);
            }
            let object = ProgramObject {
                gl: gl.clone(),
                raw,
            };

            gl.AttachShader(raw, vertex_shader.raw());
            gl.AttachShader(raw, fragment_shader.raw());

            for (index, name) in &attributes.bindings {
                let name = CString::new(name.as_str()).unwrap();
                gl.BindAttribLocation(raw, *index, name.as_ptr());
            }

            gl.LinkProgram(raw);

            let mut linked = 0;
            gl.GetProgramiv(raw, gl::LINK_STATUS, &mut linked);
            if linked == 0 {
                let log = program_info_log(gl, raw);
                if log.is_empty() {
                    error!("GL: cannot link program");
                } else {
                    error!("GL: cannot link program: {}", log);
                }
                return Err(Error::ProgramLinkFailed(log));
            }

            Ok(Program {
                object: Rc::new(object),
                vertex_shader,
                fragment_shader,
            })
        }
    }

    /// Makes this program the active one. This is global GPU state, not
    /// owned by the wrapper.
    pub fn bind(&self) {
        unsafe {
            self.object.gl.UseProgram(self.object.raw);
        }
    }

    /// Deactivates whatever program is currently active.
    pub fn unbind(&self) {
        unsafe {
            self.object.gl.UseProgram(0);
        }
    }

    /// Queries a uniform location by name. Uncached; a driver call each
    /// time.
    pub fn uniform(&self, name: &str) -> GLint {
        let name = CString::new(name).unwrap();
        unsafe {
            self.object
                .gl
                .GetUniformLocation(self.object.raw, name.as_ptr())
        }
    }

    /// Queries a vertex attribute location by name. Uncached.
    pub fn attribute(&self, name: &str) -> GLint {
        let name = CString::new(name).unwrap();
        unsafe {
            self.object
                .gl
                .GetAttribLocation(self.object.raw, name.as_ptr())
        }
    }

    #[inline]
    pub fn vertex_shader(&self) -> &Shader {
        &self.vertex_shader
    }

    #[inline]
    pub fn fragment_shader(&self) -> &Shader {
        &self.fragment_shader
    }

    /// Returns the raw program object name.
    #[inline]
    pub fn raw(&self) -> GLuint {
        self.object.raw
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "Program({})", self.object.raw)
    }
}

fn shader_info_log(gl: &Gl, shader: GLuint) -> String {
    unsafe {
        let mut log_length = 0;
        gl.GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut log_length);
        if log_length <= 1 {
            return String::new();
        }
        let mut log = vec![0u8; log_length as usize];
        let mut written: GLsizei = 0;
        gl.GetShaderInfoLog(shader, log_length, &mut written, log.as_mut_ptr() as *mut GLchar);
        log.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&log).into_owned()
    }
}

fn program_info_log(gl: &Gl, program: GLuint) -> String {
    unsafe {
        let mut log_length = 0;
        gl.GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut log_length);
        if log_length <= 1 {
            return String::new();
        }
        let mut log = vec![0u8; log_length as usize];
        let mut written: GLsizei = 0;
        gl.GetProgramInfoLog(program, log_length, &mut written, log.as_mut_ptr() as *mut GLchar);
        log.truncate(written.max(0) as usize);
        String::from_utf8_lossy(&log).into_owned()
    }
}
