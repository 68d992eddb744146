//! Runtime-resolved table of OpenGLES entry points.
//!
//! The table is all-or-nothing: either every required entry point resolves
//! and the table is valid, or the table is unusable. In checked builds every
//! call through the table is followed by a driver error poll, and a pending
//! error is a fatal assertion naming the offending call.

use std::ffi::CStr;
use std::fmt;
use std::mem;
use std::os::raw::{c_char, c_void};

use gl;
use gl::types::*;

type GetErrorFn = unsafe extern "system" fn() -> GLenum;

/// Returns the symbolic name of a driver error code.
pub fn error_to_string(value: GLenum) -> &'static str {
    match value {
        gl::NO_ERROR => "GL_NO_ERROR",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        gl::INVALID_VALUE => "GL_INVALID_VALUE",
        gl::INVALID_OPERATION => "GL_INVALID_OPERATION",
        gl::INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        gl::OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        _ => "Unknown",
    }
}

/// Vendor and version strings of the underlying driver. Only built for fully
/// resolved tables.
#[derive(Debug, Clone, Default)]
pub struct Description {
    vendor: String,
    renderer: String,
    version: String,
    shading_language_version: String,
}

impl Description {
    fn new(gl: &ProcTable) -> Self {
        unsafe {
            Description {
                vendor: read_string(gl, gl::VENDOR),
                renderer: read_string(gl, gl::RENDERER),
                version: read_string(gl, gl::VERSION),
                shading_language_version: read_string(gl, gl::SHADING_LANGUAGE_VERSION),
            }
        }
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn renderer(&self) -> &str {
        &self.renderer
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn shading_language_version(&self) -> &str {
        &self.shading_language_version
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} ({}, GLSL {})",
            self.vendor, self.renderer, self.version, self.shading_language_version
        )
    }
}

unsafe fn read_string(gl: &ProcTable, name: GLenum) -> String {
    let ptr = gl.get_string(name);
    if ptr.is_null() {
        return String::new();
    }

    CStr::from_ptr(ptr as *const c_char)
        .to_string_lossy()
        .into_owned()
}

macro_rules! gles_procs {
    ($( fn $method:ident => $symbol:ident ( $( $arg:ident : $ty:ty ),* ) $( -> $ret:ty )? ; )*) => {
        /// Runtime-resolved table of native GL entry points with attached
        /// error checking.
        pub struct ProcTable {
            is_valid: bool,
            error_fn: Option<GetErrorFn>,
            description: Option<Description>,
            $( $method: Option<unsafe extern "system" fn($($ty),*) $(-> $ret)?>, )*
        }

        impl ProcTable {
            /// Resolves every required entry point through `resolver`. The
            /// first failure, `glGetError` included, stops resolution and
            /// leaves the whole table invalid.
            pub fn new<R>(resolver: R) -> Self
            where
                R: Fn(&str) -> *const c_void,
            {
                let mut table = ProcTable {
                    is_valid: false,
                    error_fn: None,
                    description: None,
                    $( $method: None, )*
                };

                let error_fn = resolver("glGetError");
                if error_fn.is_null() {
                    warn!("Could not resolve glGetError.");
                    return table;
                }

                table.error_fn = Some(unsafe { mem::transmute(error_fn) });

                $(
                    {
                        let symbol = concat!("gl", stringify!($symbol));
                        let ptr = resolver(symbol);
                        if ptr.is_null() {
                            warn!("Could not resolve {}.", symbol);
                            return table;
                        }

                        table.$method = Some(unsafe { mem::transmute(ptr) });
                    }
                )*

                table.is_valid = true;
                let description = Description::new(&table);
                info!("ProcTable resolved on {}.", description);
                table.description = Some(description);
                table
            }

            $(
                #[inline]
                pub unsafe fn $method(&self, $($arg: $ty),*) $(-> $ret)? {
                    let function = match self.$method {
                        Some(function) => function,
                        None => panic!(
                            "{} is unavailable.",
                            concat!("gl", stringify!($symbol))
                        ),
                    };

                    let result = function($($arg),*);
                    self.check(concat!("gl", stringify!($symbol)));
                    result
                }
            )*
        }
    };
}

gles_procs! {
    fn gen_textures => GenTextures(n: GLsizei, textures: *mut GLuint);
    fn delete_textures => DeleteTextures(n: GLsizei, textures: *const GLuint);
    fn get_framebuffer_attachment_parameteriv =>
        GetFramebufferAttachmentParameteriv(target: GLenum, attachment: GLenum, pname: GLenum, params: *mut GLint);
    fn get_booleanv => GetBooleanv(pname: GLenum, data: *mut GLboolean);
    fn get_floatv => GetFloatv(pname: GLenum, data: *mut GLfloat);
    fn get_integerv => GetIntegerv(pname: GLenum, data: *mut GLint);
    fn get_string => GetString(name: GLenum) -> *const GLubyte;
    fn gen_buffers => GenBuffers(n: GLsizei, buffers: *mut GLuint);
    fn delete_buffers => DeleteBuffers(n: GLsizei, buffers: *const GLuint);
    fn bind_buffer => BindBuffer(target: GLenum, buffer: GLuint);
    fn buffer_data => BufferData(target: GLenum, size: GLsizeiptr, data: *const c_void, usage: GLenum);
    fn buffer_sub_data => BufferSubData(target: GLenum, offset: GLintptr, size: GLsizeiptr, data: *const c_void);
    fn cull_face => CullFace(mode: GLenum);
    fn enable => Enable(cap: GLenum);
    fn disable => Disable(cap: GLenum);
    fn front_face => FrontFace(mode: GLenum);
    fn draw_elements => DrawElements(mode: GLenum, count: GLsizei, kind: GLenum, indices: *const c_void);
    fn viewport => Viewport(x: GLint, y: GLint, width: GLsizei, height: GLsizei);
    fn depth_rangef => DepthRangef(near: GLfloat, far: GLfloat);
    fn scissor => Scissor(x: GLint, y: GLint, width: GLsizei, height: GLsizei);
    fn stencil_func_separate => StencilFuncSeparate(face: GLenum, func: GLenum, reference: GLint, mask: GLuint);
    fn stencil_op_separate => StencilOpSeparate(face: GLenum, sfail: GLenum, dpfail: GLenum, dppass: GLenum);
    fn stencil_mask_separate => StencilMaskSeparate(face: GLenum, mask: GLuint);
    fn depth_func => DepthFunc(func: GLenum);
    fn depth_mask => DepthMask(flag: GLboolean);
    fn blend_func_separate =>
        BlendFuncSeparate(src_rgb: GLenum, dst_rgb: GLenum, src_alpha: GLenum, dst_alpha: GLenum);
    fn blend_equation_separate => BlendEquationSeparate(mode_rgb: GLenum, mode_alpha: GLenum);
    fn color_mask => ColorMask(red: GLboolean, green: GLboolean, blue: GLboolean, alpha: GLboolean);
    fn create_program => CreateProgram() -> GLuint;
    fn delete_program => DeleteProgram(program: GLuint);
    fn create_shader => CreateShader(kind: GLenum) -> GLuint;
    fn delete_shader => DeleteShader(shader: GLuint);
    fn shader_source => ShaderSource(shader: GLuint, count: GLsizei, string: *const *const GLchar, length: *const GLint);
    fn compile_shader => CompileShader(shader: GLuint);
    fn attach_shader => AttachShader(program: GLuint, shader: GLuint);
    fn detach_shader => DetachShader(program: GLuint, shader: GLuint);
    fn get_shader_info_log => GetShaderInfoLog(shader: GLuint, buf_size: GLsizei, length: *mut GLsizei, info_log: *mut GLchar);
    fn get_shaderiv => GetShaderiv(shader: GLuint, pname: GLenum, params: *mut GLint);
    fn get_programiv => GetProgramiv(program: GLuint, pname: GLenum, params: *mut GLint);
    fn get_program_info_log => GetProgramInfoLog(program: GLuint, buf_size: GLsizei, length: *mut GLsizei, info_log: *mut GLchar);
    fn bind_attrib_location => BindAttribLocation(program: GLuint, index: GLuint, name: *const GLchar);
    fn link_program => LinkProgram(program: GLuint);
    fn enable_vertex_attrib_array => EnableVertexAttribArray(index: GLuint);
    fn disable_vertex_attrib_array => DisableVertexAttribArray(index: GLuint);
    fn vertex_attrib_pointer =>
        VertexAttribPointer(index: GLuint, size: GLint, kind: GLenum, normalized: GLboolean, stride: GLsizei, pointer: *const c_void);
    fn is_program => IsProgram(program: GLuint) -> GLboolean;
    fn is_framebuffer => IsFramebuffer(framebuffer: GLuint) -> GLboolean;
}

impl ProcTable {
    /// Returns true if every required entry point resolved. An invalid table
    /// must be treated as entirely unusable.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// The driver description, present only on valid tables.
    pub fn description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Sets a shader's source from one raw byte mapping, as a single source
    /// fragment of that exact length.
    pub unsafe fn shader_source_mapping(&self, shader: GLuint, mapping: &[u8]) {
        let sources = [mapping.as_ptr() as *const GLchar];
        let lengths = [mapping.len() as GLint];
        self.shader_source(shader, 1, sources.as_ptr(), lengths.as_ptr());
    }

    fn check(&self, name: &'static str) {
        if cfg!(debug_assertions) {
            if let Some(get_error) = self.error_fn {
                let error = unsafe { get_error() };
                assert!(
                    error == gl::NO_ERROR,
                    "GL error {} ({}) encountered on call to {}.",
                    error_to_string(error),
                    error,
                    name
                );
            }
        }
    }
}
