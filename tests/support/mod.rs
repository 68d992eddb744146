//! A stub GL driver for exercising the backend without a real context.
//!
//! Every entry point the proc table requires resolves to a typed stub, and
//! the interesting ones record their invocation into a global event log so
//! tests can assert on the exact call sequence the backend produced.

#![allow(dead_code)]

use std::os::raw::c_void;
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

use gl;
use gl::types::*;

use glint::prelude::*;

lazy_static::lazy_static! {
    static ref TEST_LOCK: Mutex<()> = Mutex::new(());
    static ref EVENTS: Mutex<Vec<String>> = Mutex::new(Vec::new());
}

static NEXT_ID: AtomicUsize = AtomicUsize::new(1);

/// Serializes stub-driver tests and resets the recorded state. Hold the
/// guard for the whole test.
pub struct StubGuard(MutexGuard<'static, ()>);

pub fn begin() -> StubGuard {
    let _ = env_logger::try_init();
    let guard = TEST_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    EVENTS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clear();
    NEXT_ID.store(1, Ordering::SeqCst);
    StubGuard(guard)
}

pub fn events() -> Vec<String> {
    EVENTS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

pub fn count(prefix: &str) -> usize {
    events().iter().filter(|v| v.starts_with(prefix)).count()
}

pub fn position(event: &str) -> Option<usize> {
    events().iter().position(|v| v == event)
}

fn record(event: String) {
    EVENTS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .push(event);
}

fn next_id() -> GLuint {
    NEXT_ID.fetch_add(1, Ordering::SeqCst) as GLuint
}

/// A reactor backed by the stub driver.
pub fn reactor() -> ReactorRef {
    ReactorRef::new(Reactor::new(ProcTable::new(resolve)))
}

unsafe extern "system" fn get_error() -> GLenum {
    gl::NO_ERROR
}

unsafe extern "system" fn gen_objects(n: GLsizei, out: *mut GLuint) {
    record("GenBuffers".to_string());
    for i in 0..n {
        *out.offset(i as isize) = next_id();
    }
}

unsafe extern "system" fn gen_textures(n: GLsizei, out: *mut GLuint) {
    record("GenTextures".to_string());
    for i in 0..n {
        *out.offset(i as isize) = next_id();
    }
}

unsafe extern "system" fn delete_buffers(n: GLsizei, ids: *const GLuint) {
    for i in 0..n {
        record(format!("DeleteBuffers({})", *ids.offset(i as isize)));
    }
}

unsafe extern "system" fn delete_textures(n: GLsizei, ids: *const GLuint) {
    for i in 0..n {
        record(format!("DeleteTextures({})", *ids.offset(i as isize)));
    }
}

unsafe extern "system" fn get_framebuffer_attachment_parameteriv(
    _target: GLenum,
    _attachment: GLenum,
    _pname: GLenum,
    _params: *mut GLint,
) {
}

unsafe extern "system" fn get_booleanv(_pname: GLenum, _data: *mut GLboolean) {}
unsafe extern "system" fn get_floatv(_pname: GLenum, _data: *mut GLfloat) {}
unsafe extern "system" fn get_integerv(_pname: GLenum, _data: *mut GLint) {}

unsafe extern "system" fn get_string(_name: GLenum) -> *const GLubyte {
    ptr::null()
}

unsafe extern "system" fn bind_buffer(target: GLenum, buffer: GLuint) {
    record(format!("BindBuffer({},{})", target, buffer));
}

unsafe extern "system" fn buffer_data(
    _target: GLenum,
    size: GLsizeiptr,
    _data: *const c_void,
    _usage: GLenum,
) {
    record(format!("BufferData({})", size));
}

unsafe extern "system" fn buffer_sub_data(
    _target: GLenum,
    offset: GLintptr,
    size: GLsizeiptr,
    _data: *const c_void,
) {
    record(format!("BufferSubData({},{})", offset, size));
}

unsafe extern "system" fn cull_face(mode: GLenum) {
    record(format!("CullFace({})", mode));
}

unsafe extern "system" fn enable(cap: GLenum) {
    record(format!("Enable({})", cap));
}

unsafe extern "system" fn disable(cap: GLenum) {
    record(format!("Disable({})", cap));
}

unsafe extern "system" fn front_face(mode: GLenum) {
    record(format!("FrontFace({})", mode));
}

unsafe extern "system" fn draw_elements(
    mode: GLenum,
    n: GLsizei,
    kind: GLenum,
    indices: *const c_void,
) {
    record(format!(
        "DrawElements({},{},{},{})",
        mode, n, kind, indices as usize
    ));
}

unsafe extern "system" fn viewport(x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
    record(format!("Viewport({},{},{},{})", x, y, width, height));
}

unsafe extern "system" fn depth_rangef(_near: GLfloat, _far: GLfloat) {}

unsafe extern "system" fn scissor(x: GLint, y: GLint, width: GLsizei, height: GLsizei) {
    record(format!("Scissor({},{},{},{})", x, y, width, height));
}

unsafe extern "system" fn stencil_func_separate(
    face: GLenum,
    func: GLenum,
    reference: GLint,
    mask: GLuint,
) {
    record(format!(
        "StencilFuncSeparate({},{},{},{})",
        face, func, reference, mask
    ));
}

unsafe extern "system" fn stencil_op_separate(
    face: GLenum,
    sfail: GLenum,
    dpfail: GLenum,
    dppass: GLenum,
) {
    record(format!(
        "StencilOpSeparate({},{},{},{})",
        face, sfail, dpfail, dppass
    ));
}

unsafe extern "system" fn stencil_mask_separate(face: GLenum, mask: GLuint) {
    record(format!("StencilMaskSeparate({},{})", face, mask));
}

unsafe extern "system" fn depth_func(func: GLenum) {
    record(format!("DepthFunc({})", func));
}

unsafe extern "system" fn depth_mask(flag: GLboolean) {
    record(format!("DepthMask({})", flag));
}

unsafe extern "system" fn blend_func_separate(
    src_rgb: GLenum,
    dst_rgb: GLenum,
    src_alpha: GLenum,
    dst_alpha: GLenum,
) {
    record(format!(
        "BlendFuncSeparate({},{},{},{})",
        src_rgb, dst_rgb, src_alpha, dst_alpha
    ));
}

unsafe extern "system" fn blend_equation_separate(mode_rgb: GLenum, mode_alpha: GLenum) {
    record(format!(
        "BlendEquationSeparate({},{})",
        mode_rgb, mode_alpha
    ));
}

unsafe extern "system" fn color_mask(
    red: GLboolean,
    green: GLboolean,
    blue: GLboolean,
    alpha: GLboolean,
) {
    record(format!("ColorMask({},{},{},{})", red, green, blue, alpha));
}

unsafe extern "system" fn create_program() -> GLuint {
    record("CreateProgram".to_string());
    next_id()
}

unsafe extern "system" fn delete_program(program: GLuint) {
    record(format!("DeleteProgram({})", program));
}

unsafe extern "system" fn create_shader(_kind: GLenum) -> GLuint {
    next_id()
}

unsafe extern "system" fn delete_shader(_shader: GLuint) {}

unsafe extern "system" fn shader_source(
    shader: GLuint,
    n: GLsizei,
    _strings: *const *const GLchar,
    lengths: *const GLint,
) {
    let first = if lengths.is_null() { -1 } else { *lengths };
    record(format!("ShaderSource({},{},{})", shader, n, first));
}

unsafe extern "system" fn compile_shader(_shader: GLuint) {}
unsafe extern "system" fn attach_shader(_program: GLuint, _shader: GLuint) {}
unsafe extern "system" fn detach_shader(_program: GLuint, _shader: GLuint) {}

unsafe extern "system" fn get_shader_info_log(
    _shader: GLuint,
    _buf_size: GLsizei,
    _length: *mut GLsizei,
    _info_log: *mut GLchar,
) {
}

unsafe extern "system" fn get_shaderiv(_shader: GLuint, _pname: GLenum, _params: *mut GLint) {}
unsafe extern "system" fn get_programiv(_program: GLuint, _pname: GLenum, _params: *mut GLint) {}

unsafe extern "system" fn get_program_info_log(
    _program: GLuint,
    _buf_size: GLsizei,
    _length: *mut GLsizei,
    _info_log: *mut GLchar,
) {
}

unsafe extern "system" fn bind_attrib_location(
    _program: GLuint,
    _index: GLuint,
    _name: *const GLchar,
) {
}

unsafe extern "system" fn link_program(_program: GLuint) {}

unsafe extern "system" fn enable_vertex_attrib_array(index: GLuint) {
    record(format!("EnableVertexAttribArray({})", index));
}

unsafe extern "system" fn disable_vertex_attrib_array(index: GLuint) {
    record(format!("DisableVertexAttribArray({})", index));
}

unsafe extern "system" fn vertex_attrib_pointer(
    index: GLuint,
    size: GLint,
    kind: GLenum,
    normalized: GLboolean,
    stride: GLsizei,
    pointer: *const c_void,
) {
    record(format!(
        "VertexAttribPointer({},{},{},{},{},{})",
        index, size, kind, normalized, stride, pointer as usize
    ));
}

unsafe extern "system" fn is_program(_program: GLuint) -> GLboolean {
    gl::TRUE
}

unsafe extern "system" fn is_framebuffer(_framebuffer: GLuint) -> GLboolean {
    gl::FALSE
}

macro_rules! stub_table {
    ($( $symbol:expr => $fun:ident : fn($($ty:ty),*) $(-> $ret:ty)? ; )*) => {
        /// Resolves a GL symbol to its stub, or null for unknown names.
        pub fn resolve(name: &str) -> *const c_void {
            match name {
                $(
                    $symbol => $fun as unsafe extern "system" fn($($ty),*) $(-> $ret)? as *const c_void,
                )*
                _ => ptr::null(),
            }
        }
    };
}

stub_table! {
    "glGetError" => get_error: fn() -> GLenum;
    "glGenTextures" => gen_textures: fn(GLsizei, *mut GLuint);
    "glDeleteTextures" => delete_textures: fn(GLsizei, *const GLuint);
    "glGetFramebufferAttachmentParameteriv" => get_framebuffer_attachment_parameteriv: fn(GLenum, GLenum, GLenum, *mut GLint);
    "glGetBooleanv" => get_booleanv: fn(GLenum, *mut GLboolean);
    "glGetFloatv" => get_floatv: fn(GLenum, *mut GLfloat);
    "glGetIntegerv" => get_integerv: fn(GLenum, *mut GLint);
    "glGetString" => get_string: fn(GLenum) -> *const GLubyte;
    "glGenBuffers" => gen_objects: fn(GLsizei, *mut GLuint);
    "glDeleteBuffers" => delete_buffers: fn(GLsizei, *const GLuint);
    "glBindBuffer" => bind_buffer: fn(GLenum, GLuint);
    "glBufferData" => buffer_data: fn(GLenum, GLsizeiptr, *const c_void, GLenum);
    "glBufferSubData" => buffer_sub_data: fn(GLenum, GLintptr, GLsizeiptr, *const c_void);
    "glCullFace" => cull_face: fn(GLenum);
    "glEnable" => enable: fn(GLenum);
    "glDisable" => disable: fn(GLenum);
    "glFrontFace" => front_face: fn(GLenum);
    "glDrawElements" => draw_elements: fn(GLenum, GLsizei, GLenum, *const c_void);
    "glViewport" => viewport: fn(GLint, GLint, GLsizei, GLsizei);
    "glDepthRangef" => depth_rangef: fn(GLfloat, GLfloat);
    "glScissor" => scissor: fn(GLint, GLint, GLsizei, GLsizei);
    "glStencilFuncSeparate" => stencil_func_separate: fn(GLenum, GLenum, GLint, GLuint);
    "glStencilOpSeparate" => stencil_op_separate: fn(GLenum, GLenum, GLenum, GLenum);
    "glStencilMaskSeparate" => stencil_mask_separate: fn(GLenum, GLuint);
    "glDepthFunc" => depth_func: fn(GLenum);
    "glDepthMask" => depth_mask: fn(GLboolean);
    "glBlendFuncSeparate" => blend_func_separate: fn(GLenum, GLenum, GLenum, GLenum);
    "glBlendEquationSeparate" => blend_equation_separate: fn(GLenum, GLenum);
    "glColorMask" => color_mask: fn(GLboolean, GLboolean, GLboolean, GLboolean);
    "glCreateProgram" => create_program: fn() -> GLuint;
    "glDeleteProgram" => delete_program: fn(GLuint);
    "glCreateShader" => create_shader: fn(GLenum) -> GLuint;
    "glDeleteShader" => delete_shader: fn(GLuint);
    "glShaderSource" => shader_source: fn(GLuint, GLsizei, *const *const GLchar, *const GLint);
    "glCompileShader" => compile_shader: fn(GLuint);
    "glAttachShader" => attach_shader: fn(GLuint, GLuint);
    "glDetachShader" => detach_shader: fn(GLuint, GLuint);
    "glGetShaderInfoLog" => get_shader_info_log: fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar);
    "glGetShaderiv" => get_shaderiv: fn(GLuint, GLenum, *mut GLint);
    "glGetProgramiv" => get_programiv: fn(GLuint, GLenum, *mut GLint);
    "glGetProgramInfoLog" => get_program_info_log: fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar);
    "glBindAttribLocation" => bind_attrib_location: fn(GLuint, GLuint, *const GLchar);
    "glLinkProgram" => link_program: fn(GLuint);
    "glEnableVertexAttribArray" => enable_vertex_attrib_array: fn(GLuint);
    "glDisableVertexAttribArray" => disable_vertex_attrib_array: fn(GLuint);
    "glVertexAttribPointer" => vertex_attrib_pointer: fn(GLuint, GLint, GLenum, GLboolean, GLsizei, *const c_void);
    "glIsProgram" => is_program: fn(GLuint) -> GLboolean;
    "glIsFramebuffer" => is_framebuffer: fn(GLuint) -> GLboolean;
}
