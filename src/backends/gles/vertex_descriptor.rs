//! Packed vertex attribute layouts computed from vertex stage inputs.

use std::os::raw::c_void;

use gl;
use gl::types::*;
use smallvec::SmallVec;

use crate::pipeline::{StageInput, MAX_VERTEX_ATTRIBUTES};

use super::proc_table::ProcTable;
use super::types;

/// The arguments to `glVertexAttribPointer` for one attribute.
#[derive(Debug, Clone, Copy)]
struct VertexAttribPointer {
    index: GLuint,
    size: GLint,
    kind: GLenum,
    normalized: GLboolean,
    stride: GLsizei,
    offset: usize,
}

/// A packed vertex attribute layout: attributes laid out back to back in
/// slot declaration order, all sharing the total stride.
#[derive(Debug, Default)]
pub struct GlesVertexDescriptor {
    arrays: SmallVec<[VertexAttribPointer; MAX_VERTEX_ATTRIBUTES]>,
}

impl GlesVertexDescriptor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Computes the packed layout from the vertex stage input slots. Each
    /// slot's byte offset is the accumulated width of all preceding slots;
    /// once the total is known every attribute advertises it as stride.
    ///
    /// Fails without mutating state when a slot's component count is outside
    /// `[1, 4]`, when its component type has no attribute equivalent, or on
    /// any repeat registration.
    pub fn register_vertex_stage_input(&mut self, _gl: &ProcTable, inputs: &[StageInput]) -> bool {
        if !self.arrays.is_empty() {
            return false;
        }

        let mut arrays: SmallVec<[VertexAttribPointer; MAX_VERTEX_ATTRIBUTES]> = SmallVec::new();
        let mut stride = 0;

        for input in inputs {
            if input.vec_size < 1 || input.vec_size > 4 {
                return false;
            }

            let kind = match types::vertex_attrib_type(input.kind) {
                Some(kind) => kind,
                None => return false,
            };

            arrays.push(VertexAttribPointer {
                index: input.location as GLuint,
                size: input.vec_size as GLint,
                kind,
                normalized: gl::FALSE,
                stride: 0,
                offset: stride,
            });

            stride += ((input.bit_width * input.vec_size) / 8) as usize;
        }

        for array in arrays.iter_mut() {
            array.stride = stride as GLsizei;
        }

        self.arrays = arrays;
        true
    }

    /// Validates that `program` is a program object the driver recognizes.
    pub fn read_uniforms_bindings(&self, gl: &ProcTable, program: GLuint) -> bool {
        unsafe { gl.is_program(program) == gl::TRUE }
    }

    /// Enables every registered attribute array and points it into the
    /// currently bound vertex buffer. Must be paired with [`unbind`]
    /// bracketing the draw call.
    ///
    /// [`unbind`]: #method.unbind
    pub fn bind(&self, gl: &ProcTable) -> bool {
        for array in &self.arrays {
            unsafe {
                gl.enable_vertex_attrib_array(array.index);
                gl.vertex_attrib_pointer(
                    array.index,
                    array.size,
                    array.kind,
                    array.normalized,
                    array.stride,
                    array.offset as *const c_void,
                );
            }
        }

        true
    }

    /// Disables every registered attribute array.
    pub fn unbind(&self, gl: &ProcTable) -> bool {
        for array in &self.arrays {
            unsafe {
                gl.disable_vertex_attrib_array(array.index);
            }
        }

        true
    }
}
