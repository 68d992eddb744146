//! Encodes ordered batches of draw commands into GL calls.

use std::os::raw::c_void;

use gl;
use gl::types::*;

use crate::command::{Command, CullFace, FrontFaceOrder, RenderTarget};
use crate::errors::{Error, Result};
use crate::pipeline::{
    ColorAttachmentDescriptor, ColorWriteMask, PipelineDescriptor, StencilAttachmentDescriptor,
};

use super::proc_table::ProcTable;
use super::reactor::{Reactor, ReactorRef};
use super::types;

/// An ordered batch of commands targeting one render target, encoded
/// together as a single deferred reactor operation.
///
/// The pass is write-only until encoded; commands are translated in the
/// order they were appended.
pub struct GlesRenderPass {
    target: RenderTarget,
    commands: Vec<Command>,
    reactor: Option<ReactorRef>,
    is_valid: bool,
}

impl GlesRenderPass {
    pub fn new(reactor: Option<ReactorRef>, target: RenderTarget) -> Self {
        let is_valid = reactor.as_ref().map_or(false, |reactor| reactor.is_valid());
        GlesRenderPass {
            target,
            commands: Vec::new(),
            reactor,
            is_valid,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[inline]
    pub fn target(&self) -> &RenderTarget {
        &self.target
    }

    /// Debug labels have no GLES equivalent used here.
    pub fn set_label(&self, _label: &str) -> bool {
        true
    }

    /// Appends a command to the batch.
    pub fn add_command(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Submits the whole batch as one deferred reactor operation holding a
    /// copy of the command list. Returns whether the operation was accepted;
    /// the outcome of the GL work itself is logged when the reactor drains.
    ///
    /// Succeeds trivially, without submitting an operation, when the batch
    /// is empty.
    pub fn encode_commands(&self) -> bool {
        if !self.is_valid {
            return false;
        }

        if self.commands.is_empty() {
            return true;
        }

        let commands = self.commands.clone();
        match self.reactor {
            Some(ref reactor) => {
                reactor.add_operation(move |reactor| encode_commands_in_reactor(reactor, &commands))
            }
            None => false,
        }
    }
}

fn configure_blending(gl: &ProcTable, color: &ColorAttachmentDescriptor) {
    if !color.blending_enabled {
        unsafe {
            gl.disable(gl::BLEND);
        }
        return;
    }

    let is_set = |check: ColorWriteMask| -> GLboolean {
        if color.write_mask.contains(check) {
            gl::TRUE
        } else {
            gl::FALSE
        }
    };

    unsafe {
        gl.enable(gl::BLEND);
        gl.blend_func_separate(
            color.src_color_blend_factor.into(), // src color
            color.dst_color_blend_factor.into(), // dst color
            color.src_alpha_blend_factor.into(), // src alpha
            color.dst_alpha_blend_factor.into(), // dst alpha
        );
        gl.blend_equation_separate(
            color.color_blend_op.into(), // mode color
            color.alpha_blend_op.into(), // mode alpha
        );
        gl.color_mask(
            is_set(ColorWriteMask::RED),
            is_set(ColorWriteMask::GREEN),
            is_set(ColorWriteMask::BLUE),
            is_set(ColorWriteMask::ALPHA),
        );
    }
}

fn configure_stencil_face(
    gl: &ProcTable,
    face: GLenum,
    stencil: &StencilAttachmentDescriptor,
    reference: u32,
) {
    unsafe {
        gl.stencil_op_separate(
            face,
            stencil.stencil_failure.into(),     // stencil fail
            stencil.depth_failure.into(),       // depth fail
            stencil.depth_stencil_pass.into(),  // depth stencil pass
        );
        gl.stencil_func_separate(face, stencil.compare.into(), reference as GLint, stencil.read_mask);
        gl.stencil_mask_separate(face, stencil.write_mask);
    }
}

fn configure_stencil(gl: &ProcTable, pipeline: &PipelineDescriptor, reference: u32) {
    if !pipeline.has_stencil_attachments() {
        unsafe {
            gl.disable(gl::STENCIL_TEST);
        }
        return;
    }

    unsafe {
        gl.enable(gl::STENCIL_TEST);
    }

    match (&pipeline.front_stencil, &pipeline.back_stencil) {
        (Some(front), Some(back)) if front == back => {
            configure_stencil_face(gl, gl::FRONT_AND_BACK, front, reference)
        }
        (Some(front), _) => configure_stencil_face(gl, gl::FRONT, front, reference),
        (None, Some(back)) => configure_stencil_face(gl, gl::BACK, back, reference),
        (None, None) => unreachable!("stencil test enabled without a front or back descriptor"),
    }
}

fn encode_commands_in_reactor(reactor: &Reactor, commands: &[Command]) -> Result<()> {
    let gl = reactor.proc_table();

    for command in commands {
        if command.instance_count != 1 {
            return Err(Error::InstancingUnsupported);
        }

        let pipeline = match command.pipeline {
            Some(ref pipeline) => pipeline.as_gles(),
            None => return Err(Error::PipelineMissing),
        };

        let descriptor = pipeline.descriptor();
        let color = match descriptor.sole_color_attachment() {
            Some(color) => color,
            None => return Err(Error::ColorAttachmentsTooComplex),
        };

        configure_blending(gl, color);

        configure_stencil(gl, descriptor, command.stencil_reference);

        if let Some(ref depth) = descriptor.depth {
            unsafe {
                gl.enable(gl::DEPTH_TEST);
                gl.depth_func(depth.compare.into());
                gl.depth_mask(if depth.write_enabled { gl::TRUE } else { gl::FALSE });
            }
        } else {
            unsafe {
                gl.disable(gl::DEPTH_TEST);
            }
        }

        // Without a viewport the current state is kept; no per-render-target
        // default is reestablished.
        if let Some(ref viewport) = command.viewport {
            let rect = &viewport.rect;
            unsafe {
                gl.viewport(
                    rect.origin.x,
                    rect.origin.y,
                    rect.size.x as GLsizei,
                    rect.size.y as GLsizei,
                );
            }
        }

        if let Some(ref scissor) = command.scissor {
            unsafe {
                gl.enable(gl::SCISSOR_TEST);
                gl.scissor(
                    scissor.origin.x,
                    scissor.origin.y,
                    scissor.size.x as GLsizei,
                    scissor.size.y as GLsizei,
                );
            }
        } else {
            unsafe {
                gl.disable(gl::SCISSOR_TEST);
            }
        }

        match command.cull_face {
            CullFace::Nothing => unsafe {
                gl.disable(gl::CULL_FACE);
            },
            CullFace::Front => unsafe {
                gl.enable(gl::CULL_FACE);
                gl.cull_face(gl::FRONT);
            },
            CullFace::Back => unsafe {
                gl.enable(gl::CULL_FACE);
                gl.cull_face(gl::BACK);
            },
        }

        match command.winding {
            FrontFaceOrder::Clockwise => unsafe {
                gl.front_face(gl::CW);
            },
            FrontFaceOrder::CounterClockwise => unsafe {
                gl.front_face(gl::CCW);
            },
        }

        let index_type = match types::index_type(command.index_type) {
            Some(index_type) => index_type,
            None => return Err(Error::IndexTypeUnknown),
        };

        let vertex_buffer = match command.vertex_buffer {
            Some(ref view) => view,
            None => return Err(Error::BufferViewMissing),
        };

        let index_buffer = match command.index_buffer {
            Some(ref view) => view,
            None => return Err(Error::BufferViewMissing),
        };

        let vbo = reactor.resolve(vertex_buffer.buffer.as_gles().handle())?;
        let ibo = reactor.resolve(index_buffer.buffer.as_gles().handle())?;
        unsafe {
            gl.bind_buffer(gl::ARRAY_BUFFER, vbo);
            gl.bind_buffer(gl::ELEMENT_ARRAY_BUFFER, ibo);
        }

        if pipeline.with_vertex_descriptor(|layout| layout.bind(gl)) != Some(true) {
            return Err(Error::VertexLayoutFailure);
        }

        // Indices are device-resident; the view's offset locates them inside
        // the bound index buffer.
        unsafe {
            gl.draw_elements(
                command.primitive.into(),
                command.index_count as GLsizei,
                index_type,
                index_buffer.range.offset as *const c_void,
            );
        }

        if pipeline.with_vertex_descriptor(|layout| layout.unbind(gl)) != Some(true) {
            return Err(Error::VertexLayoutFailure);
        }
    }

    Ok(())
}
