//! Compiled program handles paired with their vertex input layout.

use std::sync::RwLock;

use gl::types::*;

use crate::pipeline::PipelineDescriptor;

use super::handle::{GlesHandle, HandleType};
use super::proc_table::ProcTable;
use super::reactor::ReactorRef;
use super::vertex_descriptor::GlesVertexDescriptor;

/// A compiled program plus its vertex input layout.
///
/// The program handle is allocated at construction time; the layout is built
/// at most once, on the context thread, once the program object exists.
pub struct GlesPipeline {
    descriptor: PipelineDescriptor,
    reactor: Option<ReactorRef>,
    handle: GlesHandle,
    vertex_descriptor: RwLock<Option<GlesVertexDescriptor>>,
    is_valid: bool,
}

impl GlesPipeline {
    pub fn new(reactor: Option<ReactorRef>, descriptor: PipelineDescriptor) -> Self {
        let handle = match reactor {
            Some(ref reactor) => reactor.create_handle(HandleType::Program),
            None => GlesHandle::dead(),
        };

        let is_valid = !handle.is_dead();
        GlesPipeline {
            descriptor,
            reactor,
            handle,
            vertex_descriptor: RwLock::new(None),
            is_valid,
        }
    }

    /// Fixed at construction time from whether the program handle is live.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    #[inline]
    pub fn descriptor(&self) -> &PipelineDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn program_handle(&self) -> GlesHandle {
        self.handle
    }

    /// Debug labels have no GLES equivalent used here.
    pub fn set_label(&self, _label: &str) -> bool {
        true
    }

    /// Builds the vertex input layout exactly once; any subsequent call
    /// fails and leaves the existing layout unchanged. A failing sub-step
    /// aborts the build without retaining a partial layout.
    pub fn build_vertex_descriptor(&self, gl: &ProcTable, program: GLuint) -> bool {
        let mut slot = self.vertex_descriptor.write().unwrap();
        if slot.is_some() {
            return false;
        }

        let mut vertex_descriptor = GlesVertexDescriptor::new();
        if !vertex_descriptor.register_vertex_stage_input(gl, &self.descriptor.inputs) {
            return false;
        }

        if !vertex_descriptor.read_uniforms_bindings(gl, program) {
            return false;
        }

        *slot = Some(vertex_descriptor);
        true
    }

    /// Runs `f` against the built layout, or returns `None` when the layout
    /// has not been built yet.
    pub fn with_vertex_descriptor<T, F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&GlesVertexDescriptor) -> T,
    {
        self.vertex_descriptor.read().unwrap().as_ref().map(f)
    }
}

impl Drop for GlesPipeline {
    fn drop(&mut self) {
        if !self.handle.is_dead() {
            if let Some(ref reactor) = self.reactor {
                reactor.collect_handle(self.handle);
            }
        }
    }
}
