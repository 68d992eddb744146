//! The serialized, context-thread-bound executor of deferred GPU operations.

use std::collections::HashMap;
use std::mem;
use std::sync::{Arc, Mutex};

use gl::types::*;

use crate::errors::{Error, Result};
use crate::utils::{Handle, HandlePool};

use super::handle::{GlesHandle, HandleType};
use super::proc_table::ProcTable;

/// Shared reference to a reactor. Resources hold one of these; the reactor
/// outlives every resource that references it.
pub type ReactorRef = Arc<Reactor>;

/// A unit of work executed on the context thread. Operations must be
/// self-contained: one operation never blocks on another.
pub type Operation = Box<dyn FnOnce(&Reactor) -> Result<()> + Send>;

/// The reactor owns the queue of pending operations and the mapping from
/// handles to real driver objects, and is the only component that touches
/// the driver.
///
/// Handles are created on any thread, immediately and without driver work;
/// the driver object behind a handle is materialized the first time an
/// operation resolves it on the context thread. Operations run strictly in
/// submission order, each to completion before the next.
pub struct Reactor {
    proc_table: ProcTable,
    handles: Mutex<HandlePool>,
    objects: Mutex<HashMap<Handle, GLuint>>,
    ops: Mutex<Vec<Operation>>,
}

impl Reactor {
    /// Wraps a resolved proc table. A reactor built from an invalid table is
    /// itself invalid: it hands out dead handles and accepts no operations.
    pub fn new(proc_table: ProcTable) -> Self {
        Reactor {
            proc_table,
            handles: Mutex::new(HandlePool::new()),
            objects: Mutex::new(HashMap::new()),
            ops: Mutex::new(Vec::new()),
        }
    }

    /// Returns true if the context/table binding succeeded.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.proc_table.is_valid()
    }

    #[inline]
    pub fn proc_table(&self) -> &ProcTable {
        &self.proc_table
    }

    /// Allocates a live handle immediately, on any thread. The driver object
    /// is materialized lazily on the context thread. Returns the dead
    /// sentinel if the reactor is invalid.
    pub fn create_handle(&self, kind: HandleType) -> GlesHandle {
        if !self.is_valid() {
            return GlesHandle::dead();
        }

        let handle = self.handles.lock().unwrap().create();
        GlesHandle::new(kind, handle)
    }

    /// Marks the handle for deferred deletion. The driver object is deleted
    /// as a reactor operation, never inline, so the deletion is sequenced
    /// after any pending use of the same object.
    pub fn collect_handle(&self, handle: GlesHandle) -> bool {
        if handle.is_dead() {
            return false;
        }

        self.add_operation(move |reactor| reactor.destroy(handle))
    }

    /// Enqueues a unit of work for the context thread, from any thread.
    /// Returns whether the operation was accepted; the outcome of its GL
    /// work is logged when the queue drains, never reported back here.
    pub fn add_operation<F>(&self, op: F) -> bool
    where
        F: FnOnce(&Reactor) -> Result<()> + Send + 'static,
    {
        if !self.is_valid() {
            return false;
        }

        self.ops.lock().unwrap().push(Box::new(op));
        true
    }

    /// Drains and runs pending operations in submission order, including
    /// operations enqueued by the operations themselves. Must be called on
    /// the thread that owns the GL context.
    ///
    /// Every operation runs to completion regardless of earlier failures;
    /// failures are logged and the first one is reported once the queue is
    /// empty.
    pub fn react(&self) -> Result<()> {
        let mut first_failure = None;

        loop {
            let pending = {
                let mut ops = self.ops.lock().unwrap();
                if ops.is_empty() {
                    break;
                }

                mem::replace(&mut *ops, Vec::new())
            };

            for op in pending {
                if let Err(err) = op(self) {
                    warn!("Reactor operation failed: {}", err);
                    if first_failure.is_none() {
                        first_failure = Some(err);
                    }
                }
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Returns the driver object for a live handle, materializing it on
    /// first use. Must be called on the context thread, from within an
    /// operation.
    pub fn resolve(&self, handle: GlesHandle) -> Result<GLuint> {
        if handle.is_dead() {
            return Err(Error::HandleDead(handle));
        }

        if !self.handles.lock().unwrap().is_alive(handle.raw()) {
            return Err(Error::HandleInvalid(handle));
        }

        let mut objects = self.objects.lock().unwrap();
        if let Some(&id) = objects.get(&handle.raw()) {
            return Ok(id);
        }

        let id = self.materialize(handle)?;
        objects.insert(handle.raw(), id);
        Ok(id)
    }

    fn materialize(&self, handle: GlesHandle) -> Result<GLuint> {
        let gl = &self.proc_table;
        let id = unsafe {
            match handle.kind() {
                HandleType::Buffer => {
                    let mut id = 0;
                    gl.gen_buffers(1, &mut id);
                    id
                }
                HandleType::Texture => {
                    let mut id = 0;
                    gl.gen_textures(1, &mut id);
                    id
                }
                HandleType::Program => gl.create_program(),
                HandleType::Unknown => return Err(Error::HandleInvalid(handle)),
            }
        };

        Ok(id)
    }

    fn destroy(&self, handle: GlesHandle) -> Result<()> {
        let id = self.objects.lock().unwrap().remove(&handle.raw());
        if let Some(id) = id {
            let gl = &self.proc_table;
            unsafe {
                match handle.kind() {
                    HandleType::Buffer => gl.delete_buffers(1, &id),
                    HandleType::Texture => gl.delete_textures(1, &id),
                    HandleType::Program => gl.delete_program(id),
                    HandleType::Unknown => {}
                }
            }
        }

        if !self.handles.lock().unwrap().free(handle.raw()) {
            return Err(Error::HandleInvalid(handle));
        }

        Ok(())
    }
}
