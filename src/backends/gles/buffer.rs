//! Host-to-device byte ranges backed by reactor-owned buffer objects.

use std::ptr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gl;
use gl::types::*;

use crate::backends::StorageMode;
use crate::command::Range;

use super::handle::{GlesHandle, HandleType};
use super::reactor::ReactorRef;

/// A single linear range of bytes on the device.
///
/// The buffer object itself lives in the reactor: it is materialized on the
/// context thread the first time an upload or draw touches it, and storage
/// for the full declared size is allocated on the first upload.
pub struct GlesBuffer {
    reactor: Option<ReactorRef>,
    size: usize,
    mode: StorageMode,
    handle: GlesHandle,
    allocated: Arc<AtomicBool>,
}

impl GlesBuffer {
    pub fn new(reactor: Option<ReactorRef>, size: usize, mode: StorageMode) -> Self {
        let handle = match reactor {
            Some(ref reactor) => reactor.create_handle(HandleType::Buffer),
            None => GlesHandle::dead(),
        };

        GlesBuffer {
            reactor,
            size,
            mode,
            handle,
            allocated: Arc::new(AtomicBool::new(false)),
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.handle.is_dead()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn mode(&self) -> StorageMode {
        self.mode
    }

    #[inline]
    pub fn handle(&self) -> GlesHandle {
        self.handle
    }

    /// Stages `range` bytes of `source` and schedules the device-side write
    /// at `offset`. Returns `true` as soon as the write has been accepted by
    /// the reactor, not once it has executed.
    ///
    /// Fails without side effects when the buffer is not host-visible, when
    /// the destination or source range is out of bounds, or when there is no
    /// reactor.
    pub fn copy_host_buffer(&self, source: &[u8], range: Range, offset: usize) -> bool {
        if self.mode != StorageMode::HostVisible {
            // One of the storage modes where a transfer queue must be used.
            return false;
        }

        if offset + range.length > self.size {
            // Out of bounds of this buffer.
            return false;
        }

        if range.offset + range.length > source.len() {
            return false;
        }

        let reactor = match self.reactor {
            Some(ref reactor) => reactor.clone(),
            None => return false,
        };

        let staging = source[range.offset..range.offset + range.length].to_vec();
        let handle = self.handle;
        let size = self.size;
        let allocated = Arc::clone(&self.allocated);

        reactor.add_operation(move |reactor| {
            let id = reactor.resolve(handle)?;
            let gl = reactor.proc_table();
            unsafe {
                gl.bind_buffer(gl::ARRAY_BUFFER, id);
                if !allocated.swap(true, Ordering::AcqRel) {
                    gl.buffer_data(
                        gl::ARRAY_BUFFER,
                        size as GLsizeiptr,
                        ptr::null(),
                        gl::DYNAMIC_DRAW,
                    );
                }

                gl.buffer_sub_data(
                    gl::ARRAY_BUFFER,
                    offset as GLintptr,
                    staging.len() as GLsizeiptr,
                    staging.as_ptr() as *const _,
                );
            }

            Ok(())
        })
    }

    /// Debug labels have no GLES equivalent used here.
    pub fn set_label(&self, _label: &str) -> bool {
        true
    }

    /// Debug labels have no GLES equivalent used here.
    pub fn set_label_range(&self, _label: &str, _range: Range) -> bool {
        true
    }
}

impl Drop for GlesBuffer {
    fn drop(&mut self) {
        if let Some(ref reactor) = self.reactor {
            reactor.collect_handle(self.handle);
        }
    }
}
