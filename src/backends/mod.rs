//! GPU backends behind a closed capability surface.
//!
//! Every resource is one variant of a closed set: the backend is selected
//! once at device-creation time and never mixed afterwards. The wrappers
//! expose the capabilities all backends share: validity, debug labels and
//! the cast back to the concrete resource.

pub mod gles;

use std::sync::Arc;

use self::gles::{GlesBuffer, GlesPipeline};

/// Where a resource's contents live and how the host may access them.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StorageMode {
    /// Host-coherent memory the CPU may write directly.
    HostVisible,
    /// Device-local memory reachable only through a transfer queue.
    DevicePrivate,
    /// Device-local memory whose contents do not survive a pass.
    DeviceTransient,
}

/// A device buffer of one of the supported backends.
#[derive(Clone)]
pub enum DeviceBuffer {
    Gles(Arc<GlesBuffer>),
}

impl DeviceBuffer {
    pub fn is_valid(&self) -> bool {
        match *self {
            DeviceBuffer::Gles(ref buffer) => buffer.is_valid(),
        }
    }

    pub fn set_label(&self, label: &str) -> bool {
        match *self {
            DeviceBuffer::Gles(ref buffer) => buffer.set_label(label),
        }
    }

    /// The concrete GLES resource behind this wrapper.
    pub fn as_gles(&self) -> &GlesBuffer {
        match *self {
            DeviceBuffer::Gles(ref buffer) => buffer,
        }
    }
}

impl From<Arc<GlesBuffer>> for DeviceBuffer {
    fn from(buffer: Arc<GlesBuffer>) -> Self {
        DeviceBuffer::Gles(buffer)
    }
}

/// A render pipeline of one of the supported backends.
#[derive(Clone)]
pub enum Pipeline {
    Gles(Arc<GlesPipeline>),
}

impl Pipeline {
    pub fn is_valid(&self) -> bool {
        match *self {
            Pipeline::Gles(ref pipeline) => pipeline.is_valid(),
        }
    }

    pub fn set_label(&self, label: &str) -> bool {
        match *self {
            Pipeline::Gles(ref pipeline) => pipeline.set_label(label),
        }
    }

    /// The concrete GLES resource behind this wrapper.
    pub fn as_gles(&self) -> &GlesPipeline {
        match *self {
            Pipeline::Gles(ref pipeline) => pipeline,
        }
    }
}

impl From<Arc<GlesPipeline>> for Pipeline {
    fn from(pipeline: Arc<GlesPipeline>) -> Self {
        Pipeline::Gles(pipeline)
    }
}
