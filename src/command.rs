//! Draw commands and the fixed-function state they carry.

use cgmath::Vector2;

use crate::backends::{DeviceBuffer, Pipeline};

/// Specify whether front- or back-facing polygons can be culled.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum CullFace {
    Nothing,
    Front,
    Back,
}

/// Define front- and back-facing polygons.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum FrontFaceOrder {
    Clockwise,
    CounterClockwise,
}

/// Primitive type used to interpret the vertex stream of a draw.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Primitive {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
}

/// Format of device-resident indices.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum IndexType {
    Unknown,
    U16,
    U32,
}

/// A byte range, `length` bytes starting at `offset`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Range {
    pub offset: usize,
    pub length: usize,
}

impl Range {
    #[inline]
    pub fn new(offset: usize, length: usize) -> Self {
        Range { offset, length }
    }
}

/// A view into a sub-range of a device buffer.
#[derive(Clone)]
pub struct BufferView {
    pub buffer: DeviceBuffer,
    pub range: Range,
}

/// Axis-aligned region in framebuffer coordinates.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Rect {
    pub origin: Vector2<i32>,
    pub size: Vector2<u32>,
}

/// Viewport state for a draw.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Viewport {
    pub rect: Rect,
}

/// An opaque render target. Its attachments and formats are managed by the
/// surface collaborator; the backend only ever sees the extent.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RenderTarget {
    pub extent: Vector2<u32>,
}

impl RenderTarget {
    pub fn new(extent: Vector2<u32>) -> Self {
        RenderTarget { extent }
    }
}

/// One draw invocation plus its full associated pipeline and fixed-function
/// state.
#[derive(Clone)]
pub struct Command {
    pub pipeline: Option<Pipeline>,
    pub vertex_buffer: Option<BufferView>,
    pub index_buffer: Option<BufferView>,
    pub index_type: IndexType,
    pub index_count: usize,
    pub primitive: Primitive,
    pub cull_face: CullFace,
    pub winding: FrontFaceOrder,
    pub viewport: Option<Viewport>,
    pub scissor: Option<Rect>,
    pub stencil_reference: u32,
    /// Always 1. Instanced rendering is not supported by this backend and
    /// commands asking for it are rejected at encode time.
    pub instance_count: usize,
}

impl Default for Command {
    fn default() -> Self {
        Command {
            pipeline: None,
            vertex_buffer: None,
            index_buffer: None,
            index_type: IndexType::Unknown,
            index_count: 0,
            primitive: Primitive::Triangles,
            cull_face: CullFace::Nothing,
            winding: FrontFaceOrder::CounterClockwise,
            viewport: None,
            scissor: None,
            stencil_reference: 0,
            instance_count: 1,
        }
    }
}
