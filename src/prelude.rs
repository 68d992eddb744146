pub use crate::backends::gles::{
    GlesBuffer, GlesHandle, GlesPipeline, GlesRenderPass, GlesVertexDescriptor, HandleType,
    ProcTable, Reactor, ReactorRef,
};
pub use crate::backends::{DeviceBuffer, Pipeline, StorageMode};
pub use crate::command::{
    BufferView, Command, CullFace, FrontFaceOrder, IndexType, Primitive, Range, Rect,
    RenderTarget, Viewport,
};
pub use crate::errors::{Error, Result};
pub use crate::pipeline::{
    BlendFactor, BlendValue, ColorAttachmentDescriptor, ColorWriteMask, Comparison,
    DepthAttachmentDescriptor, Equation, PipelineDescriptor, ShaderType, StageInput,
    StencilAttachmentDescriptor, StencilOp,
};
