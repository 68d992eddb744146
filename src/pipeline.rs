//! Backend-neutral description of a render pipeline: attachments, blending,
//! depth/stencil state and vertex stage inputs.
//!
//! Descriptors are plain data supplied by the shader-reflection collaborator
//! and consumed read-only by the backends.

use smallvec::SmallVec;

/// The maximum number of color attachments a pipeline may describe.
pub const MAX_COLOR_ATTACHMENTS: usize = 4;

/// The maximum number of vertex attributes.
pub const MAX_VERTEX_ATTRIBUTES: usize = 8;

/// A pixel-wise comparison function.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Comparison {
    Never,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
    Always,
}

/// Specifies how incoming RGBA values (source) and the RGBA in framebuffer
/// (destination) are combined.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Equation {
    /// Adds source and destination. Source and destination are multiplied
    /// by blending parameters before addition.
    Add,
    /// Subtracts destination from source. Source and destination are
    /// multiplied by blending parameters before subtraction.
    Subtract,
    /// Subtracts source from destination. Source and destination are
    /// multiplied by blending parameters before subtraction.
    ReverseSubtract,
}

/// Blend values.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum BlendValue {
    SourceColor,
    SourceAlpha,
    DestinationColor,
    DestinationAlpha,
}

/// Blend factors.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum BlendFactor {
    Zero,
    One,
    Value(BlendValue),
    OneMinusValue(BlendValue),
}

/// Operation performed on a stencil buffer value depending on the outcome of
/// the stencil and depth tests.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum StencilOp {
    Keep,
    Zero,
    Replace,
    IncrementClamp,
    DecrementClamp,
    Invert,
    IncrementWrap,
    DecrementWrap,
}

bitflags! {
    /// Channel mask applied to color writes.
    pub struct ColorWriteMask: u8 {
        const RED = 0b0000_0001;
        const GREEN = 0b0000_0010;
        const BLUE = 0b0000_0100;
        const ALPHA = 0b0000_1000;
        const ALL = Self::RED.bits | Self::GREEN.bits | Self::BLUE.bits | Self::ALPHA.bits;
    }
}

/// Blending and write-mask state of one color attachment.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct ColorAttachmentDescriptor {
    pub blending_enabled: bool,
    pub src_color_blend_factor: BlendFactor,
    pub src_alpha_blend_factor: BlendFactor,
    pub dst_color_blend_factor: BlendFactor,
    pub dst_alpha_blend_factor: BlendFactor,
    pub color_blend_op: Equation,
    pub alpha_blend_op: Equation,
    pub write_mask: ColorWriteMask,
}

impl Default for ColorAttachmentDescriptor {
    fn default() -> Self {
        ColorAttachmentDescriptor {
            blending_enabled: false,
            src_color_blend_factor: BlendFactor::One,
            src_alpha_blend_factor: BlendFactor::One,
            dst_color_blend_factor: BlendFactor::Zero,
            dst_alpha_blend_factor: BlendFactor::Zero,
            color_blend_op: Equation::Add,
            alpha_blend_op: Equation::Add,
            write_mask: ColorWriteMask::ALL,
        }
    }
}

/// Depth test and write state.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct DepthAttachmentDescriptor {
    pub compare: Comparison,
    pub write_enabled: bool,
}

/// Stencil test state for one face.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct StencilAttachmentDescriptor {
    pub compare: Comparison,
    /// Operation when the stencil test fails.
    pub stencil_failure: StencilOp,
    /// Operation when the stencil test passes but the depth test fails.
    pub depth_failure: StencilOp,
    /// Operation when both the stencil and depth tests pass.
    pub depth_stencil_pass: StencilOp,
    pub read_mask: u32,
    pub write_mask: u32,
}

impl Default for StencilAttachmentDescriptor {
    fn default() -> Self {
        StencilAttachmentDescriptor {
            compare: Comparison::Always,
            stencil_failure: StencilOp::Keep,
            depth_failure: StencilOp::Keep,
            depth_stencil_pass: StencilOp::Keep,
            read_mask: !0,
            write_mask: !0,
        }
    }
}

/// The data type of one component of a vertex attribute.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy)]
pub enum ShaderType {
    Bool,
    SignedByte,
    UnsignedByte,
    SignedShort,
    UnsignedShort,
    SignedInt,
    UnsignedInt,
    Float,
    Double,
}

/// One input slot of the vertex stage, as reported by shader reflection.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct StageInput {
    /// The attribute location the slot is bound to.
    pub location: u32,
    /// Component count, must be in `[1, 4]`.
    pub vec_size: u32,
    /// Width of one component in bits.
    pub bit_width: u32,
    pub kind: ShaderType,
}

/// Everything the backend needs to configure programmable and fixed-function
/// state for one pipeline.
#[derive(Debug, Default, Clone)]
pub struct PipelineDescriptor {
    pub label: String,
    pub colors: [Option<ColorAttachmentDescriptor>; MAX_COLOR_ATTACHMENTS],
    pub depth: Option<DepthAttachmentDescriptor>,
    pub front_stencil: Option<StencilAttachmentDescriptor>,
    pub back_stencil: Option<StencilAttachmentDescriptor>,
    pub inputs: SmallVec<[StageInput; MAX_VERTEX_ATTRIBUTES]>,
}

impl PipelineDescriptor {
    /// Returns true if the pipeline carries a stencil descriptor for at least
    /// one face.
    pub fn has_stencil_attachments(&self) -> bool {
        self.front_stencil.is_some() || self.back_stencil.is_some()
    }

    /// Returns the sole color attachment when the configuration is the
    /// single-attachment shape this backend can translate, and `None` for
    /// anything more complicated.
    pub fn sole_color_attachment(&self) -> Option<&ColorAttachmentDescriptor> {
        if self.colors[1..].iter().any(|v| v.is_some()) {
            return None;
        }

        self.colors[0].as_ref()
    }
}
