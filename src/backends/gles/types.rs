//! Translations from backend-neutral state enums to GL constants.

use gl;
use gl::types::*;

use crate::command::{IndexType, Primitive};
use crate::pipeline::{BlendFactor, BlendValue, Comparison, Equation, ShaderType, StencilOp};

impl From<Comparison> for GLenum {
    fn from(cmp: Comparison) -> Self {
        match cmp {
            Comparison::Never => gl::NEVER,
            Comparison::Less => gl::LESS,
            Comparison::LessOrEqual => gl::LEQUAL,
            Comparison::Greater => gl::GREATER,
            Comparison::GreaterOrEqual => gl::GEQUAL,
            Comparison::Equal => gl::EQUAL,
            Comparison::NotEqual => gl::NOTEQUAL,
            Comparison::Always => gl::ALWAYS,
        }
    }
}

impl From<Equation> for GLenum {
    fn from(eq: Equation) -> Self {
        match eq {
            Equation::Add => gl::FUNC_ADD,
            Equation::Subtract => gl::FUNC_SUBTRACT,
            Equation::ReverseSubtract => gl::FUNC_REVERSE_SUBTRACT,
        }
    }
}

impl From<BlendFactor> for GLenum {
    fn from(factor: BlendFactor) -> Self {
        match factor {
            BlendFactor::Zero => gl::ZERO,
            BlendFactor::One => gl::ONE,
            BlendFactor::Value(BlendValue::SourceColor) => gl::SRC_COLOR,
            BlendFactor::Value(BlendValue::SourceAlpha) => gl::SRC_ALPHA,
            BlendFactor::Value(BlendValue::DestinationColor) => gl::DST_COLOR,
            BlendFactor::Value(BlendValue::DestinationAlpha) => gl::DST_ALPHA,
            BlendFactor::OneMinusValue(BlendValue::SourceColor) => gl::ONE_MINUS_SRC_COLOR,
            BlendFactor::OneMinusValue(BlendValue::SourceAlpha) => gl::ONE_MINUS_SRC_ALPHA,
            BlendFactor::OneMinusValue(BlendValue::DestinationColor) => gl::ONE_MINUS_DST_COLOR,
            BlendFactor::OneMinusValue(BlendValue::DestinationAlpha) => gl::ONE_MINUS_DST_ALPHA,
        }
    }
}

impl From<StencilOp> for GLenum {
    fn from(op: StencilOp) -> Self {
        match op {
            StencilOp::Keep => gl::KEEP,
            StencilOp::Zero => gl::ZERO,
            StencilOp::Replace => gl::REPLACE,
            StencilOp::IncrementClamp => gl::INCR,
            StencilOp::DecrementClamp => gl::DECR,
            StencilOp::Invert => gl::INVERT,
            StencilOp::IncrementWrap => gl::INCR_WRAP,
            StencilOp::DecrementWrap => gl::DECR_WRAP,
        }
    }
}

impl From<Primitive> for GLenum {
    fn from(primitive: Primitive) -> Self {
        match primitive {
            Primitive::Points => gl::POINTS,
            Primitive::Lines => gl::LINES,
            Primitive::LineStrip => gl::LINE_STRIP,
            Primitive::Triangles => gl::TRIANGLES,
            Primitive::TriangleStrip => gl::TRIANGLE_STRIP,
        }
    }
}

/// Maps an index format to its GL type, or `None` for the unknown format.
pub fn index_type(kind: IndexType) -> Option<GLenum> {
    match kind {
        IndexType::Unknown => None,
        IndexType::U16 => Some(gl::UNSIGNED_SHORT),
        IndexType::U32 => Some(gl::UNSIGNED_INT),
    }
}

/// Maps a shader component type to a vertex attribute type, or `None` when
/// the type has no GLES attribute equivalent.
pub fn vertex_attrib_type(kind: ShaderType) -> Option<GLenum> {
    match kind {
        ShaderType::SignedByte => Some(gl::BYTE),
        ShaderType::UnsignedByte => Some(gl::UNSIGNED_BYTE),
        ShaderType::SignedShort => Some(gl::SHORT),
        ShaderType::UnsignedShort => Some(gl::UNSIGNED_SHORT),
        ShaderType::Float => Some(gl::FLOAT),
        _ => None,
    }
}
