use crate::backends::gles::GlesHandle;

#[derive(Debug, Fail)]
pub enum Error {
    #[fail(display = "{} is dead.", _0)]
    HandleDead(GlesHandle),
    #[fail(display = "{} is not alive.", _0)]
    HandleInvalid(GlesHandle),
    #[fail(display = "Instanced rendering is not supported.")]
    InstancingUnsupported,
    #[fail(display = "Command has no pipeline attached.")]
    PipelineMissing,
    #[fail(display = "Color attachments are too complicated for this backend.")]
    ColorAttachmentsTooComplex,
    #[fail(display = "Index type is unknown.")]
    IndexTypeUnknown,
    #[fail(display = "Vertex or index buffer view is missing.")]
    BufferViewMissing,
    #[fail(display = "Vertex layout is missing or failed to bind.")]
    VertexLayoutFailure,
}

pub type Result<T> = ::std::result::Result<T, Error>;
