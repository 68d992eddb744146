//! The OpenGLES backend.
//!
//! GL contexts are thread-affine and stateful, so this backend centralizes
//! every driver call into the [`Reactor`]: resources allocate opaque handles
//! from it on any thread, and the real driver objects are materialized and
//! manipulated only when the context-owning thread drains the reactor.
//!
//! [`Reactor`]: reactor/struct.Reactor.html

pub mod buffer;
pub mod handle;
pub mod pipeline;
pub mod proc_table;
pub mod reactor;
pub mod render_pass;
pub mod types;
pub mod vertex_descriptor;

pub use self::buffer::GlesBuffer;
pub use self::handle::{GlesHandle, HandleType};
pub use self::pipeline::GlesPipeline;
pub use self::proc_table::{Description, ProcTable};
pub use self::reactor::{Reactor, ReactorRef};
pub use self::render_pass::GlesRenderPass;
pub use self::vertex_descriptor::GlesVertexDescriptor;
