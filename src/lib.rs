//! A small, deferred OpenGLES rendering backend.
//!
//! OpenGLES contexts are thread-affine and stateful: every call must happen
//! on the thread that owns the context, in the right order. This crate hides
//! that restriction behind a `Reactor`: resources created on arbitrary
//! threads hold opaque typed handles, and all work that touches the driver
//! is enqueued as operations which the context-owning thread drains in
//! submission order with `react`.
//!
//! On top of the reactor sit the backend resources: device buffers,
//! pipelines and render passes, which translate backend-neutral pipeline
//! and command descriptions into the exact sequence of GL calls needed to
//! reproduce that state, issued through a runtime-resolved `ProcTable`.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde;

pub mod backends;
pub mod command;
pub mod errors;
pub mod pipeline;
pub mod utils;

pub mod prelude;
