//! GPU device and swapchain.
//!
//! One `Gpu` per window: wgpu instance, adapter, device, queue and the window's
//! surface. Surface errors are mapped to a `SurfaceErrorAction` for the frame loop.

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
