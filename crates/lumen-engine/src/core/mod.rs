//! Contracts between the runtime loop and applications.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, SetupCtx, WindowCtx};

pub(crate) use ctx::grab_cursor;
