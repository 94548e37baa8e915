//! Session engine: registry, content draws, and interview operations.

mod draw;
mod registry;
mod service;

pub use draw::draw_unique;
pub use registry::{InterviewRegistry, SharedInterview};
pub use service::InterviewService;
