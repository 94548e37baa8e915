//! Data models for voight entities.

mod interview;
mod packet;

pub use interview::{Interview, InterviewOutcome, InterviewSnapshot, InterviewStatus};
pub use packet::{Packet, RoleKind, SuspectRole};
