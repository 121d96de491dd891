//! Gatehouse Core - Verification flow engine
//!
//! This crate provides the headless state machine behind the email
//! verification flow: step transitions, field validation, the resend
//! cooldown counter, and the segmented code input protocol. It has no
//! terminal or I/O dependencies; the presentation shell consumes it
//! through events and effects.

pub mod code;
pub mod cooldown;
pub mod email;
pub mod flow;
pub mod segments;

pub use code::{CodeField, DEFAULT_CODE_LENGTH};
pub use cooldown::{Cooldown, RESEND_COOLDOWN_SECS};
pub use email::EmailField;
pub use flow::{AnimTarget, FlowEffect, FlowEvent, Step, VerifyFlow};
pub use segments::SegmentedInput;
