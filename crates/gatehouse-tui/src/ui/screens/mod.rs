//! Screen modules for different views

pub mod code;
pub mod done;
pub mod email;
pub mod handoff;
