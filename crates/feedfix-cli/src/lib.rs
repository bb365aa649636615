//! CLI library components for feedfix.

pub mod logging;
pub mod pipeline;
