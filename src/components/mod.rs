//! Canvas components.

pub mod diagram;
