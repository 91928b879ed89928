//! Format agnostic rendering: token → node mapping, the render pass, URL
//! sanitization and output container assembly.

pub mod container;
pub mod links;
pub mod mapping;
pub mod render;
