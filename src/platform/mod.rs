//! Platform layer: responsibility and boundaries
//!
//! This module and its submodules only wrap OS capabilities (accessibility trust,
//! key-event injection, process enumeration, AX window/menu queries, app launch).
//! They MUST NOT decide anything: whether to launch, focus or create a window is
//! decided exclusively by the FocusController, and chord sequencing belongs to
//! the InputSimulator.

mod dry_run;
#[cfg(test)]
pub mod fake;
#[cfg(target_os = "macos")]
mod macos;
mod r#trait;

pub use self::r#trait::{create_platform, Platform};
