//! Common infrastructure shared by the ROM and text layers

mod error;
mod span;

pub use error::{DiagnosticReporter, RomError, RomResult};
pub use span::Span;
