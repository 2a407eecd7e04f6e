//! Validated primitive types shared across the prescreening workspace.
//!
//! The one guarantee that lives here: [`ReportId`], a stored report
//! identifier in canonical short form (**8 lowercase hexadecimal
//! characters**, the leading bytes of a v4 UUID).
//!
//! Externally supplied identifiers (CLI arguments, API path segments) must be
//! validated with [`ReportId::parse`] before they are used to address the
//! report store.

mod id;

pub use id::{IdError, ReportId};
