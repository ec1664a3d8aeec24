//! # cstrvar-core
//!
//! A library for turning a file into a C character-array declaration, so its
//! contents can be compiled straight into a native program.
//!
//! This crate provides the core functionality for:
//! - Escaping lines of text as C string literals
//! - Streaming a whole input into one continued `const char name[]` declaration
//! - Reading a generated declaration back into the original bytes
//!
//! ## Architecture
//!
//! - [`escape`]: C string-literal escaping and unescaping
//! - [`emit`](mod@emit): Declaration emitter over `BufRead` / `Write` streams
//! - [`decode`]: Parser for generated declarations
//! - [`error`]: Error types and handling
//!
//! ## Example
//!
//! ```
//! use cstrvar_core::{decode_fragment, emit};
//!
//! let input = "Hello, \"world\"\n";
//! let mut out = Vec::new();
//! let stats = emit(input.as_bytes(), &mut out, "greeting")?;
//! assert_eq!(stats.lines, 1);
//!
//! let fragment = String::from_utf8(out).unwrap();
//! assert_eq!(
//!     fragment,
//!     "const char greeting[] = \\\n  \"Hello, \\\"world\\\"\\n\" \\\n;\n"
//! );
//! assert_eq!(decode_fragment(&fragment)?.content, input.as_bytes());
//! # Ok::<(), cstrvar_core::Error>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unreachable_pub)]

pub mod decode;
pub mod emit;
pub mod error;
pub mod escape;

// Re-export primary types for convenience
pub use decode::{decode_fragment, Decoded};
pub use emit::{emit, emit_to_string, EmitStats, Emitter};
pub use error::{Error, Result};
pub use escape::{escape_into, escape_line, unescape_literal};

/// Crate version for programmatic access
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
