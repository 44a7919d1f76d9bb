//! Schema-driven command-line parsing.
//!
//! This crate turns a caller-declared option schema plus a raw,
//! unparsed command-line string into a populated configuration object,
//! and renders the same schema as word-wrapped help text:
//!
//! - [`Schema`] / [`SchemaBuilder`] — the declared option set: keys,
//!   cardinality, coercion targets, help text.
//! - [`tokenize`] — scans the raw line into tagged value lists, handling
//!   quoting, comma lists, and embedded hyphens.
//! - [`ParseValue`] — coercion from value text to typed fields, with
//!   hex/binary/decimal integer notations and a time-span format.
//! - [`Schema::bind`] — matches tokens against the schema, enforces
//!   cardinality and required options, writes the destination object.
//! - [`render_help`] — NAME/SYNOPSIS/DESCRIPTION layout plus one wrapped
//!   paragraph per option.
//! - [`context`] — two-line snippet-and-caret rendering for positional
//!   errors.
//!
//! Everything is synchronous and free of shared mutable state; a built
//! [`Schema`] may be reused read-only across any number of parse calls.
//!
//! # Example
//!
//! ```
//! use hashwalk_args::{Schema, Strictness};
//!
//! #[derive(Default)]
//! struct Opts {
//!     verbose: bool,
//!     count: u32,
//!     inputs: Vec<String>,
//! }
//!
//! let schema = Schema::builder("demo", "demo [-v] [-c=N] -i=FOLDER,...", "A demo tool.")
//!     .flag('v', Some("verbose"), "Chatty output.", |o: &mut Opts| o.verbose = true)
//!     .single('c', Some("count"), "Repeat count.", |o: &mut Opts, v| o.count = v)
//!     .array('i', Some("input"), "Input folders.", |o: &mut Opts, v| o.inputs = v)
//!     .required()
//!     .build()
//!     .unwrap();
//!
//! let mut opts = Opts::default();
//! schema
//!     .parse_line("demo -c=0x10 -i=\"a b\",c", &mut opts, Strictness::Strict)
//!     .unwrap();
//! assert_eq!(opts.count, 16);
//! assert_eq!(opts.inputs, ["a b", "c"]);
//! ```

mod bind;
mod coerce;
mod context;
mod error;
mod help;
mod schema;
mod tokenize;

pub use bind::Strictness;
pub use coerce::{ParseValue, parse_enum};
pub use context::{annotate, context};
pub use error::{BindError, ConvertError, ParseError, SchemaError, TokenizeError};
pub use help::render_help;
pub use schema::{OptKind, OptSpec, Schema, SchemaBuilder};
pub use tokenize::{RawToken, tokenize};
