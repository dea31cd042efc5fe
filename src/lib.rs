//! # nsr
//!
//! A lexer and block assembler for the nsr ("not so REST") plain-text markup format.
//!
//! File Layout
//!
//! The core is three lazy stages chained one after another, each living in its own module:
//!
//! src/nsr
//!   ├── lexing        Line classification: text -> lexer events
//!   ├── assembling    Block accumulation: lexer events -> raw blocks
//!   ├── classifying   Post-processing: raw blocks -> final blocks
//!   └── pipeline      The three stages wired together
//!
//! Everything else (styles, formats, config, the binary) consumes the block stream and is
//! never required by the core.
//!
//! For testing helpers, see the [testing module](nsr::testing).

pub mod nsr;
