//! # Pattern Module
//!
//! Compiles segment pattern strings such as `/blog[/:year[/:month]]` into a
//! token tree of literals, named placeholders and nested optional groups.
//! Compilation is pure; [`PatternCache`] memoizes it per distinct string so
//! route trees built from the same configuration share their token trees.

mod cache;
mod parser;

pub use cache::PatternCache;
pub use parser::{Pattern, Placeholder, Token, SEPARATOR};
