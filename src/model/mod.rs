//! Data structures shared by the formula pipeline.
//!
//! - [`table`] – The immutable symbol → atomic number lookup built once per run.
//! - [`token`] – Lexical units produced by the tokenizer.
//! - [`sequence`] – The flat, multiplied-out atom list produced by the expander.
//!
//! Tokens and expanded sequences borrow their symbols from the formula being
//! processed and are discarded with it; only the table outlives a formula.

pub mod sequence;
pub mod table;
pub mod token;
