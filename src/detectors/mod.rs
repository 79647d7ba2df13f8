//! Syntactic detectors
//!
//! - `fragment`: is a piece of text (or a range of a file) JSX markup
//! - `shape`: does a piece of text define a function or class component

pub mod fragment;
pub mod shape;
