//! # faultline-triggers
//!
//! Intentionally crash-prone routines for exercising fuzzing infrastructure
//! and sanitizers. Every public trigger takes a raw input slice and either
//! returns through a guarded early-exit path or corrupts memory on purpose:
//! stack and heap overflows, integer-overflow-driven under-allocation,
//! use-after-free, double free, format-string injection, and an unconditional
//! null-pointer write.
//!
//! **This crate is deliberately unsound.** Never link it into anything that
//! matters. The only supported consumers are the fuzz targets in
//! `faultline-fuzz` and the CLI shim in `faultline-harness`.
//!
//! The guarded paths (documented per trigger) are the only ones unit tests
//! exercise; everything else is expected to crash or produce a sanitizer
//! report.

#![allow(unsafe_code)]

pub mod crash;
pub mod entry;
pub mod format;
pub mod heap;
pub mod journal;
pub mod registry;
pub mod stack;
pub mod temporal;

pub use entry::{fuzz_entry, parse_message};
pub use registry::{Trigger, TRIGGERS};
