//! Shared test utilities for the stack-builder workspace.
//!
//! Dev-dependency only. [`TestLibrary`] lays out a throwaway module library
//! (category directories, module documents, stack manifests) in a temporary
//! directory.

pub mod library;

pub use library::TestLibrary;
