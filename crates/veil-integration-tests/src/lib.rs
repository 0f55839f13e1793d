//! End-to-end integration tests for Veil
//!
//! These tests wire the kernel, the built-in maskers, and the traversal
//! engine together to verify the full masking flow.
