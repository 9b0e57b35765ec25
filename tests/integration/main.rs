//! Integration tests for mxdft.
//!
//! These tests drive the `mxdft` binary end to end and exercise the worker pool's
//! phase ordering and cancellation under real threads.

mod helpers;
mod test_error_paths;
mod test_generate_command;
mod test_transform_command;
