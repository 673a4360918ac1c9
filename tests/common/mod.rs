//! Common utilities for integration tests

pub mod cases;

// Re-export commonly used items
pub use cases::{
    assert_boundary_rows,
    flat_case,
    ogive_case,
    relative_error,
    SnapshotLog,
};
