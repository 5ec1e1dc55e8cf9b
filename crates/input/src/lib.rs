//! Pointer input mapped to a single accumulated orientation.
//!
//! # Invariants
//! - Orientation starts as identity and only pointer-move events while
//!   dragging change it.
//! - Each applied rotation is composed on the left (screen-space order).
//! - Releasing the pointer freezes the orientation; there is no inertia.

pub mod orientation;
pub mod pointer;

pub use orientation::{DragRotation, DragState, OrientationController, drag_rotation};
pub use pointer::{PointerEvent, PointerQueue};

pub fn crate_info() -> &'static str {
    "cubeview-input v0.1.0"
}
