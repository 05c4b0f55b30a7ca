//! Interactive timeline core: coordinate transform, layout, virtualization,
//! hit testing and the drag state machine.

pub mod drag;
pub mod layout;
pub mod resize;
pub mod store;
pub mod transform;
pub mod view;
pub mod virtualization;

pub use drag::{DragKind, DragManager, DragState};
pub use layout::{compute_layout, GridLayout, LayoutMetrics};
pub use resize::{EdgeZones, ResizeEdge};
pub use store::{CreateResult, DragOutcome, MoveResult, ResizeResult, TimelineStore};
pub use transform::GridTransform;
pub use view::{HitTarget, TimelineView};
pub use virtualization::{
    compute_visible_range, GridExtent, Overscan, ViewportWindow, VisibleRange, Virtualizer,
};
