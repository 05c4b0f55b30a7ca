//! Pointer-driven drag state machine for creating, moving and resizing
//! reservations on the grid.
//!
//! `DragManager` owns at most one session. Pointer-down starts a session,
//! pointer-move updates it and refreshes the live conflict report, and
//! pointer-up consumes it into an optional `DragOutcome`. Cancelling discards
//! the session without a result.

use chrono::{Duration, NaiveDateTime};
use egui::Pos2;

use super::resize::ResizeEdge;
use super::store::{CreateResult, DragOutcome, MoveResult, ResizeResult};
use super::transform::GridTransform;
use super::view::{HitTarget, TimelineView};
use crate::models::interval::{IntervalId, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};
use crate::models::resource::ResourceId;
use crate::services::conflict::{ConflictReport, ConflictService, ProposedInterval};
use crate::utils::date::minutes_between;

/// Shortest span a create drag can be stretched to, in slots.
pub const MIN_CREATE_SLOTS: i64 = 2;

/// Coarse state of the machine, for cursors and gesture gating.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragKind {
    Idle,
    Creating,
    Moving,
    ResizingStart,
    ResizingEnd,
}

/// Drawing a new reservation across empty cells of one row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateSession {
    pub resource_id: ResourceId,
    pub start_slot: i64,
    pub end_slot: i64,
}

impl CreateSession {
    pub fn duration_minutes(&self, transform: &GridTransform) -> i64 {
        transform.slots_to_minutes(self.end_slot - self.start_slot)
    }

    pub fn proposal(&self, transform: &GridTransform) -> ProposedInterval {
        ProposedInterval::new(
            self.resource_id.clone(),
            transform.slot_to_time(self.start_slot),
            transform.slot_to_time(self.end_slot),
        )
    }
}

/// Dragging an existing reservation by its body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveSession {
    pub interval_id: IntervalId,
    pub anchor_resource_id: ResourceId,
    pub original_start_slot: i64,
    pub duration_minutes: i64,
    /// Slot under the pointer at pointer-down; moves are measured from here
    pub origin_slot: i64,
    pub current_slot: i64,
    /// Row under the pointer, `None` while over a header or empty space
    pub target_resource_id: Option<ResourceId>,
}

impl MoveSession {
    pub fn slot_diff(&self) -> i64 {
        self.current_slot - self.origin_slot
    }

    /// New `(start, end)` for the current pointer position. The start is
    /// clamped into the window; the duration is always preserved.
    pub fn moved_times(&self, transform: &GridTransform) -> (NaiveDateTime, NaiveDateTime) {
        let start_slot = transform.clamp_slot(self.original_start_slot + self.slot_diff());
        let start = transform.slot_to_time(start_slot);
        (start, start + Duration::minutes(self.duration_minutes))
    }

    pub fn proposal(&self, transform: &GridTransform) -> Option<ProposedInterval> {
        let target = self.target_resource_id.clone()?;
        let (start, end) = self.moved_times(transform);
        Some(ProposedInterval::new(target, start, end))
    }
}

/// Dragging one edge of an existing reservation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResizeSession {
    pub interval_id: IntervalId,
    pub resource_id: ResourceId,
    pub edge: ResizeEdge,
    pub original_start: NaiveDateTime,
    pub original_end: NaiveDateTime,
    pub original_duration_minutes: i64,
    pub origin_slot: i64,
    pub current_slot: i64,
}

impl ResizeSession {
    pub fn slot_diff(&self) -> i64 {
        self.current_slot - self.origin_slot
    }

    /// New `(start, end, duration)`. The duration is clamped to the allowed
    /// range and the dragged edge stays inside the operating window; the edge
    /// not being dragged stays where it was.
    pub fn resized_times(&self, transform: &GridTransform) -> (NaiveDateTime, NaiveDateTime, i64) {
        let delta_minutes = transform.slots_to_minutes(self.slot_diff());
        match self.edge {
            ResizeEdge::End => {
                let room = minutes_between(self.original_start, transform.window_end());
                let duration = (self.original_duration_minutes + delta_minutes)
                    .clamp(MIN_DURATION_MINUTES, max_duration_within(room));
                (
                    self.original_start,
                    self.original_start + Duration::minutes(duration),
                    duration,
                )
            }
            ResizeEdge::Start => {
                let room = minutes_between(transform.window_start(), self.original_end);
                let duration = (self.original_duration_minutes - delta_minutes)
                    .clamp(MIN_DURATION_MINUTES, max_duration_within(room));
                (
                    self.original_end - Duration::minutes(duration),
                    self.original_end,
                    duration,
                )
            }
        }
    }

    pub fn proposal(&self, transform: &GridTransform) -> ProposedInterval {
        let (start, end, _) = self.resized_times(transform);
        ProposedInterval::new(self.resource_id.clone(), start, end)
    }
}

/// Longest duration that fits in `room` minutes, never below the minimum.
fn max_duration_within(room: i64) -> i64 {
    MAX_DURATION_MINUTES.min(room).max(MIN_DURATION_MINUTES)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Creating(CreateSession),
    Moving(MoveSession),
    Resizing(ResizeSession),
}

impl DragState {
    pub fn kind(&self) -> DragKind {
        match self {
            DragState::Idle => DragKind::Idle,
            DragState::Creating(_) => DragKind::Creating,
            DragState::Moving(_) => DragKind::Moving,
            DragState::Resizing(session) => match session.edge {
                ResizeEdge::Start => DragKind::ResizingStart,
                ResizeEdge::End => DragKind::ResizingEnd,
            },
        }
    }

    /// Reservation being moved or resized, if any.
    pub fn subject_interval_id(&self) -> Option<&IntervalId> {
        match self {
            DragState::Moving(session) => Some(&session.interval_id),
            DragState::Resizing(session) => Some(&session.interval_id),
            DragState::Idle | DragState::Creating(_) => None,
        }
    }
}

/// Owner of the single active drag session.
#[derive(Clone, Debug, Default)]
pub struct DragManager {
    state: DragState,
    feedback: ConflictReport,
}

impl DragManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn kind(&self) -> DragKind {
        self.state.kind()
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Conflict report for the current proposal; visual feedback only.
    pub fn feedback(&self) -> &ConflictReport {
        &self.feedback
    }

    /// Proposed reservation for the active session, for preview rendering.
    pub fn preview(&self, view: &TimelineView<'_>) -> Option<ProposedInterval> {
        let transform = view.transform();
        match &self.state {
            DragState::Idle => None,
            DragState::Creating(session) => Some(session.proposal(transform)),
            DragState::Moving(session) => session.proposal(transform),
            DragState::Resizing(session) => Some(session.proposal(transform)),
        }
    }

    /// Start whichever gesture the pointer position calls for. Returns `false`
    /// when nothing started, including while another session is active.
    pub fn pointer_down(&mut self, view: &TimelineView<'_>, pos: Pos2) -> bool {
        match view.hit_test(pos) {
            HitTarget::EmptyCell { resource_id, .. } => self.begin_create(view, resource_id, pos.x),
            HitTarget::IntervalBody(interval_id) => self.begin_move(view, &interval_id, pos.x),
            HitTarget::IntervalEdge(interval_id, edge) => {
                self.begin_resize(view, &interval_id, edge, pos.x)
            }
            HitTarget::GroupHeader(_) | HitTarget::Outside => false,
        }
    }

    pub fn begin_create(&mut self, view: &TimelineView<'_>, resource_id: ResourceId, x: f32) -> bool {
        if self.reject_if_active() {
            return false;
        }
        let transform = view.transform();
        let start_slot = transform.clamp_slot(transform.pixel_to_slot(x));
        log::debug!("Create drag started on {} at slot {}", resource_id, start_slot);
        self.state = DragState::Creating(CreateSession {
            resource_id,
            start_slot,
            end_slot: start_slot + 1,
        });
        self.refresh_feedback(view);
        true
    }

    pub fn begin_move(&mut self, view: &TimelineView<'_>, interval_id: &IntervalId, x: f32) -> bool {
        if self.reject_if_active() {
            return false;
        }
        let Some(interval) = view.snapshot().interval(interval_id).filter(|i| i.is_active()) else {
            log::debug!("Move ignored: no active reservation {}", interval_id);
            return false;
        };
        let transform = view.transform();
        let origin_slot = transform.pixel_to_slot(x);
        log::debug!("Move drag started for {} at slot {}", interval_id, origin_slot);
        self.state = DragState::Moving(MoveSession {
            interval_id: interval.id.clone(),
            anchor_resource_id: interval.resource_id.clone(),
            original_start_slot: transform.time_to_slot(interval.start),
            duration_minutes: interval.duration_minutes,
            origin_slot,
            current_slot: origin_slot,
            target_resource_id: Some(interval.resource_id.clone()),
        });
        self.refresh_feedback(view);
        true
    }

    pub fn begin_resize(
        &mut self,
        view: &TimelineView<'_>,
        interval_id: &IntervalId,
        edge: ResizeEdge,
        x: f32,
    ) -> bool {
        if self.reject_if_active() {
            return false;
        }
        let Some(interval) = view.snapshot().interval(interval_id).filter(|i| i.is_active()) else {
            log::debug!("Resize ignored: no active reservation {}", interval_id);
            return false;
        };
        let origin_slot = view.transform().pixel_to_slot(x);
        log::debug!("Resize drag ({:?}) started for {} at slot {}", edge, interval_id, origin_slot);
        self.state = DragState::Resizing(ResizeSession {
            interval_id: interval.id.clone(),
            resource_id: interval.resource_id.clone(),
            edge,
            original_start: interval.start,
            original_end: interval.end,
            original_duration_minutes: interval.duration_minutes,
            origin_slot,
            current_slot: origin_slot,
        });
        self.refresh_feedback(view);
        true
    }

    /// Track the pointer. No-op while idle.
    pub fn pointer_move(&mut self, view: &TimelineView<'_>, pos: Pos2) {
        let transform = view.transform();
        let slot = transform.pixel_to_slot(pos.x);
        match &mut self.state {
            DragState::Idle => return,
            DragState::Creating(session) => {
                let max_slots = MAX_DURATION_MINUTES / transform.slot_minutes();
                let end = slot.clamp(
                    session.start_slot + MIN_CREATE_SLOTS,
                    session.start_slot + max_slots,
                );
                session.end_slot = transform.clamp_boundary(end).max(session.start_slot + 1);
            }
            DragState::Moving(session) => {
                session.current_slot = slot;
                session.target_resource_id = view.layout().resource_at_y(pos.y).cloned();
            }
            DragState::Resizing(session) => {
                session.current_slot = transform.clamp_boundary(slot);
            }
        }
        self.refresh_feedback(view);
    }

    /// Finish the gesture. The session is always cleared; a result is only
    /// produced when the gesture expresses a complete, effective change.
    pub fn pointer_up(&mut self, view: &TimelineView<'_>) -> Option<DragOutcome> {
        let state = std::mem::take(&mut self.state);
        self.feedback = ConflictReport::default();
        let transform = view.transform();

        let outcome = match state {
            DragState::Idle => None,
            DragState::Creating(session) => {
                let duration_minutes = session.duration_minutes(transform);
                if duration_minutes < MIN_DURATION_MINUTES {
                    None
                } else {
                    Some(DragOutcome::Created(CreateResult {
                        resource_id: session.resource_id,
                        start: transform.slot_to_time(session.start_slot),
                        end: transform.slot_to_time(session.end_slot),
                        duration_minutes,
                    }))
                }
            }
            DragState::Moving(session) => commit_move(session, view),
            DragState::Resizing(session) => {
                let (new_start, new_end, new_duration_minutes) = session.resized_times(transform);
                if new_start == session.original_start && new_end == session.original_end {
                    None
                } else {
                    Some(DragOutcome::Resized(ResizeResult {
                        interval_id: session.interval_id,
                        new_start,
                        new_end,
                        new_duration_minutes,
                    }))
                }
            }
        };

        match &outcome {
            Some(outcome) => log::info!("Drag committed: {:?}", outcome),
            None => log::debug!("Drag ended without a change"),
        }
        outcome
    }

    /// Discard the session with no result, e.g. when the pointer leaves the
    /// grid or capture is lost.
    pub fn cancel(&mut self) {
        if self.is_active() {
            log::debug!("Drag cancelled ({:?})", self.kind());
        }
        self.state = DragState::Idle;
        self.feedback = ConflictReport::default();
    }

    fn reject_if_active(&self) -> bool {
        if self.is_active() {
            log::warn!("Gesture start ignored while {:?} is in progress", self.kind());
            return true;
        }
        false
    }

    fn refresh_feedback(&mut self, view: &TimelineView<'_>) {
        let service = ConflictService::new(view.intervals());
        self.feedback = match self.preview(view) {
            Some(proposed) => service.check(&proposed, self.state.subject_interval_id()),
            None => ConflictReport::default(),
        };
    }
}

fn commit_move(session: MoveSession, view: &TimelineView<'_>) -> Option<DragOutcome> {
    let transform = view.transform();
    let (new_start, new_end) = session.moved_times(transform);
    let new_resource_id = session.target_resource_id?;

    let unchanged = new_resource_id == session.anchor_resource_id
        && view
            .snapshot()
            .interval(&session.interval_id)
            .map_or(false, |original| original.start == new_start);
    if unchanged {
        return None;
    }

    Some(DragOutcome::Moved(MoveResult {
        interval_id: session.interval_id,
        new_resource_id,
        new_start,
        new_end,
    }))
}
