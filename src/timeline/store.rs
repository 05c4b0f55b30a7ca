//! Commit surface towards the external reservation store.
//!
//! The timeline never writes state itself. A finished gesture yields a
//! `DragOutcome`, which is handed to a `TimelineStore` to apply, reject or
//! roll back. Nothing is retried or queued here.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::models::interval::IntervalId;
use crate::models::resource::ResourceId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResult {
    pub resource_id: ResourceId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveResult {
    pub interval_id: IntervalId,
    pub new_resource_id: ResourceId,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResizeResult {
    pub interval_id: IntervalId,
    pub new_start: NaiveDateTime,
    pub new_end: NaiveDateTime,
    pub new_duration_minutes: i64,
}

/// Terminal result of a committed gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    Created(CreateResult),
    Moved(MoveResult),
    Resized(ResizeResult),
}

impl DragOutcome {
    /// Forward the outcome to the matching store callback.
    pub fn dispatch<S: TimelineStore + ?Sized>(self, store: &mut S) {
        match self {
            DragOutcome::Created(result) => store.on_create_committed(result),
            DragOutcome::Moved(result) => store.on_move_committed(result),
            DragOutcome::Resized(result) => store.on_resize_committed(result),
        }
    }
}

/// Mutation callbacks implemented by the owner of the reservation data.
#[cfg_attr(test, mockall::automock)]
pub trait TimelineStore {
    fn on_create_committed(&mut self, result: CreateResult);
    fn on_move_committed(&mut self, result: MoveResult);
    fn on_resize_committed(&mut self, result: ResizeResult);
}
