//! Shot ordering and continuity.
//!
//! `shot_number` is a project-wide timeline position: it orders shots
//! inside a scene and is also compared across scenes to find a shot's
//! previous and next neighbours.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::MAX_ORDER_KEY;

// ---------------------------------------------------------------------------
// Reorder
// ---------------------------------------------------------------------------

/// The ordering-relevant view of a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShotSlot {
    pub id: DbId,
    pub scene_id: DbId,
    pub shot_number: i32,
}

/// New `shot_number` assignments for one scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReorderPlan {
    pub scene_id: DbId,
    /// `(shot_id, new shot_number)` in the requested order.
    pub assignments: Vec<(DbId, i32)>,
}

/// Compute the renumbering for a scene-level reorder.
///
/// `project_shots` is every shot of the project; `requested` is the full
/// ordered id list for one scene. The numbers the scene already holds are
/// sorted and handed out in the requested order, so the scene keeps its
/// slots on the project timeline and no other scene is affected.
pub fn plan_reorder(project_shots: &[ShotSlot], requested: &[DbId]) -> Result<ReorderPlan, CoreError> {
    if requested.is_empty() {
        return Err(CoreError::Validation("shot_ids must not be empty".to_string()));
    }

    let mut seen = HashSet::with_capacity(requested.len());
    for id in requested {
        if !seen.insert(*id) {
            return Err(CoreError::Validation(format!(
                "shot_ids contains duplicate id {id}"
            )));
        }
    }

    let mut scene_id = None;
    for id in requested {
        let slot = project_shots
            .iter()
            .find(|s| s.id == *id)
            .ok_or(CoreError::NotFound { entity: "Shot", id: *id })?;
        match scene_id {
            None => scene_id = Some(slot.scene_id),
            Some(sid) if sid != slot.scene_id => {
                return Err(CoreError::Validation(
                    "shot_ids must all belong to the same scene".to_string(),
                ));
            }
            Some(_) => {}
        }
    }
    // Non-empty and every id resolved, so a scene was found.
    let scene_id = scene_id.ok_or_else(|| CoreError::Internal("no scene resolved".to_string()))?;

    let mut numbers: Vec<i32> = project_shots
        .iter()
        .filter(|s| s.scene_id == scene_id)
        .map(|s| s.shot_number)
        .collect();

    if numbers.len() != requested.len() {
        return Err(CoreError::Validation(format!(
            "shot_ids must list every shot of the scene (expected {}, got {})",
            numbers.len(),
            requested.len()
        )));
    }

    numbers.sort_unstable();

    Ok(ReorderPlan {
        scene_id,
        assignments: requested.iter().copied().zip(numbers).collect(),
    })
}

/// The next free `shot_number` in a project: one past the current maximum.
///
/// Fails with a conflict once the project already holds [`MAX_ORDER_KEY`].
pub fn next_shot_number(existing: impl IntoIterator<Item = i32>) -> Result<i32, CoreError> {
    match existing.into_iter().max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .filter(|next| *next <= MAX_ORDER_KEY)
            .ok_or_else(|| {
                CoreError::Conflict(format!(
                    "No shot_number left after {max}; renumber the project's shots"
                ))
            }),
    }
}

// ---------------------------------------------------------------------------
// Continuity
// ---------------------------------------------------------------------------

/// The continuity-relevant view of a shot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuityShot {
    pub id: DbId,
    pub scene_id: DbId,
    pub shot_number: i32,
    pub first_frame_url: String,
    pub last_frame_url: String,
}

/// One shot in the project-wide chain with its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContinuityLink {
    pub shot_id: DbId,
    pub shot_number: i32,
    pub scene_id: DbId,
    pub previous_shot_id: Option<DbId>,
    pub next_shot_id: Option<DbId>,
    /// Last frame of the previous shot, if it has one.
    pub previous_last_frame_url: Option<String>,
    /// First frame of the next shot, if it has one.
    pub next_first_frame_url: Option<String>,
    /// The previous shot belongs to a different scene.
    pub enters_from_other_scene: bool,
    /// The next shot belongs to a different scene.
    pub exits_to_other_scene: bool,
}

/// Previous and next shots on the project timeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Neighbours {
    pub previous: Option<ContinuityShot>,
    pub next: Option<ContinuityShot>,
}

fn non_empty(url: &str) -> Option<String> {
    if url.trim().is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

fn sorted_timeline(shots: &[ContinuityShot]) -> Vec<&ContinuityShot> {
    let mut sorted: Vec<&ContinuityShot> = shots.iter().collect();
    sorted.sort_by(|a, b| a.shot_number.cmp(&b.shot_number).then(a.id.cmp(&b.id)));
    sorted
}

/// Build the full continuity chain ordered by `shot_number`.
pub fn continuity_chain(shots: &[ContinuityShot]) -> Vec<ContinuityLink> {
    let sorted = sorted_timeline(shots);

    sorted
        .iter()
        .enumerate()
        .map(|(i, shot)| {
            let prev = i.checked_sub(1).and_then(|p| sorted.get(p)).copied();
            let next = sorted.get(i + 1).copied();
            ContinuityLink {
                shot_id: shot.id,
                shot_number: shot.shot_number,
                scene_id: shot.scene_id,
                previous_shot_id: prev.map(|p| p.id),
                next_shot_id: next.map(|n| n.id),
                previous_last_frame_url: prev.and_then(|p| non_empty(&p.last_frame_url)),
                next_first_frame_url: next.and_then(|n| non_empty(&n.first_frame_url)),
                enters_from_other_scene: prev.is_some_and(|p| p.scene_id != shot.scene_id),
                exits_to_other_scene: next.is_some_and(|n| n.scene_id != shot.scene_id),
            }
        })
        .collect()
}

/// Find the neighbours of `shot_id`. Returns `None` if the shot is absent.
pub fn neighbours(shots: &[ContinuityShot], shot_id: DbId) -> Option<Neighbours> {
    let sorted = sorted_timeline(shots);
    let idx = sorted.iter().position(|s| s.id == shot_id)?;

    Some(Neighbours {
        previous: idx
            .checked_sub(1)
            .and_then(|p| sorted.get(p))
            .map(|s| (*s).clone()),
        next: sorted.get(idx + 1).map(|s| (*s).clone()),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use uuid::Uuid;

    use super::*;

    fn id(n: u128) -> DbId {
        Uuid::from_u128(n)
    }

    fn slot(n: u128, scene: u128, number: i32) -> ShotSlot {
        ShotSlot {
            id: id(n),
            scene_id: id(1000 + scene),
            shot_number: number,
        }
    }

    fn shot(n: u128, scene: u128, number: i32, first: &str, last: &str) -> ContinuityShot {
        ContinuityShot {
            id: id(n),
            scene_id: id(1000 + scene),
            shot_number: number,
            first_frame_url: first.to_string(),
            last_frame_url: last.to_string(),
        }
    }

    // -- plan_reorder --------------------------------------------------------

    #[test]
    fn reorder_reuses_the_scene_numbers_in_requested_order() {
        let shots = [slot(1, 1, 1), slot(2, 1, 2), slot(3, 1, 3), slot(4, 2, 4)];
        let plan = plan_reorder(&shots, &[id(3), id(1), id(2)]).unwrap();

        assert_eq!(plan.scene_id, id(1001));
        assert_eq!(plan.assignments, vec![(id(3), 1), (id(1), 2), (id(2), 3)]);
    }

    #[test]
    fn reorder_keeps_gapped_numbers() {
        let shots = [slot(1, 1, 10), slot(2, 1, 4), slot(3, 2, 7)];
        let plan = plan_reorder(&shots, &[id(1), id(2)]).unwrap();
        assert_eq!(plan.assignments, vec![(id(1), 4), (id(2), 10)]);
    }

    #[test]
    fn reorder_never_touches_other_scenes() {
        let shots = [slot(1, 1, 1), slot(2, 2, 2), slot(3, 1, 3)];
        let plan = plan_reorder(&shots, &[id(3), id(1)]).unwrap();
        assert!(plan.assignments.iter().all(|(sid, _)| *sid != id(2)));
        assert_eq!(plan.assignments, vec![(id(3), 1), (id(1), 3)]);
    }

    #[test]
    fn reorder_rejects_empty_list() {
        assert_matches!(plan_reorder(&[slot(1, 1, 1)], &[]), Err(CoreError::Validation(_)));
    }

    #[test]
    fn reorder_rejects_duplicates() {
        let shots = [slot(1, 1, 1), slot(2, 1, 2)];
        assert_matches!(
            plan_reorder(&shots, &[id(1), id(1)]),
            Err(CoreError::Validation(msg)) if msg.contains("duplicate")
        );
    }

    #[test]
    fn reorder_rejects_unknown_id() {
        let shots = [slot(1, 1, 1)];
        assert_matches!(
            plan_reorder(&shots, &[id(9)]),
            Err(CoreError::NotFound { entity: "Shot", .. })
        );
    }

    #[test]
    fn reorder_rejects_mixed_scenes() {
        let shots = [slot(1, 1, 1), slot(2, 2, 2)];
        assert_matches!(
            plan_reorder(&shots, &[id(1), id(2)]),
            Err(CoreError::Validation(msg)) if msg.contains("same scene")
        );
    }

    #[test]
    fn reorder_rejects_partial_scene() {
        let shots = [slot(1, 1, 1), slot(2, 1, 2), slot(3, 1, 3)];
        assert_matches!(
            plan_reorder(&shots, &[id(2), id(1)]),
            Err(CoreError::Validation(msg)) if msg.contains("expected 3, got 2")
        );
    }

    // -- next_shot_number ----------------------------------------------------

    #[test]
    fn next_shot_number_starts_at_one() {
        assert_eq!(next_shot_number(Vec::new()).unwrap(), 1);
    }

    #[test]
    fn next_shot_number_is_one_past_max() {
        assert_eq!(next_shot_number(vec![3, 9, 4]).unwrap(), 10);
    }

    #[test]
    fn next_shot_number_stops_at_the_cap() {
        assert_eq!(next_shot_number(vec![MAX_ORDER_KEY - 1]).unwrap(), MAX_ORDER_KEY);
        assert_matches!(
            next_shot_number(vec![2, MAX_ORDER_KEY]),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(next_shot_number(vec![i32::MAX]), Err(CoreError::Conflict(_)));
    }

    // -- continuity ----------------------------------------------------------

    #[test]
    fn chain_is_sorted_by_shot_number() {
        let shots = vec![
            shot(3, 2, 3, "", ""),
            shot(1, 1, 1, "", ""),
            shot(2, 1, 2, "", ""),
        ];
        let chain = continuity_chain(&shots);
        let order: Vec<i32> = chain.iter().map(|l| l.shot_number).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(chain[0].previous_shot_id, None);
        assert_eq!(chain[2].next_shot_id, None);
        assert_eq!(chain[1].previous_shot_id, Some(id(1)));
        assert_eq!(chain[1].next_shot_id, Some(id(3)));
    }

    #[test]
    fn chain_flags_scene_boundaries() {
        let shots = vec![
            shot(1, 1, 1, "", ""),
            shot(2, 1, 2, "", ""),
            shot(3, 2, 3, "", ""),
        ];
        let chain = continuity_chain(&shots);
        assert!(!chain[0].exits_to_other_scene);
        assert!(chain[1].exits_to_other_scene);
        assert!(chain[2].enters_from_other_scene);
        assert!(!chain[1].enters_from_other_scene);
    }

    #[test]
    fn chain_carries_frame_urls_and_skips_blanks() {
        let shots = vec![
            shot(1, 1, 1, "", "https://f/1-last.png"),
            shot(2, 1, 2, "https://f/2-first.png", ""),
            shot(3, 1, 3, "  ", ""),
        ];
        let chain = continuity_chain(&shots);
        assert_eq!(
            chain[1].previous_last_frame_url.as_deref(),
            Some("https://f/1-last.png")
        );
        assert_eq!(
            chain[0].next_first_frame_url.as_deref(),
            Some("https://f/2-first.png")
        );
        assert_eq!(chain[1].next_first_frame_url, None);
        assert_eq!(chain[2].previous_last_frame_url, None);
    }

    #[test]
    fn neighbours_cross_scene_boundaries() {
        let shots = vec![
            shot(1, 1, 1, "", ""),
            shot(2, 2, 2, "", ""),
            shot(3, 3, 3, "", ""),
        ];
        let n = neighbours(&shots, id(2)).unwrap();
        assert_eq!(n.previous.unwrap().id, id(1));
        assert_eq!(n.next.unwrap().id, id(3));
    }

    #[test]
    fn neighbours_at_the_ends() {
        let shots = vec![shot(1, 1, 1, "", ""), shot(2, 1, 2, "", "")];
        let first = neighbours(&shots, id(1)).unwrap();
        assert!(first.previous.is_none());
        assert_eq!(first.next.unwrap().id, id(2));

        let last = neighbours(&shots, id(2)).unwrap();
        assert!(last.next.is_none());
    }

    #[test]
    fn neighbours_of_missing_shot_is_none() {
        assert!(neighbours(&[shot(1, 1, 1, "", "")], id(7)).is_none());
    }
}
