//! Recurring chore definitions and their eager materialization.
//!
//! A batch of specs is validated as a whole before anything persists; the
//! instances for each accepted spec are derived deterministically from the
//! submission time, so identical inputs at a fixed `now` always yield the
//! same due times.

use crate::error::ChoresError;
use chrono::{DateTime, Duration, Utc};
use rhub_domain::constants::CHORE_HORIZON_DAYS;
use rhub_domain::entity::{ChoreInstance, ChoreTemplate, FrequencyUnit, Room};
use rhub_kernel::safe_nanoid;
use rhub_store::{CoreState, Store};
use tracing::info;

/// One requested chore definition.
#[derive(Debug, Clone)]
pub struct ChoreSpec {
    pub name: String,
    pub frequency: u32,
    pub unit: FrequencyUnit,
    pub deadline: DateTime<Utc>,
}

/// Defines chores per room and materializes their due instances.
#[derive(Debug, Clone)]
pub struct ChoreScheduler {
    store: Store,
}

impl ChoreScheduler {
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Validates and persists a batch of chore specs, materializing every
    /// instance up to each spec's deadline. All-or-nothing: one bad spec
    /// rejects the whole batch with nothing persisted.
    ///
    /// # Errors
    /// `Validation` when any spec is malformed or its deadline falls outside
    /// `(now, now + 365d]`; `NotFound`/`Forbidden` for unknown rooms or
    /// non-members.
    pub fn define_batch(
        &self,
        room_id: &str,
        actor_id: &str,
        specs: &[ChoreSpec],
        now: DateTime<Utc>,
    ) -> Result<Vec<ChoreInstance>, ChoresError> {
        if specs.is_empty() {
            return Err(ChoresError::Validation { message: "empty chore batch".into() });
        }
        for spec in specs {
            validate_spec(spec, now)?;
        }

        self.store.write(|state| {
            member_gate(state, room_id, actor_id)?;

            let mut created = Vec::new();
            for spec in specs {
                let template = ChoreTemplate {
                    id: safe_nanoid!(),
                    room_id: room_id.to_owned(),
                    chore_name: spec.name.trim().to_owned(),
                    frequency: spec.frequency,
                    frequency_unit: spec.unit,
                    deadline: spec.deadline,
                };

                for due_at in due_times(now, spec.deadline, spec.unit) {
                    for _ in 0..spec.frequency {
                        let instance = ChoreInstance {
                            id: safe_nanoid!(),
                            room_id: room_id.to_owned(),
                            chore_name: template.chore_name.clone(),
                            due_at,
                        };
                        state.insert_instance(instance.clone());
                        created.push(instance);
                    }
                }
                state.insert_template(template);
            }

            created.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.id.cmp(&b.id)));
            info!(room = room_id, specs = specs.len(), instances = created.len(), "Chore batch defined");
            Ok(created)
        })
    }

    /// Removes every instance of a chore name in the room, past and future,
    /// along with its templates. Returns how many instances went.
    ///
    /// # Errors
    /// `NotFound`/`Forbidden` for unknown rooms or non-members.
    pub fn remove_by_type(
        &self,
        room_id: &str,
        actor_id: &str,
        chore_name: &str,
    ) -> Result<usize, ChoresError> {
        self.store.write(|state| {
            member_gate(state, room_id, actor_id)?;

            state.remove_templates(room_id, chore_name);
            let removed =
                state.remove_instances(|i| i.room_id == room_id && i.chore_name == chore_name);
            info!(room = room_id, chore = chore_name, removed, "Chore type removed");
            Ok(removed)
        })
    }

    /// Instances of a room, ordered by due time.
    ///
    /// # Errors
    /// `NotFound`/`Forbidden` for unknown rooms or non-members.
    pub fn list_by_room(
        &self,
        room_id: &str,
        actor_id: &str,
    ) -> Result<Vec<ChoreInstance>, ChoresError> {
        self.store.read(|state| {
            member_gate(state, room_id, actor_id)?;
            let mut instances: Vec<_> = state.instances_by_room(room_id).cloned().collect();
            instances.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.id.cmp(&b.id)));
            Ok(instances)
        })
    }

    /// Instances across every room the user actively belongs to.
    #[must_use]
    pub fn list_for_user(&self, user_id: &str) -> Vec<ChoreInstance> {
        self.store.read(|state| {
            let room_ids: Vec<String> =
                state.rooms_of_user(user_id).map(|r| r.id.clone()).collect();
            let mut instances: Vec<_> = state
                .instances()
                .filter(|i| room_ids.iter().any(|id| *id == i.room_id))
                .cloned()
                .collect();
            instances.sort_by(|a, b| a.due_at.cmp(&b.due_at).then_with(|| a.id.cmp(&b.id)));
            instances
        })
    }
}

fn member_gate<'a>(
    state: &'a CoreState,
    room_id: &str,
    actor_id: &str,
) -> Result<&'a Room, ChoresError> {
    let room = state
        .room(room_id)
        .filter(|r| r.is_active())
        .ok_or(ChoresError::NotFound { message: "no such room".into() })?;
    if room.membership_of(actor_id).is_none() {
        return Err(ChoresError::Forbidden { message: "not an active member of this room".into() });
    }
    Ok(room)
}

fn validate_spec(spec: &ChoreSpec, now: DateTime<Utc>) -> Result<(), ChoresError> {
    let name = spec.name.trim();
    if name.is_empty() {
        return Err(ChoresError::Validation { message: "chore name must not be empty".into() });
    }
    if spec.frequency < 1 {
        return Err(ChoresError::Validation {
            message: format!("chore '{name}': frequency must be at least 1").into(),
        });
    }
    if spec.deadline <= now {
        return Err(ChoresError::Validation {
            message: format!("chore '{name}': deadline must lie in the future").into(),
        });
    }
    if spec.deadline > now + Duration::days(CHORE_HORIZON_DAYS) {
        return Err(ChoresError::Validation {
            message: format!(
                "chore '{name}': deadline must fall within {CHORE_HORIZON_DAYS} days"
            )
            .into(),
        });
    }
    Ok(())
}

/// Period boundaries from `now` to `deadline` at the unit's cadence.
///
/// Boundaries sit at `now + k * period` for `k >= 1` while they stay at or
/// before the deadline; a deadline nearer than one period yields a single
/// boundary at the deadline itself.
fn due_times(now: DateTime<Utc>, deadline: DateTime<Utc>, unit: FrequencyUnit) -> Vec<DateTime<Utc>> {
    let period = Duration::days(unit.period_days());
    let mut times = Vec::new();
    let mut due = now + period;
    while due <= deadline {
        times.push(due);
        due += period;
    }
    if times.is_empty() {
        times.push(deadline);
    }
    times
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(s: &str) -> DateTime<Utc> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap().and_utc()
    }

    #[test]
    fn weekly_boundaries_stop_at_the_deadline() {
        let now = at("2026-01-01 12:00:00");
        let times = due_times(now, at("2026-01-22 12:00:00"), FrequencyUnit::Weekly);
        assert_eq!(times, vec![
            at("2026-01-08 12:00:00"),
            at("2026-01-15 12:00:00"),
            at("2026-01-22 12:00:00"),
        ]);
    }

    #[test]
    fn a_near_deadline_yields_one_boundary_at_the_deadline() {
        let now = at("2026-01-01 12:00:00");
        let deadline = at("2026-01-03 12:00:00");
        assert_eq!(due_times(now, deadline, FrequencyUnit::Monthly), vec![deadline]);
    }

    #[test]
    fn materialization_is_deterministic_for_a_fixed_now() {
        let now = at("2026-03-01 00:00:00");
        let deadline = at("2026-05-30 00:00:00");
        let first = due_times(now, deadline, FrequencyUnit::Biweekly);
        let second = due_times(now, deadline, FrequencyUnit::Biweekly);
        assert_eq!(first, second);
        assert_eq!(first.len(), 6);
    }
}
