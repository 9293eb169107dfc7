//! Execution-order resolution for a round's committed actions.

use std::cmp::Ordering;

use crate::action::ActionRecord;

/// Sorts records into execution order.
///
/// Higher declared priority goes first; within equal priority, higher speed
/// goes first. Records without a rolled speed sort as if their speed were
/// `i32::MIN`. The sort is stable, so records equal on both keys keep their
/// commitment order. No randomness is involved: the speed roll is the only
/// source of nondeterminism in the final order.
pub fn resolve_turn_order(mut records: Vec<ActionRecord>) -> Vec<ActionRecord> {
    records.sort_by(execution_order);
    records
}

/// Comparator behind [`resolve_turn_order`]: `Less` means "runs earlier".
pub fn execution_order(a: &ActionRecord, b: &ActionRecord) -> Ordering {
    b.priority()
        .cmp(&a.priority())
        .then_with(|| effective_speed(b).cmp(&effective_speed(a)))
}

fn effective_speed(record: &ActionRecord) -> i32 {
    record.speed.unwrap_or(i32::MIN)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::action::{ActionDefinition, TargetType};
    use crate::state::CombatantId;

    fn record(caster: u32, priority: i32, speed: Option<i32>) -> ActionRecord {
        let action = ActionDefinition::new(format!("act{caster}"), TargetType::None)
            .with_priority(priority);
        let record = ActionRecord::new(CombatantId(caster), Arc::new(action));
        match speed {
            Some(speed) => record.with_speed(speed),
            None => record,
        }
    }

    fn casters(records: &[ActionRecord]) -> Vec<u32> {
        records.iter().map(|record| record.caster.0).collect()
    }

    #[test]
    fn equal_priority_orders_by_speed() {
        let resolved = resolve_turn_order(vec![record(0, 5, Some(12)), record(1, 5, Some(18))]);
        assert_eq!(casters(&resolved), vec![1, 0]);
    }

    #[test]
    fn priority_dominates_speed() {
        let resolved = resolve_turn_order(vec![
            record(0, 0, Some(25)),
            record(1, 3, Some(2)),
            record(2, 1, Some(10)),
        ]);
        assert_eq!(casters(&resolved), vec![1, 2, 0]);
    }

    #[test]
    fn full_ties_keep_commitment_order() {
        let input = vec![
            record(3, 2, Some(7)),
            record(1, 2, Some(7)),
            record(2, 2, Some(7)),
        ];
        let first = resolve_turn_order(input.clone());
        let second = resolve_turn_order(input);
        assert_eq!(casters(&first), vec![3, 1, 2]);
        assert_eq!(first, second);
    }

    #[test]
    fn unrolled_speed_sorts_last_within_priority() {
        let resolved = resolve_turn_order(vec![record(0, 1, None), record(1, 1, Some(-4))]);
        assert_eq!(casters(&resolved), vec![1, 0]);
    }
}
