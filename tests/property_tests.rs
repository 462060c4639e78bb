//! Property-based tests using proptest
//!
//! These tests generate random sequences of operations, apply them to a
//! ToggleHeap and to a plain Vec model, and verify that heap order, sizes and
//! tops always agree.

use proptest::prelude::*;
use rust_toggle_heap::expandable::ExpandableArray;
use rust_toggle_heap::{Entry, HeapConfig, HeapMode, RemovePolicy, ToggleHeap};

#[derive(Debug, Clone)]
enum Op {
    Insert(i32, u8),
    RemoveTop,
    /// Remove the stored entry at this position of the model, modulo its length
    Remove(usize),
    /// Remove an entry that is never stored
    RemoveMissing(i32),
    ReplaceKey(usize, i32),
    ReplaceValue(usize, u8),
    Toggle,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (-50i32..50, any::<u8>()).prop_map(|(k, v)| Op::Insert(k, v)),
        2 => Just(Op::RemoveTop),
        2 => any::<usize>().prop_map(Op::Remove),
        1 => (-50i32..50).prop_map(Op::RemoveMissing),
        2 => (any::<usize>(), -50i32..50).prop_map(|(i, k)| Op::ReplaceKey(i, k)),
        1 => (any::<usize>(), any::<u8>()).prop_map(|(i, v)| Op::ReplaceValue(i, v)),
        1 => Just(Op::Toggle),
    ]
}

fn expected_top(model: &[Entry<i32, u16>], mode: HeapMode) -> Option<i32> {
    let keys = model.iter().map(|entry| *entry.key());
    match mode {
        HeapMode::Min => keys.min(),
        HeapMode::Max => keys.max(),
    }
}

/// Value used for entries that must never match a stored one
const MISSING_VALUE: u16 = 1000;

/// Picks a stored entry by position in the model
fn template(model: &[Entry<i32, u16>], i: usize) -> Entry<i32, u16> {
    model[i % model.len()].clone()
}

/// Applies `op` to both the heap and the model; returns true if it was a remove
fn apply(heap: &mut ToggleHeap<i32, u16>, model: &mut Vec<Entry<i32, u16>>, op: &Op) -> bool {
    match *op {
        Op::Insert(key, value) => {
            let stored = heap.insert(key, u16::from(value)).clone();
            assert_eq!(stored, Entry::new(key, u16::from(value)));
            model.push(stored);
            false
        }
        Op::RemoveTop => {
            if let Some(top) = heap.remove_top() {
                let pos = model.iter().position(|e| *e == top).expect("popped entry in model");
                model.remove(pos);
            } else {
                assert!(model.is_empty());
            }
            false
        }
        Op::Remove(i) => {
            if model.is_empty() {
                return false;
            }
            let target = template(model, i);
            assert_eq!(heap.remove(&target), Some(target.clone()));
            let pos = model.iter().position(|e| *e == target).expect("target in model");
            model.remove(pos);
            true
        }
        Op::RemoveMissing(key) => {
            assert_eq!(heap.remove(&Entry::new(key, MISSING_VALUE)), None);
            false
        }
        Op::ReplaceKey(i, new_key) => {
            if model.is_empty() {
                assert_eq!(heap.replace_key(&Entry::new(new_key, MISSING_VALUE), new_key), None);
                return false;
            }
            let target = template(model, i);
            assert_eq!(heap.replace_key(&target, new_key), Some(*target.key()));
            let pos = model.iter().position(|e| *e == target).expect("target in model");
            model[pos] = Entry::new(new_key, *target.value());
            false
        }
        Op::ReplaceValue(i, new_value) => {
            if model.is_empty() {
                return false;
            }
            let target = template(model, i);
            let new_value = u16::from(new_value);
            assert_eq!(heap.replace_value(&target, new_value), Some(*target.value()));
            let pos = model.iter().position(|e| *e == target).expect("target in model");
            model[pos] = Entry::new(*target.key(), new_value);
            false
        }
        Op::Toggle => {
            heap.toggle();
            false
        }
    }
}

fn multiset(entries: impl Iterator<Item = Entry<i32, u16>>) -> Vec<(i32, u16)> {
    let mut parts: Vec<_> = entries.map(Entry::into_parts).collect();
    parts.sort();
    parts
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// With order restoration on remove, every operation keeps heap order
    #[test]
    fn prop_restore_policy_keeps_order(ops in prop::collection::vec(op_strategy(), 0..120)) {
        let mut heap = ToggleHeap::with_config(
            HeapConfig::default().with_remove_policy(RemovePolicy::Restore),
        );
        let mut model: Vec<Entry<i32, u16>> = Vec::new();

        for op in &ops {
            apply(&mut heap, &mut model, op);
            prop_assert!(heap.check_invariants().is_ok(), "after {:?}: {}", op, heap);
            prop_assert_eq!(heap.len(), model.len());
            prop_assert_eq!(heap.top().map(|e| *e.key()), expected_top(&model, heap.state()));
        }
        prop_assert_eq!(multiset(heap.iter().cloned()), multiset(model.into_iter()));
    }

    /// With sift-down-only removal, order can only break after a remove
    #[test]
    fn prop_sift_down_policy_breaks_only_on_remove(ops in prop::collection::vec(op_strategy(), 0..120)) {
        let mut heap = ToggleHeap::new();
        let mut model: Vec<Entry<i32, u16>> = Vec::new();
        let mut removed_any = false;

        for op in &ops {
            removed_any |= apply(&mut heap, &mut model, op);
            if !removed_any {
                prop_assert!(heap.check_invariants().is_ok(), "after {:?}: {}", op, heap);
                prop_assert_eq!(heap.top().map(|e| *e.key()), expected_top(&model, heap.state()));
            }
            prop_assert_eq!(heap.len(), model.len());
        }
        prop_assert_eq!(multiset(heap.iter().cloned()), multiset(model.into_iter()));
    }

    /// Draining yields ascending keys in min mode and descending keys in max mode
    #[test]
    fn prop_drain_is_sorted(keys in prop::collection::vec(-1000i32..1000, 0..200), max in any::<bool>()) {
        let mode = if max { HeapMode::Max } else { HeapMode::Min };
        let mut heap = ToggleHeap::with_mode(mode);
        for (i, key) in keys.iter().enumerate() {
            heap.insert(*key, i);
        }

        let drained: Vec<i32> = std::iter::from_fn(|| heap.remove_top()).map(|e| *e.key()).collect();
        let mut expected = keys.clone();
        expected.sort();
        if max {
            expected.reverse();
        }
        prop_assert_eq!(drained, expected);
    }

    /// Toggling twice restores the mode and leaves a valid heap
    #[test]
    fn prop_double_toggle(keys in prop::collection::vec(any::<i32>(), 0..100)) {
        let mut heap: ToggleHeap<i32, ()> = keys.iter().map(|k| (*k, ())).collect();
        heap.toggle();
        prop_assert_eq!(heap.state(), HeapMode::Max);
        prop_assert!(heap.check_invariants().is_ok());
        heap.toggle();
        prop_assert_eq!(heap.state(), HeapMode::Min);
        prop_assert!(heap.check_invariants().is_ok());
        prop_assert_eq!(heap.top().map(|e| *e.key()), keys.iter().copied().min());
    }

    /// ExpandableArray behaves like a Vec for add/set/remove
    #[test]
    fn prop_array_matches_vec(
        ops in prop::collection::vec((0u8..3, any::<usize>(), any::<i64>()), 0..200),
        capacity in 0usize..16,
    ) {
        let mut array = ExpandableArray::with_capacity(capacity);
        let mut model: Vec<i64> = Vec::new();

        for (kind, index, value) in ops {
            match kind {
                0 => {
                    array.add(value);
                    model.push(value);
                }
                1 if !model.is_empty() => {
                    let i = index % model.len();
                    prop_assert_eq!(array.set(i, value), Ok(model[i]));
                    model[i] = value;
                }
                2 if !model.is_empty() => {
                    let i = index % model.len();
                    prop_assert_eq!(array.remove(i), Ok(model.remove(i)));
                }
                _ => {
                    prop_assert!(array.get(model.len()).is_err());
                }
            }
            prop_assert_eq!(array.len(), model.len());
            prop_assert!(array.capacity() >= array.len());
            prop_assert!(array.check_invariants().is_ok());
        }
        prop_assert_eq!(array.iter().copied().collect::<Vec<_>>(), model);
    }
}
