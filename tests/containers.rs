use posgraph::{
    FnComparator, HeapAdaptablePriorityQueue, HeapPriorityQueue, PositionalList, prelude::*,
};

#[test]
fn test_hash_map_through_public_api() {
    let mut map: ProbeHashMap<String, usize> = ["alpha", "beta", "gamma"]
        .into_iter()
        .map(|s| (s.to_string(), s.len()))
        .collect();
    assert_eq!(map.get("beta"), Some(&4));
    assert_eq!(map.put("beta".to_string(), 0), Some(4));
    assert_eq!(map.remove("alpha"), Some(5));
    assert_eq!(map.get("gamma"), Some(&5));
    let mut keys: Vec<_> = map.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["beta", "gamma"]);
}

#[test]
fn test_queue_orders_by_custom_comparator() {
    // Longest word first.
    let mut queue = HeapPriorityQueue::with_comparator(FnComparator(|a: &&str, b: &&str| {
        b.len().cmp(&a.len())
    }));
    for word in ["fig", "banana", "kiwi"] {
        queue.insert(word, ()).unwrap();
    }
    let order: Vec<_> = std::iter::from_fn(|| queue.remove_min())
        .map(|e| *e.key())
        .collect();
    assert_eq!(order, vec!["banana", "kiwi", "fig"]);
}

#[test]
fn test_adaptable_queue_as_task_scheduler() {
    let mut queue = HeapAdaptablePriorityQueue::<u32, &str>::new();
    let build = queue.insert(3, "build").unwrap();
    let test = queue.insert(5, "test").unwrap();
    queue.insert(4, "lint").unwrap();
    queue.replace_key(test, 1).unwrap();
    queue.remove(build).unwrap();
    let order: Vec<_> = std::iter::from_fn(|| queue.remove_min())
        .map(|e| *e.value())
        .collect();
    assert_eq!(order, vec!["test", "lint"]);
    assert_eq!(
        queue.get(test).err(),
        Some(GraphError::InvalidHandle(HandleKind::Entry))
    );
}

#[test]
fn test_positional_list_edits() {
    let mut list: PositionalList<char> = "ace".chars().collect();
    let c = list.positions().nth(1).unwrap();
    list.add_before(c, 'b').unwrap();
    list.add_after(c, 'd').unwrap();
    assert_eq!(list.set(c, 'C'), Ok('c'));
    assert_eq!(list.iter().collect::<String>(), "abCde");
    assert_eq!(list.remove(c), Ok('C'));
    assert!(list.get(c).is_err());
    assert_eq!(list.len(), 4);
}
