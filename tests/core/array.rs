use svc::core::array::HandleArray;
use svc::core::error::SvcError;

#[test]
fn appending_k_elements_preserves_order_and_length() {
    let mut arr = HandleArray::allocate(2).expect("allocate");
    let k = 100;
    for i in 0..k {
        arr.append(format!("item-{i}")).expect("append");
        assert_eq!(arr.len(), i + 1);
    }

    assert_eq!(arr.len(), k);
    for i in 0..k {
        assert_eq!(arr[i], format!("item-{i}"));
        assert_eq!(arr.get(i), Some(&format!("item-{i}")));
    }
    assert_eq!(arr.get(k), None);
}

#[test]
fn release_all_visits_each_element_once_in_order() {
    let mut arr = HandleArray::allocate(0).expect("allocate");
    for i in 0..17u32 {
        arr.append(i).expect("append");
    }

    let mut released = Vec::new();
    arr.release_all(|v| released.push(v));
    assert_eq!(released, (0..17).collect::<Vec<_>>());
}

#[test]
fn release_all_on_empty_array_calls_nothing() {
    let arr: HandleArray<String> = HandleArray::allocate(4).expect("allocate");
    let mut calls = 0;
    arr.release_all(|_| calls += 1);
    assert_eq!(calls, 0);
}

#[test]
fn capacity_grows_ahead_of_length() {
    let mut arr = HandleArray::allocate(8).expect("allocate");
    let mut reallocations = 0;
    let mut last_cap = arr.capacity();
    for i in 0..10_000u32 {
        arr.append(i).expect("append");
        assert!(arr.capacity() >= arr.len());
        if arr.capacity() != last_cap {
            reallocations += 1;
            last_cap = arr.capacity();
        }
    }
    // tripling from 8 reaches 10_000 in seven steps
    assert!(reallocations <= 8, "grew {reallocations} times");
    assert!(arr.capacity() < 3 * 10_001, "capacity {}", arr.capacity());
}

#[test]
fn oversized_reservation_fails_without_touching_contents() {
    let mut arr = HandleArray::allocate(3).expect("allocate");
    arr.append("a".to_string()).expect("append");
    arr.append("b".to_string()).expect("append");

    let err = arr.reserve(usize::MAX / 4).unwrap_err();
    assert!(matches!(err, SvcError::OutOfMemory(_)));
    assert_eq!(arr.as_slice(), &["a".to_string(), "b".to_string()]);

    arr.append("c".to_string()).expect("append after failure");
    assert_eq!(arr.len(), 3);
}

#[test]
fn allocation_beyond_address_space_is_out_of_memory() {
    let err = HandleArray::<u64>::allocate(usize::MAX).unwrap_err();
    assert!(matches!(err, SvcError::OutOfMemory(_)));
}
