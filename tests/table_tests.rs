use primeprobe::{is_prime, poly_hash, HashTable, Primality, TableConfig, TableError};
use std::collections::{BTreeSet, HashMap};

fn assert_prime(n: usize) {
    assert_eq!(is_prime(n as i64), Primality::Prime, "{n} is not prime");
}

#[test]
fn test_new_table_shape() {
    let table = HashTable::new();
    assert_eq!(table.base_size(), 10);
    assert_eq!(table.size(), 11);
    assert_prime(table.size());
    assert!(table.is_empty());
    assert_eq!(table.average_collisions(), 0.0);
    assert_eq!(table.iter().count(), 0);
}

#[test]
fn test_basic_insert_search_delete() {
    let mut table = HashTable::new();
    table.insert("name", "Ryan").unwrap();
    table.insert("age", "21").unwrap();
    table.insert("city", "Tempe").unwrap();

    assert_eq!(table.search("age"), Some("21"));
    assert!(table.delete("age"));
    assert_eq!(table.search("age"), None);
    assert_eq!(table.search("name"), Some("Ryan"));
    assert_eq!(table.search("city"), Some("Tempe"));
    assert_eq!(table.len(), 2);
}

#[test]
fn test_growth_keeps_every_key() {
    let mut table = HashTable::new();
    table.insert("name", "Ryan").unwrap();
    table.insert("age", "21").unwrap();
    table.insert("city", "Tempe").unwrap();
    table.delete("age");

    let extra = [
        ("job", "developer"),
        ("degree", "computer science"),
        ("key1", "value1"),
        ("key2", "value2"),
        ("key3", "value3"),
        ("key4", "value4"),
        ("key5", "value5"),
        ("key6", "value6"),
    ];
    for (key, value) in extra {
        table.insert(key, value).unwrap();
    }

    assert!(table.size() > 11, "table never grew");
    assert!(table.base_size() >= 20);
    assert!(table.size() >= table.base_size());
    assert_prime(table.size());
    assert_eq!(table.len(), 10);
    assert_eq!(table.search("name"), Some("Ryan"));
    assert_eq!(table.search("city"), Some("Tempe"));
    for (key, value) in extra {
        assert_eq!(table.search(key), Some(value), "lost {key}");
    }
}

#[test]
fn test_duplicate_insert_updates() {
    let mut table = HashTable::new();
    assert_eq!(table.insert("lang", "C").unwrap(), None);
    assert_eq!(table.insert("lang", "Rust").unwrap(), Some("C".to_string()));
    assert_eq!(table.len(), 1);
    assert_eq!(table.search("lang"), Some("Rust"));
}

#[test]
fn test_delete_absent_key() {
    let mut table = HashTable::new();
    table.insert("present", "yes").unwrap();
    assert!(!table.delete("absent"));
    assert_eq!(table.len(), 1);

    assert!(table.delete("present"));
    assert!(!table.delete("present"));
    assert_eq!(table.len(), 0);
}

#[test]
fn test_size_prime_through_many_resizes() {
    let mut table = HashTable::new();
    let mut sizes = BTreeSet::new();
    for i in 0..2_000 {
        table.insert(&format!("user:{i}"), &i.to_string()).unwrap();
        sizes.insert(table.size());
    }
    assert!(sizes.len() > 5);
    for &size in &sizes {
        assert_prime(size);
    }
    for i in 0..2_000 {
        assert_eq!(table.search(&format!("user:{i}")), Some(i.to_string().as_str()));
    }
}

#[test]
fn test_shrink_after_mass_delete() {
    let mut table = HashTable::new();
    for i in 0..500 {
        table.insert(&format!("k{i}"), "v").unwrap();
    }
    let grown = table.size();
    for i in 0..495 {
        assert!(table.delete(&format!("k{i}")));
    }
    assert!(table.size() < grown, "table never shrank");
    assert!(table.base_size() >= 10);
    assert_prime(table.size());
    for i in 495..500 {
        assert_eq!(table.search(&format!("k{i}")), Some("v"));
    }
    assert_eq!(table.len(), 5);
}

#[test]
fn test_iterate_matches_inserted_pairs() {
    let mut table = HashTable::new();
    let mut expected = BTreeSet::new();
    for i in 0..100 {
        let key = format!("key-{i}");
        let value = format!("value-{}", i * 7);
        table.insert(&key, &value).unwrap();
        expected.insert((key, value));
    }

    let collected: BTreeSet<(String, String)> = table
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    assert_eq!(collected, expected);

    // restartable and in bucket order
    let first: Vec<_> = table.iter().collect();
    let second: Vec<_> = (&table).into_iter().collect();
    assert_eq!(first, second);
    let indices: Vec<usize> = table.iter_slots().map(|(i, _, _)| i).collect();
    assert!(indices.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(table.iter().len(), 100);
    assert_eq!(table.keys().count(), 100);
    assert_eq!(table.values().filter(|v| v.starts_with("value-")).count(), 100);
}

#[test]
fn test_batch_insert() {
    let mut table = HashTable::new();
    let keys = ["a", "b", "c", "a"];
    let values = ["1", "2", "3", "4"];
    table.batch_insert(&keys, &values).unwrap();
    assert_eq!(table.len(), 3);
    assert_eq!(table.search("a"), Some("4"));

    let err = table.batch_insert(&["x", "y"], &["1"]).unwrap_err();
    assert!(matches!(
        err,
        TableError::BatchLengthMismatch { keys: 2, values: 1 }
    ));
    assert!(!table.contains_key("x"));
}

/// Distinct keys with the same start slot and step in an 11-bucket table.
fn colliding_keys(n: usize) -> Vec<String> {
    let signature = |k: &str| (poly_hash(k, 151, 11), poly_hash(k, 163, 11));
    let target = signature("item0");
    (0..)
        .map(|i| format!("item{i}"))
        .filter(|k| signature(k.as_str()) == target)
        .take(n)
        .collect()
}

#[test]
fn test_average_collisions_positive_after_collision() {
    let mut table = HashTable::new();
    assert_eq!(table.average_collisions(), 0.0);

    // the n-th key follows the same sequence as the ones before it: n collisions
    for key in colliding_keys(4) {
        table.insert(&key, "x").unwrap();
    }
    assert_eq!(table.size(), 11);
    assert_eq!(table.total_collisions(), 6);
    assert_eq!(table.max_collisions_insertion(), 3);
    assert!((table.average_collisions() - 1.5).abs() < 1e-12);

    let stats = table.collision_stats();
    assert_eq!(stats.count, 4);
    assert_eq!(stats.total_collisions, 6);
}

#[test]
fn test_memory_usage_tracks_entries() {
    let mut table = HashTable::new();
    let empty = table.memory_usage();
    assert!(empty > 0);

    table.insert("abc", "defgh").unwrap();
    let one = table.memory_usage();
    assert_eq!(
        one - empty,
        std::mem::size_of::<primeprobe::Entry>() + 4 + 6
    );

    table.delete("abc");
    assert_eq!(table.memory_usage(), empty);
}

#[test]
fn test_empty_and_unicode_keys() {
    let mut table = HashTable::new();
    table.insert("", "empty").unwrap();
    table.insert("ключ", "значение").unwrap();
    table.insert("🦀", "crab").unwrap();
    assert_eq!(table.search(""), Some("empty"));
    assert_eq!(table.search("ключ"), Some("значение"));
    assert_eq!(table.search("🦀"), Some("crab"));
}

#[test]
fn test_custom_config() {
    let config = TableConfig {
        initial_base_size: 50,
        grow_load_percent: 50,
        ..TableConfig::default()
    };
    let mut table = HashTable::with_config(config).unwrap();
    assert_eq!(table.size(), 53);
    for i in 0..27 {
        table.insert(&format!("c{i}"), "v").unwrap();
    }
    assert_eq!(table.size(), 53);
    // c27 still sees 27 of 53 (50%); c28 sees 28 of 53 (52%) and grows
    table.insert("c27", "v").unwrap();
    table.insert("c28", "v").unwrap();
    assert_eq!(table.base_size(), 100);
    assert_eq!(table.size(), 101);
}

#[test]
fn test_base_one_config_keeps_growing() {
    let config = TableConfig {
        initial_base_size: 1,
        ..TableConfig::default()
    };
    let mut table = HashTable::with_config(config).unwrap();
    assert_eq!(table.size(), 2);
    for i in 0..20 {
        table.insert(&format!("k{i}"), &i.to_string()).unwrap();
        assert_prime(table.size());
        assert!(table.len() <= table.size());
    }
    assert_eq!(table.len(), 20);
    for i in 0..20 {
        assert_eq!(table.search(&format!("k{i}")), Some(i.to_string().as_str()));
    }
}

#[test]
fn test_invalid_config_rejected() {
    let config = TableConfig {
        shrink_load_percent: 90,
        ..TableConfig::default()
    };
    let err = HashTable::with_config(config).unwrap_err();
    assert!(matches!(err, TableError::Config(_)));
}

#[test]
fn test_stats_and_display() {
    let mut table = HashTable::new();
    table.insert("name", "Ryan").unwrap();
    assert!(table.stats().starts_with("HashTable: count 1 size 11 base 10"));
    assert!(table.to_string().contains("name : Ryan"));
    assert!(table
        .collision_stats()
        .to_string()
        .contains("Table holds 1 keys with a size of 11"));
}

#[test]
fn test_churn_against_std_hashmap() {
    let mut table = HashTable::new();
    let mut model = HashMap::new();
    for round in 0..5_000u32 {
        let key = format!("k{}", round.wrapping_mul(2654435761) % 300);
        if round % 3 == 0 {
            assert_eq!(table.delete(&key), model.remove(&key).is_some());
        } else {
            let value = round.to_string();
            let old = table.insert(&key, &value).unwrap();
            assert_eq!(old, model.insert(key, value));
        }
    }
    assert_eq!(table.len(), model.len());
    assert_eq!(table.slot_stats().occupied, model.len());
    for (key, value) in &model {
        assert_eq!(table.search(key), Some(value.as_str()));
    }
}
