use primeprobe::{HashTable, TableResult};

fn main() -> TableResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    println!("=== HashTable Demo ===\n");

    let mut table = HashTable::new();
    println!("Hash table starting at a base size of: {}", table.base_size());

    table.insert("name", "Ryan")?;
    table.insert("age", "21")?;
    table.insert("city", "Tempe")?;

    println!("Name: {}", table.search("name").unwrap_or("<missing>"));
    println!("Age: {}", table.search("age").unwrap_or("<missing>"));

    table.delete("age");
    if table.search("age").is_none() {
        println!("Age not found.");
    }

    table.insert("job", "developer")?;
    table.insert("degree", "computer science")?;

    // Enough extra keys to push the load past 70% and grow the table
    let keys = ["key1", "key2", "key3", "key4", "key5", "key6"];
    let values = ["value1", "value2", "value3", "value4", "value5", "value6"];
    table.batch_insert(&keys, &values)?;

    println!("key1: {}", table.search("key1").unwrap_or("<missing>"));
    println!("key6: {}", table.search("key6").unwrap_or("<missing>"));

    println!("\n=== Buckets ===\n");
    print!("{table}");

    println!("\n=== Statistics ===\n");
    println!("{}", table.collision_stats());
    println!("Size of the hash table is {} bytes", table.memory_usage());
    println!("{}", table.stats());

    println!("\n=== Demo Complete ===");
    Ok(())
}
