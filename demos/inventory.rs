//! Loads a small baby-products inventory, races the hash map against the
//! plain list, then dumps the inventory bucket by bucket.
//!
//! Run with `RUST_LOG=debug` to see every insertion as it happens.

use std::fmt;

use chained_store::{benchmark, ChainedHashMap, LinearStore, Record, StoreError};

#[derive(Debug, Clone)]
struct BabyProduct {
    product_id: String,
    name: &'static str,
    category: &'static str,
    price: f64,
    stock_quantity: u32,
    age_range: &'static str,
}

impl BabyProduct {
    fn new(
        product_id: &str,
        name: &'static str,
        category: &'static str,
        price: f64,
        stock_quantity: u32,
        age_range: &'static str,
    ) -> Self {
        Self {
            product_id: product_id.to_owned(),
            name,
            category,
            price,
            stock_quantity,
            age_range,
        }
    }
}

impl Record for BabyProduct {
    type Id = String;

    fn id(&self) -> &String {
        &self.product_id
    }
}

impl fmt::Display for BabyProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Category: {}, Price: ${:.2}, Stock: {}, Age: {}",
            self.product_id,
            self.name,
            self.category,
            self.price,
            self.stock_quantity,
            self.age_range
        )
    }
}

fn catalogue() -> Vec<BabyProduct> {
    vec![
        BabyProduct::new("P001", "Baby Bottle", "Feeding", 12.99, 50, "0-12 months"),
        BabyProduct::new("P002", "Diaper Pack", "Hygiene", 24.99, 100, "0-24 months"),
        BabyProduct::new("P003", "Baby Stroller", "Transport", 199.99, 15, "0-36 months"),
        BabyProduct::new("P004", "Pacifier Set", "Comfort", 8.99, 75, "0-6 months"),
        BabyProduct::new("P005", "Baby Monitor", "Safety", 89.99, 25, "0-36 months"),
        BabyProduct::new("P006", "Onesie 3-Pack", "Clothing", 19.99, 60, "0-12 months"),
        BabyProduct::new("P007", "Baby Wipes", "Hygiene", 6.99, 150, "0-36 months"),
        BabyProduct::new("P008", "Soft Toys", "Toys", 14.99, 40, "3-24 months"),
    ]
}

fn rule() {
    println!("{}", "=".repeat(70));
}

fn main() -> Result<(), StoreError> {
    env_logger::init();

    let mut inventory = ChainedHashMap::with_capacity(10)?;
    let mut shelf = LinearStore::with_capacity(8);

    for product in catalogue() {
        shelf.insert(product.clone());
        inventory.insert(product);
    }

    rule();
    println!("PERFORMANCE COMPARISON: HASH TABLE vs ARRAY");
    rule();

    let comparison = benchmark::compare(&inventory, &shelf, &["P001", "P004", "P008"]);
    println!("{}", comparison);
    if !comparison.agrees() {
        println!("warning: the two stores disagreed on what they found");
    }

    println!();
    rule();
    println!("ALL PRODUCTS IN INVENTORY");
    rule();
    for (index, chain) in inventory.buckets() {
        println!("\nBucket {}:", index);
        for product in chain {
            println!("  -> {}", product);
        }
    }
    rule();

    match inventory.remove("P004") {
        Some(product) => println!("Deleted: {}", product.name),
        None => println!("Product ID P004 not found"),
    }
    match inventory.search("P004") {
        Some(product) => println!("Still here: {}", product),
        None => println!("Product with ID 'P004' not found!"),
    }
    println!(
        "{} products in {} buckets (load factor {:.2})",
        inventory.len(),
        inventory.capacity(),
        inventory.load_factor()
    );

    Ok(())
}
