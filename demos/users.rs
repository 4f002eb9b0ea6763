//! Sample program: store a handful of users, list them back, then clean up.
//!
//! ```sh
//! RUST_LOG=docstore=debug cargo run --example users -- ./demo-db
//! ```

use std::sync::Arc;

use docstore::{LogLevel, Options, Store, StoreError, TracingLogger};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize, Deserialize)]
struct Address {
    city: String,
    state: String,
    country: String,
    pincode: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct User {
    name: String,
    age: u32,
    contact: String,
    company: String,
    address: Address,
}

fn user(name: &str, age: u32, contact: &str, company: &str, city: &str, state: &str) -> User {
    User {
        name: name.into(),
        age,
        contact: contact.into(),
        company: company.into(),
        address: Address {
            city: city.into(),
            state: state.into(),
            country: "India".into(),
            pincode: "823478".into(),
        },
    }
}

fn main() -> Result<(), StoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .init();

    let root = std::env::args().nth(1).unwrap_or_else(|| "./demo-db".to_string());
    let options = Options::default().with_logger(Arc::new(TracingLogger::new(LogLevel::Debug)));
    let store = Store::open(&root, options)?;

    let employees = [
        user("Rocky", 23, "9238478234", "Zomato", "Bangalore", "Karnataka"),
        user("Chitti", 25, "900078234", "Swiggy", "Chennai", "Tamilnadu"),
        user("Ajay", 32, "9238999994", "Byjus", "Mumbai", "Maharashtra"),
        user("Bunny", 34, "7778478234", "Razorpay", "Delhi", "Newdelhi"),
        user("Arya", 43, "9238474444", "Dukaan", "Kolkata", "Westbengal"),
        user("Shyam", 27, "9000000004", "Flipkart", "Lucknow", "Utterpradesh"),
    ];

    for employee in &employees {
        store.write("users", &employee.name, employee)?;
    }

    let records = store.read_all("users")?;
    println!("{} raw records", records.len());

    let all_users: Vec<User> = store.read_all_as("users")?;
    for u in &all_users {
        println!("{} ({}) works at {}, {}", u.name, u.age, u.company, u.address.city);
    }

    let rocky: User = store.read("users", "Rocky")?;
    println!("read back: {rocky:?}");

    store.delete("users", "Rocky")?;
    store.delete_collection("users")?;
    Ok(())
}
