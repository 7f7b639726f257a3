//! Basic blocking usage: create an instance, read it back, list instances.
//!
//! Credentials come from `SUBMODEL_TOKEN` / `SUBMODEL_API_KEY`. Run with
//! `cargo run --example basic_usage`.

use submodel::Credentials;
use submodel::api::{CreateInstance, InstanceMode};
use submodel::blocking::Client;
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let client = Client::new(Credentials::from_env()?)?;

    // Create a pay-as-you-go pod with the service defaults.
    let created = client.instances().create(&CreateInstance::new())?;
    let inst_id = created.data["inst_id"]
        .as_str()
        .ok_or("create response carried no inst_id")?
        .to_string();
    println!("Instance created, ID: {inst_id}");

    let detail = client.instances().detail(&inst_id)?;
    println!("Instance status: {}", detail.data["status"]);

    let instances = client.instances().list(1, 10, InstanceMode::Pod)?;
    println!("Instances: {}", instances.data);

    Ok(())
}
