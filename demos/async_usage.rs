//! Async usage: a session scope, instance creation, and parallel requests
//! sharing one transport.
//!
//! Run with `cargo run --example async_usage`.

use std::time::Duration;

use submodel::api::CreateInstance;
use submodel::{Client, Credentials};
use tracing::Level;
use tracing_subscriber::EnvFilter;

fn labelled(index: usize) -> CreateInstance {
    let mut conf = serde_json::Map::new();
    conf.insert("inst_label".into(), format!("demo-instance-{index}").into());
    CreateInstance::new().with_conf(conf)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let client = Client::new(Credentials::from_env()?);

    // The pooled transport lives while this guard does.
    let session = client.session()?;

    // Create an instance and wait for it to come up.
    let created = session.instances().create(&CreateInstance::new()).await?;
    let inst_id = created.data["inst_id"]
        .as_str()
        .ok_or("create response carried no inst_id")?
        .to_string();
    println!("Instance created, ID: {inst_id}");

    loop {
        let detail = session.instances().detail(&inst_id).await?;
        let status = detail.data["status"].as_str().unwrap_or("unknown").to_string();
        println!("Instance status: {status}");
        match status.as_str() {
            "running" => break,
            "failed" | "error" => return Err(format!("instance startup failed: {status}").into()),
            _ => tokio::time::sleep(Duration::from_secs(5)).await,
        }
    }

    // Several creations in flight at once, all over the same session.
    let instances = session.instances();
    let (req0, req1, req2) = (labelled(0), labelled(1), labelled(2));
    let (first, second, third) = tokio::try_join!(
        instances.create(&req0),
        instances.create(&req1),
        instances.create(&req2),
    )?;
    for envelope in [first, second, third] {
        println!("Created instance {}", envelope.data["inst_id"]);
    }

    drop(session);
    assert!(!client.session_open());

    Ok(())
}
