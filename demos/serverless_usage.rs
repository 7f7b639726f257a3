//! Serverless usage: deploy a serverless instance, submit tasks, and poll
//! a job to completion.
//!
//! Run with `cargo run --example serverless_usage`.

use std::time::Duration;

use serde_json::{Map, json};
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

    // Deploy a serverless instance with an autoscaling worker pool.
    let mut conf = Map::new();
    conf.insert(
        "serverless".into(),
        json!({
            "allowedCudaVersions": "12.1",
            "computeType": "GPU",
            "gpuCount": 1,
            "gpuIds": "AMPERE_24",
            "workersMax": 5,
            "workersMin": 0,
        }),
    );
    let spec = CreateInstance::new()
        .with_mode(InstanceMode::Serverless)
        .with_conf(conf);
    let created = client.instances().create(&spec)?;
    let inst_id = created.data["inst_id"]
        .as_str()
        .ok_or("create response carried no inst_id")?
        .to_string();
    println!("Instance deployed, ID: {inst_id}");

    let endpoint = client.serverless(&inst_id);

    // Submit a task; the payload lands under the `input` key.
    let job = endpoint.run(&json!({"image_url": "https://example.com/test.jpg"}))?;
    let job_id = job.data["id"]
        .as_str()
        .ok_or("run response carried no job id")?
        .to_string();
    println!("Task submitted, ID: {job_id}");

    let status = endpoint.status(&job_id)?;
    println!("Task status: {}", status.data["status"]);

    // Poll until the job reaches a terminal state.
    let finished = client.job(&inst_id, &job_id).wait(Some(Duration::from_secs(300)))?;
    println!("Final status: {}", finished.data["status"]);

    // One round trip: submit and wait for the result.
    let result = endpoint.run_sync(&json!({"image_url": "https://example.com/test2.jpg"}))?;
    println!("Task result: {}", result.data);

    let metrics = endpoint.metrics()?;
    println!("Current metrics: {}", metrics.data);

    Ok(())
}
