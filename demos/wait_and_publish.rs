//! # Wait and Publish Example
//!
//! Waits for a "plugin" to be registered, then announces it on the event bus.
//!
//! Shows:
//! - Subscribing handlers (with and without a bound argument)
//! - `require` on a path that appears after a delay
//! - A second wait that times out and reports through the console
//!
//! ## Run
//! ```bash
//! cargo run --example wait_and_publish
//! ```

use std::sync::Arc;
use std::time::Duration;

use evoke::{
    Config, Console, ConsoleConfig, Environment, EventBus, Handler, HostInfo, Poller,
};
use serde_json::json;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let bus = EventBus::new();
    let announce = Handler::infallible(|args| println!(" ├─► plugin ready: {args:?}"));
    let audit = Handler::infallible(|args| println!(" └─► audit: {args:?}"));
    bus.subscribe("plugin:ready", &announce, None);
    bus.subscribe("plugin:ready", &audit, Some(json!({ "source": "demo" })));

    let cfg = Config {
        timeout: Duration::from_millis(500),
        ..Config::default()
    };
    let console = Console::tracing(cfg.console.clone(), HostInfo::new("localhost", "demo"));
    let env = Arc::new(Environment::new());
    let poller = Poller::new(&cfg, env.clone(), console);

    let publisher = bus.clone();
    let plugin = poller.require(
        vec!["plugins.chart", "plugins.chart.render"],
        move || {
            if let Err(e) = publisher.publish("plugin:ready", &[json!("chart")]) {
                eprintln!("publish failed: {e}");
            }
        },
        None,
    );
    let missing = poller.require("plugins.map", || println!("map ready"), None);

    // Registration happens later, somewhere else in the program.
    let registrar = Arc::clone(&env);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(250)).await;
        registrar.set("plugins.chart", json!({ "version": "1.2.0" }));
        registrar.define_callable("plugins.chart.render");
    });

    println!("Outcomes:");
    println!(" ├─► chart: {}", plugin.outcome().await.as_label());
    println!(" └─► map:   {}", missing.outcome().await.as_label());
    Ok(())
}
