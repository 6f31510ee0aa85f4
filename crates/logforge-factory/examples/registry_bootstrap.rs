//! Bootstrap a logger from registry-published configuration.
//!
//! Run with: cargo run --example registry_bootstrap

use std::sync::Arc;

use logforge_core::{Handler, Level, MemoryHandler};
use logforge_factory::{
    create_logger, map_from_json, ConfigValue, InMemoryRegistry, RegistryEntry,
};
use serde_json::json;

fn main() {
    let sink = Arc::new(MemoryHandler::new(Level::Debug));

    let mut registry = InMemoryRegistry::new();
    registry.insert(
        "config",
        RegistryEntry::Config(ConfigValue::Map(map_from_json(json!({
            "logger": {
                "app": {
                    "handlers": [
                        "SharedSink",
                        {
                            "name": "memory",
                            "options": {
                                "level": "warning",
                                "formatter": {"name": "json"},
                                "processors": [{"name": "uid", "params": {"length": 6}}]
                            }
                        }
                    ],
                    "processors": [{"name": "placeholder"}]
                }
            }
        })))),
    );
    registry.insert(
        "SharedSink",
        RegistryEntry::Handler(sink.clone() as Arc<dyn Handler>),
    );

    let logger = create_logger(&registry, "app").expect("valid configuration");

    let mut context = serde_json::Map::new();
    context.insert("user".to_string(), json!("alice"));
    logger.log(Level::Warning, "{user} exceeded the rate limit", context);
    logger.info("routine heartbeat");

    for line in sink.formatted() {
        print!("{line}");
    }
}
