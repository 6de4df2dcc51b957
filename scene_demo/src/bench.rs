//! Creation strategy timings
//!
//! Times direct construction against each way the keyed factory and the
//! activator can produce a node.

use std::sync::Arc;
use std::time::{Duration, Instant};

use scene_core::prelude::*;

use crate::DemoError;

/// Iterations used when none are given on the command line
pub const DEFAULT_ITERATIONS: u32 = 100_000;

struct Timing {
    label: &'static str,
    total: Duration,
}

fn time<F>(label: &'static str, iterations: u32, mut create: F) -> Result<Timing, DemoError>
where
    F: FnMut() -> Result<Arc<Node>, DemoError>,
{
    let start = Instant::now();
    for _ in 0..iterations {
        drop(create()?);
    }
    Ok(Timing {
        label,
        total: start.elapsed(),
    })
}

/// Run every strategy `iterations` times and log the results
pub fn run(iterations: u32) -> Result<(), DemoError> {
    let activator = Arc::new(NodeActivator::new());
    let factory: Factory<String, Arc<Node>> = Factory::new(Arc::clone(&activator));

    let closure_key = "closure".to_string();
    let type_key = "type".to_string();
    let args_key = "type-with-args".to_string();
    factory.register_fn(closure_key.clone(), || Node::new("Node"))?;
    factory.register::<PlainNode>(type_key.clone())?;
    factory.register_with_args::<PlainNode, _>(args_key.clone(), || args![String::from("Named")])?;

    let timings = [
        time("direct Node::new", iterations, || Ok(Node::new("Node")))?,
        time("factory closure", iterations, || Ok(factory.create(&closure_key)?))?,
        time("factory type", iterations, || Ok(factory.create(&type_key)?))?,
        time("factory type with args", iterations, || Ok(factory.create(&args_key)?))?,
        time("activator create", iterations, || {
            activator
                .create::<PlainNode>()
                .map_err(|err| DemoError::Tree(err.into()))
        })?,
    ];

    log::info!("{iterations} iterations per strategy");
    for timing in &timings {
        let per_call = timing.total.as_nanos() / u128::from(iterations.max(1));
        log::info!(
            "{:<24} {:>10.3} ms total {:>8} ns/call",
            timing.label,
            timing.total.as_secs_f64() * 1000.0,
            per_call
        );
    }
    Ok(())
}
