//! Scene demo
//!
//! Builds a scene from a configuration file, fills it through a keyed
//! factory and runs the configured number of frames, reporting statistics
//! through the scene's log sink.
//!
//! ```text
//! scene_demo [config.toml | config.ron]
//! scene_demo bench [iterations]
//! ```

mod bench;

use std::process::ExitCode;
use std::sync::Arc;

use rand::Rng;
use scene_core::foundation::logging;
use scene_core::prelude::*;
use thiserror::Error;

const SPAWN_COUNT: usize = 32;

/// Errors that end the demo
#[derive(Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Factory(#[from] FactoryError<String>),

    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("{0}")]
    Usage(String),
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let result = match args.first().map(String::as_str) {
        Some("bench") => run_bench(args.get(1)),
        Some(path) => SceneConfig::load_from_file(path)
            .map_err(DemoError::from)
            .and_then(run),
        None => run(SceneConfig::default()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            eprintln!("scene_demo: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_bench(iterations: Option<&String>) -> Result<(), DemoError> {
    let iterations = match iterations {
        Some(raw) => raw
            .parse()
            .map_err(|_| DemoError::Usage(format!("'{raw}' is not a valid iteration count")))?,
        None => bench::DEFAULT_ITERATIONS,
    };

    logging::init_with_level("info");
    bench::run(iterations)?;
    Ok(())
}

fn run(config: SceneConfig) -> Result<(), DemoError> {
    config.validate()?;
    logging::init_with_level(&config.logging.level);
    log::info!("Starting scene demo with root '{}'", config.root_name);

    let sink: Arc<dyn LogSink> = Arc::new(FacadeSink);
    let mut scene = Scene::from_config(&config, Arc::clone(&sink))?;
    let factory = build_factory(&scene)?;

    populate(&scene, &factory)?;
    sink.log(
        MessageLevel::Information,
        &format!("Spawned {} nodes from {} factory keys", SPAWN_COUNT, factory.len()),
    );

    let report_every = config.frame.target_fps.round().max(1.0) as u64;
    for _ in 0..config.frame.frames {
        let frame = scene.tick();
        if (frame.frame + 1) % report_every == 0 {
            scene.report_statistics();
        }
    }

    scene.report_statistics();
    log::info!("Scene demo finished");
    Ok(())
}

fn build_factory(scene: &Scene) -> Result<Factory<String, Arc<Node>>, DemoError> {
    let factory = Factory::new(Arc::clone(scene.node_activator()));

    factory.register::<PlainNode>("empty".to_string())?;
    factory.register::<GameObject>("object".to_string())?;
    factory.register_with_args::<GameObject, _>("ship".to_string(), || {
        args![String::from("Ship"), Vec3::new(0.0, 0.0, -5.0)]
    })?;
    factory.register_fn("marker".to_string(), || Node::new("Marker"))?;

    Ok(factory)
}

/// Spawn random kinds under random existing nodes, giving game objects a behaviour
fn populate(scene: &Scene, factory: &Factory<String, Arc<Node>>) -> Result<(), DemoError> {
    let mut rng = rand::thread_rng();
    let mut keys = factory.keys();
    keys.sort();
    let mut spawned: Vec<Arc<Node>> = vec![Arc::clone(scene.root())];

    for _ in 0..SPAWN_COUNT {
        let key = &keys[rng.gen_range(0..keys.len())];
        let node = factory.create(key)?;

        let parent = &spawned[rng.gen_range(0..spawned.len())];
        parent.attach_child(Arc::clone(&node))?;

        if node.get_component::<Transform>().is_some() {
            scene.create_component::<Behaviour>(&node)?;
        }
        if rng.gen_bool(0.1) {
            log::debug!("Deactivating '{}' ({})", node.name(), node.id());
            node.set_active(false);
        }
        spawned.push(node);
    }
    Ok(())
}
