//! Scenario tests spanning several tree operations

mod search_scenarios;
mod tree_scenarios;

use std::sync::Arc;

use crate::ecs::{Component, ComponentCore, ComponentRef};

/// Test component carrying a value
pub(super) struct Health {
    core: ComponentCore,
    pub points: u32,
}

impl Health {
    pub fn shared(points: u32) -> Arc<Self> {
        Arc::new(Self {
            core: ComponentCore::new("health"),
            points,
        })
    }
}

impl Component for Health {
    fn core(&self) -> &ComponentCore {
        &self.core
    }
}

/// Second test component type, never matched by `Health` searches
pub(super) struct Armor {
    core: ComponentCore,
}

impl Armor {
    pub fn shared() -> ComponentRef {
        Arc::new(Self {
            core: ComponentCore::new("armor"),
        })
    }
}

impl Component for Armor {
    fn core(&self) -> &ComponentCore {
        &self.core
    }
}
