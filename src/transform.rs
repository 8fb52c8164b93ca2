// Hierarchical world transforms for each frame

use glam::{Mat4, Quat, Vec3};

use crate::body::CelestialBody;
use crate::error::SceneError;
use crate::math::{orbit_offset, swept_angle, Transform};
use crate::registry::{BodyId, BodyRegistry};

/// World matrices of every registered body for one simulation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameTransforms {
    time: f64,
    world: Vec<Mat4>,
}

impl FrameTransforms {
    /// Simulation time these matrices were evaluated at.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn world(&self, id: BodyId) -> Option<Mat4> {
        self.world.get(id.index()).copied()
    }

    /// World-space origin of a body, the translation column of its matrix.
    pub fn position(&self, id: BodyId) -> Option<Vec3> {
        self.world(id).map(|m| m.w_axis.truncate())
    }

    pub fn by_name(&self, registry: &BodyRegistry, name: &str) -> Option<Mat4> {
        registry.id_of(name).and_then(|id| self.world(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyId, Mat4)> + '_ {
        self.world.iter().enumerate().map(|(i, m)| (BodyId(i), *m))
    }

    pub fn len(&self) -> usize {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }
}

/// Local transform of `body` at `time`, anchored at its parent's world position.
///
/// Only the parent's position propagates: the parent's scale and spin never
/// reach the child, so a large star does not stretch the orbits around it.
pub fn body_transform(body: &CelestialBody, time: f64, anchor: Vec3) -> Transform {
    let orbit_angle = swept_angle(time, body.orbit_speed);
    let offset = orbit_offset(orbit_angle, body.orbit_radius, body.orbit_inclination);
    let spin = Quat::from_axis_angle(
        body.rotation_axis.normalize(),
        swept_angle(time, body.rotation_speed),
    );
    Transform::new(anchor + offset, spin, Vec3::splat(body.radius))
}

/// Evaluates world transforms parent-before-child in a cached topological order.
#[derive(Debug)]
pub struct TransformEvaluator {
    order: Vec<BodyId>,
    parents: Vec<Option<BodyId>>,
    revision: u64,
    scratch: Vec<Mat4>,
    current: FrameTransforms,
}

impl TransformEvaluator {
    /// Validates the parent graph and evaluates the scene at time zero.
    pub fn new(registry: &BodyRegistry) -> Result<Self, SceneError> {
        let mut evaluator = Self {
            order: Vec::new(),
            parents: Vec::new(),
            revision: registry.revision(),
            scratch: Vec::new(),
            current: FrameTransforms::default(),
        };
        evaluator.refresh_order(registry)?;
        evaluator.evaluate(registry, 0.0)?;
        Ok(evaluator)
    }

    fn refresh_order(&mut self, registry: &BodyRegistry) -> Result<(), SceneError> {
        let order = registry.evaluation_order()?;
        let parents = registry
            .all()
            .iter()
            .map(|body| registry.parent_id(body))
            .collect::<Result<Vec<_>, _>>()?;
        self.order = order;
        self.parents = parents;
        self.revision = registry.revision();
        log::debug!("Cached evaluation order for {} bodies", self.order.len());
        Ok(())
    }

    /// Computes every body's world matrix at `time`.
    ///
    /// The previous frame stays current if the order has to be rebuilt and
    /// the registry no longer validates.
    pub fn evaluate(&mut self, registry: &BodyRegistry, time: f64) -> Result<&FrameTransforms, SceneError> {
        if registry.revision() != self.revision {
            self.refresh_order(registry)?;
        }

        let bodies = registry.all();
        self.scratch.clear();
        self.scratch.resize(bodies.len(), Mat4::IDENTITY);

        for &id in &self.order {
            let anchor = match self.parents[id.index()] {
                Some(parent) => self.scratch[parent.index()].w_axis.truncate(),
                None => Vec3::ZERO,
            };
            self.scratch[id.index()] = body_transform(&bodies[id.index()], time, anchor).matrix();
        }

        std::mem::swap(&mut self.current.world, &mut self.scratch);
        self.current.time = time;
        Ok(&self.current)
    }

    /// The most recent successful evaluation.
    pub fn current(&self) -> &FrameTransforms {
        &self.current
    }

    pub fn order(&self) -> &[BodyId] {
        &self.order
    }
}
