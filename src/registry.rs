// Body registry for the orrery

use std::collections::{HashMap, VecDeque};

use crate::body::CelestialBody;
use crate::error::SceneError;

/// Index of a body in its registry. Stable for the registry's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(crate) usize);

impl BodyId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Owns every body of a scenario in insertion order, keyed by name.
///
/// Parent links are stored by name and resolved to indices on demand, so
/// bodies may be registered before their parents. [`evaluation_order`]
/// checks the parent graph is a forest of registered names.
///
/// [`evaluation_order`]: BodyRegistry::evaluation_order
#[derive(Debug, Default)]
pub struct BodyRegistry {
    bodies: Vec<CelestialBody>,
    by_name: HashMap<String, BodyId>,
    revision: u64,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a body. Names must be unique, the radius positive and the axis non-zero.
    pub fn register(&mut self, body: CelestialBody) -> Result<BodyId, SceneError> {
        if self.by_name.contains_key(&body.name) {
            return Err(SceneError::DuplicateName(body.name));
        }
        body.validate()?;

        let id = BodyId(self.bodies.len());
        self.by_name.insert(body.name.clone(), id);
        self.bodies.push(body);
        self.revision += 1;
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Result<&CelestialBody, SceneError> {
        self.id_of(name)
            .map(|id| &self.bodies[id.0])
            .ok_or_else(|| SceneError::NotFound(name.to_string()))
    }

    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.0)
    }

    /// All bodies in insertion order.
    pub fn all(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|body| body.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Bumped on every successful registration. Cached orders compare against it.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The parent of `body`, or `None` for a root.
    pub fn resolve_parent(&self, body: &CelestialBody) -> Result<Option<&CelestialBody>, SceneError> {
        Ok(self.parent_id(body)?.map(|id| &self.bodies[id.0]))
    }

    pub fn parent_id(&self, body: &CelestialBody) -> Result<Option<BodyId>, SceneError> {
        match &body.parent {
            None => Ok(None),
            Some(parent) => self
                .id_of(parent)
                .map(Some)
                .ok_or_else(|| SceneError::DanglingParent {
                    body: body.name.clone(),
                    parent: parent.clone(),
                }),
        }
    }

    /// Orders every body so that each parent precedes all of its children.
    ///
    /// Roots come first in insertion order, then their descendants level by
    /// level. Fails on the first unresolvable parent name, or when some
    /// bodies can never be reached from a root because their parent links
    /// loop.
    pub fn evaluation_order(&self) -> Result<Vec<BodyId>, SceneError> {
        let mut children: Vec<Vec<BodyId>> = vec![Vec::new(); self.bodies.len()];
        let mut queue = VecDeque::new();

        for (index, body) in self.bodies.iter().enumerate() {
            match self.parent_id(body)? {
                Some(parent) => children[parent.0].push(BodyId(index)),
                None => queue.push_back(BodyId(index)),
            }
        }

        let mut order = Vec::with_capacity(self.bodies.len());
        while let Some(id) = queue.pop_front() {
            order.push(id);
            queue.extend(children[id.0].iter().copied());
        }

        if order.len() < self.bodies.len() {
            let mut placed = vec![false; self.bodies.len()];
            for id in &order {
                placed[id.0] = true;
            }
            let stuck = placed.iter().position(|&p| !p).unwrap_or_default();
            return Err(SceneError::CyclicParent(self.bodies[stuck].name.clone()));
        }
        Ok(order)
    }
}
