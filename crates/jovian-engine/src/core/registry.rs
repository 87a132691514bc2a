use crate::api::types::{BodyId, BodyKind};
use crate::components::body::Body;

/// Flat body storage. Bodies are created once at scene construction and
/// live until teardown, so a body's id is its index.
pub struct BodyRegistry {
    bodies: Vec<Body>,
}

impl BodyRegistry {
    pub fn new() -> Self {
        Self {
            bodies: Vec::with_capacity(8),
        }
    }

    /// Id the next spawned body will receive.
    pub fn next_id(&self) -> BodyId {
        BodyId(self.bodies.len() as u32)
    }

    /// Add a body. Its id is reassigned to its slot.
    pub fn spawn(&mut self, mut body: Body) -> BodyId {
        let id = self.next_id();
        body.id = id;
        self.bodies.push(body);
        id
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.index())
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id.index())
    }

    /// Look a body up by name.
    pub fn find(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name == name)
    }

    /// Resolve a name to an id.
    pub fn id_of(&self, name: &str) -> Option<BodyId> {
        self.find(name).map(|b| b.id)
    }

    /// All bodies of one kind, in registry order.
    pub fn of_kind(&self, kind: BodyKind) -> impl Iterator<Item = &Body> {
        self.bodies.iter().filter(move |b| b.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for BodyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
