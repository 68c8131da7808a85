//! Authoritative store of simulated game objects.
//!
//! The store owns the one shared mutable resource of the core: the entity
//! list. All mutation happens synchronously within a tick, so there is no
//! locking; the discipline is copy-on-write — a handler takes a copy of the
//! list (or of one record), edits the copy, and swaps it back in via
//! [`ObjectStore::replace_all`] / [`ObjectStore::update`].

use glam::Vec2;

use crate::components::behavior::Behavior;
use crate::components::gameobject::{Category, GameObject};
use crate::components::simobject::SimulatedGameObject;

/// Holds the per-tick snapshot of all simulated objects.
#[derive(Debug, Default)]
pub struct ObjectStore {
    objects: Vec<SimulatedGameObject>,
    spawn_counter: u64,
}

impl ObjectStore {
    /// Project an authored population into a fresh store.
    pub fn from_objects(objects: Vec<GameObject>) -> Self {
        Self {
            objects: objects
                .into_iter()
                .map(SimulatedGameObject::from_object)
                .collect(),
            spawn_counter: 0,
        }
    }

    pub fn objects(&self) -> &[SimulatedGameObject] {
        &self.objects
    }

    /// Owned copy of the list, for copy-on-write edits.
    pub fn to_vec(&self) -> Vec<SimulatedGameObject> {
        self.objects.clone()
    }

    /// Swap in a replacement list. This is the `setGameObjects` callback of
    /// the execution context.
    pub fn replace_all(&mut self, objects: Vec<SimulatedGameObject>) {
        self.objects = objects;
    }

    pub fn get(&self, id: &str) -> Option<&SimulatedGameObject> {
        self.objects.iter().find(|o| o.id() == id)
    }

    pub fn find(
        &self,
        predicate: impl Fn(&SimulatedGameObject) -> bool,
    ) -> Option<&SimulatedGameObject> {
        self.objects.iter().find(|o| predicate(o))
    }

    /// First active object with the given authored name.
    pub fn find_by_name(&self, name: &str) -> Option<&SimulatedGameObject> {
        self.find(|o| o.name() == name)
    }

    /// Copy-on-write single-object edit: clone the record, apply `f`, swap
    /// the replacement in. Returns false when the id is unknown.
    pub fn update(&mut self, id: &str, f: impl FnOnce(&mut SimulatedGameObject)) -> bool {
        let Some(index) = self.objects.iter().position(|o| o.id() == id) else {
            return false;
        };
        let mut replacement = self.objects[index].clone();
        f(&mut replacement);
        self.objects[index] = replacement;
        true
    }

    /// Append a freshly constructed object of the given category with its
    /// default behavior set. Returns the new object's id.
    pub fn spawn(&mut self, category: Category, position: Vec2) -> String {
        self.spawn_counter += 1;
        let tag = match category {
            Category::Player => "player",
            Category::Enemy => "enemy",
            Category::Platform => "platform",
            Category::Background => "background",
            Category::Bullet => "bullet",
            Category::Text => "text",
            Category::Hitbox => "hitbox",
            Category::Empty => "empty",
        };
        let id = format!("{}-{}", tag, self.spawn_counter);
        let mut behaviors = category.default_behaviors();
        for behavior in &mut behaviors {
            if let Behavior::Transform(t) = behavior {
                t.position = position;
            }
        }
        let object = GameObject {
            id: id.clone(),
            name: id.clone(),
            category,
            layer: String::new(),
            behaviors,
            animations: vec![],
            active: true,
            locked: false,
            use_custom_hitboxes: false,
        };
        self.objects.push(SimulatedGameObject::from_object(object));
        id
    }

    /// Remove an object by id. Returns false when the id is unknown.
    pub fn destroy(&mut self, id: &str) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.id() != id);
        self.objects.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_assigns_fresh_ids_and_position() {
        let mut store = ObjectStore::default();
        let a = store.spawn(Category::Bullet, Vec2::new(5.0, 6.0));
        let b = store.spawn(Category::Bullet, Vec2::ZERO);
        assert_ne!(a, b);
        let obj = store.get(&a).unwrap();
        assert_eq!(obj.position, Vec2::new(5.0, 6.0));
        assert_eq!(obj.initial_position, Vec2::new(5.0, 6.0));
        assert!(obj.object.transform().is_some());
    }

    #[test]
    fn update_replaces_whole_record() {
        let mut store = ObjectStore::default();
        let id = store.spawn(Category::Player, Vec2::ZERO);
        assert!(store.update(&id, |o| o.position.x = 42.0));
        assert_eq!(store.get(&id).unwrap().position.x, 42.0);
        assert!(!store.update("nope", |_| {}));
    }

    #[test]
    fn destroy_removes_by_id() {
        let mut store = ObjectStore::default();
        let id = store.spawn(Category::Enemy, Vec2::ZERO);
        assert!(store.destroy(&id));
        assert!(!store.destroy(&id));
        assert!(store.get(&id).is_none());
    }

    #[test]
    fn replace_all_is_wholesale() {
        let mut store = ObjectStore::default();
        store.spawn(Category::Enemy, Vec2::ZERO);
        let mut copy = store.to_vec();
        copy.clear();
        store.replace_all(copy);
        assert!(store.objects().is_empty());
    }
}
