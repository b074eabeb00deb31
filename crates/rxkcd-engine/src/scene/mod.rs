// Modules
pub mod objects;
pub mod stacking;

// Re-exports
pub use objects::{
    Axes, Face, FaceColor, Figure, Font, HorizontalAlignment, LineObject, ObjectKind, ObjectType,
    PatchObject, TextObject, VerticalAlignment,
};
pub use stacking::ReorderReport;

// Imports
use crate::EngineError;
use anyhow::Context;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use slotmap::{SecondaryMap, SlotMap};

slotmap::new_key_type! {
    pub struct ObjectKey;
}

/// A node of the scene graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename = "scene_object")]
pub struct SceneObject {
    #[serde(rename = "parent")]
    parent: Option<ObjectKey>,
    /// The stacking order of the children. The first child is drawn on top.
    #[serde(rename = "children")]
    children: Vec<ObjectKey>,
    #[serde(rename = "visible", default = "visible_default")]
    pub visible: bool,
    /// An optional name to look the object up with.
    #[serde(rename = "tag", default)]
    pub tag: Option<String>,
    #[serde(rename = "kind")]
    pub kind: ObjectKind,
}

fn visible_default() -> bool {
    true
}

impl SceneObject {
    fn new(parent: Option<ObjectKey>, kind: ObjectKind) -> Self {
        Self {
            parent,
            children: Vec::new(),
            visible: true,
            tag: None,
            kind,
        }
    }

    pub fn parent(&self) -> Option<ObjectKey> {
        self.parent
    }

    pub fn children(&self) -> &[ObjectKey] {
        &self.children
    }
}

/// The retained scene of figures, axes and their drawable objects.
///
/// Objects form trees rooted at figures. Every object keeps an ordered list of its children,
/// where the first child is the front-most and the last child the back-most.
/// Objects that get created are placed in front of their siblings, except when inserted with [SceneGraph::insert_back].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename = "scene_graph")]
pub struct SceneGraph {
    #[serde(rename = "objects")]
    objects: SlotMap<ObjectKey, SceneObject>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a scene from its Json representation.
    ///
    /// The children lists must form trees: every listed child exists, is listed only once
    /// and is not its own descendant. Parent links are taken as they are.
    pub fn load_from_json(json: &str) -> anyhow::Result<Self> {
        let scene: Self =
            serde_json::from_str(json).context("Deserializing scene graph from Json failed.")?;
        scene
            .check_children_links()
            .context("Loaded scene graph has invalid children links.")?;
        Ok(scene)
    }

    fn check_children_links(&self) -> anyhow::Result<()> {
        let mut listed = SecondaryMap::<ObjectKey, ()>::new();
        for (key, object) in self.objects.iter() {
            for &child in object.children.iter() {
                anyhow::ensure!(
                    self.objects.contains_key(child),
                    "object {key:?} lists the missing child {child:?}"
                );
                anyhow::ensure!(
                    listed.insert(child, ()).is_none(),
                    "object {child:?} is listed as child more than once"
                );
            }
        }

        // objects not reachable from an unlisted object are part of a cycle
        let mut reached = 0;
        let mut worklist = self
            .objects
            .keys()
            .filter(|&key| !listed.contains_key(key))
            .collect::<Vec<ObjectKey>>();
        while let Some(key) = worklist.pop() {
            reached += 1;
            worklist.extend(self.children(key).iter().copied());
        }
        anyhow::ensure!(
            reached == self.objects.len(),
            "{} objects are their own descendants",
            self.objects.len() - reached
        );
        Ok(())
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Serializing scene graph to Json failed.")
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, key: ObjectKey) -> bool {
        self.objects.contains_key(key)
    }

    pub fn get(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    pub fn get_mut(&mut self, key: ObjectKey) -> Option<&mut SceneObject> {
        self.objects.get_mut(key)
    }

    pub fn kind(&self, key: ObjectKey) -> Option<&ObjectKind> {
        self.objects.get(key).map(|o| &o.kind)
    }

    pub fn kind_mut(&mut self, key: ObjectKey) -> Option<&mut ObjectKind> {
        self.objects.get_mut(key).map(|o| &mut o.kind)
    }

    pub fn object_type(&self, key: ObjectKey) -> Option<ObjectType> {
        self.kind(key).map(ObjectKind::object_type)
    }

    /// The root figures, in insertion order.
    pub fn figures(&self) -> Vec<ObjectKey> {
        self.objects
            .iter()
            .filter(|(_, o)| o.parent.is_none() && matches!(o.kind, ObjectKind::Figure(_)))
            .map(|(key, _)| key)
            .collect()
    }

    pub fn parent(&self, key: ObjectKey) -> Option<ObjectKey> {
        self.objects.get(key).and_then(|o| o.parent)
    }

    /// The children of the object in stacking order. Empty if the object doesn't exist.
    pub fn children(&self, key: ObjectKey) -> &[ObjectKey] {
        self.objects
            .get(key)
            .map(|o| o.children.as_slice())
            .unwrap_or_default()
    }

    /// The first object with the given tag.
    pub fn find_by_tag(&self, tag: &str) -> Option<ObjectKey> {
        self.objects
            .iter()
            .find(|(_, o)| o.tag.as_deref() == Some(tag))
            .map(|(key, _)| key)
    }

    pub fn set_tag(&mut self, key: ObjectKey, tag: impl Into<String>) -> Result<(), EngineError> {
        let object = self
            .objects
            .get_mut(key)
            .ok_or(EngineError::InvalidHandle(key))?;
        object.tag = Some(tag.into());
        Ok(())
    }

    /// Insert a new root figure.
    pub fn add_figure(&mut self, figure: Figure) -> ObjectKey {
        self.objects
            .insert(SceneObject::new(None, ObjectKind::Figure(figure)))
    }

    /// Insert a new object as the front-most child of the parent.
    pub fn insert(&mut self, parent: ObjectKey, kind: ObjectKind) -> Result<ObjectKey, EngineError> {
        self.insert_at(parent, kind, 0)
    }

    /// Insert a new object as the back-most child of the parent.
    pub fn insert_back(
        &mut self,
        parent: ObjectKey,
        kind: ObjectKind,
    ) -> Result<ObjectKey, EngineError> {
        let len = self.children(parent).len();
        self.insert_at(parent, kind, len)
    }

    fn insert_at(
        &mut self,
        parent: ObjectKey,
        kind: ObjectKind,
        index: usize,
    ) -> Result<ObjectKey, EngineError> {
        if !self.objects.contains_key(parent) {
            return Err(EngineError::InvalidHandle(parent));
        }
        let key = self.objects.insert(SceneObject::new(Some(parent), kind));
        if let Some(parent) = self.objects.get_mut(parent) {
            let index = index.min(parent.children.len());
            parent.children.insert(index, key);
        }
        Ok(key)
    }

    pub fn add_axes(&mut self, figure: ObjectKey, axes: Axes) -> Result<ObjectKey, EngineError> {
        match self.object_type(figure) {
            Some(ObjectType::Figure) => self.insert(figure, ObjectKind::Axes(axes)),
            Some(_) => Err(self.unexpected_kind(figure, "a figure")),
            None => Err(EngineError::InvalidHandle(figure)),
        }
    }

    pub fn add_line(&mut self, parent: ObjectKey, line: LineObject) -> Result<ObjectKey, EngineError> {
        self.insert(parent, ObjectKind::Line(line))
    }

    pub fn add_patch(
        &mut self,
        parent: ObjectKey,
        patch: PatchObject,
    ) -> Result<ObjectKey, EngineError> {
        self.insert(parent, ObjectKind::Patch(patch))
    }

    pub fn add_text(&mut self, parent: ObjectKey, text: TextObject) -> Result<ObjectKey, EngineError> {
        self.insert(parent, ObjectKind::Text(text))
    }

    pub fn add_group(&mut self, parent: ObjectKey) -> Result<ObjectKey, EngineError> {
        self.insert(parent, ObjectKind::Group)
    }

    pub fn add_other(
        &mut self,
        parent: ObjectKey,
        type_name: impl Into<String>,
    ) -> Result<ObjectKey, EngineError> {
        self.insert(
            parent,
            ObjectKind::Other {
                type_name: type_name.into(),
            },
        )
    }

    pub fn axes(&self, key: ObjectKey) -> Option<&Axes> {
        match self.kind(key)? {
            ObjectKind::Axes(axes) => Some(axes),
            _ => None,
        }
    }

    pub fn axes_mut(&mut self, key: ObjectKey) -> Option<&mut Axes> {
        match self.kind_mut(key)? {
            ObjectKind::Axes(axes) => Some(axes),
            _ => None,
        }
    }

    pub fn figure(&self, key: ObjectKey) -> Option<&Figure> {
        match self.kind(key)? {
            ObjectKind::Figure(figure) => Some(figure),
            _ => None,
        }
    }

    pub fn line(&self, key: ObjectKey) -> Option<&LineObject> {
        match self.kind(key)? {
            ObjectKind::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn line_mut(&mut self, key: ObjectKey) -> Option<&mut LineObject> {
        match self.kind_mut(key)? {
            ObjectKind::Line(line) => Some(line),
            _ => None,
        }
    }

    pub fn patch(&self, key: ObjectKey) -> Option<&PatchObject> {
        match self.kind(key)? {
            ObjectKind::Patch(patch) => Some(patch),
            _ => None,
        }
    }

    pub fn patch_mut(&mut self, key: ObjectKey) -> Option<&mut PatchObject> {
        match self.kind_mut(key)? {
            ObjectKind::Patch(patch) => Some(patch),
            _ => None,
        }
    }

    pub fn text(&self, key: ObjectKey) -> Option<&TextObject> {
        match self.kind(key)? {
            ObjectKind::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn text_mut(&mut self, key: ObjectKey) -> Option<&mut TextObject> {
        match self.kind_mut(key)? {
            ObjectKind::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The closest axes among the ancestors of the object.
    pub fn ancestor_axes(&self, key: ObjectKey) -> Option<ObjectKey> {
        let mut current = self.parent(key);
        while let Some(ancestor) = current {
            if self.object_type(ancestor) == Some(ObjectType::Axes) {
                return Some(ancestor);
            }
            current = self.parent(ancestor);
        }
        None
    }

    /// Replace the stacking order of the children of `parent`.
    ///
    /// The new order must contain exactly the current children.
    pub fn set_children(
        &mut self,
        parent: ObjectKey,
        children: Vec<ObjectKey>,
    ) -> Result<(), EngineError> {
        let object = self
            .objects
            .get_mut(parent)
            .ok_or(EngineError::InvalidHandle(parent))?;

        let is_permutation = object.children.len() == children.len()
            && object
                .children
                .iter()
                .sorted()
                .eq(children.iter().sorted());
        if !is_permutation {
            return Err(EngineError::ChildrenMismatch(parent));
        }

        object.children = children;
        Ok(())
    }

    /// Remove the object from the children of its parent. The object stays in the scene without a parent.
    pub fn detach(&mut self, key: ObjectKey) -> Result<(), EngineError> {
        let parent = self
            .objects
            .get_mut(key)
            .ok_or(EngineError::InvalidHandle(key))?
            .parent
            .take();

        if let Some(parent) = parent.and_then(|parent| self.objects.get_mut(parent)) {
            parent.children.retain(|&child| child != key);
        }
        Ok(())
    }

    /// Remove the object and all its descendants. Returns the count of removed objects.
    pub fn remove(&mut self, key: ObjectKey) -> Result<usize, EngineError> {
        self.detach(key)?;

        let mut removed = 0;
        let mut worklist = vec![key];
        while let Some(current) = worklist.pop() {
            if let Some(object) = self.objects.remove(current) {
                removed += 1;
                worklist.extend(object.children);
            }
        }
        Ok(removed)
    }

    pub(crate) fn unexpected_kind(&self, key: ObjectKey, expected: &'static str) -> EngineError {
        EngineError::UnexpectedKind {
            key,
            expected,
            found: self
                .kind(key)
                .map(|kind| kind.type_name().to_string())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_children_are_inserted_in_front() {
        let mut scene = SceneGraph::new();
        let figure = scene.add_figure(Figure::default());
        let axes = scene.add_axes(figure, Axes::default()).unwrap();

        let first = scene.add_line(axes, LineObject::default()).unwrap();
        let second = scene.add_line(axes, LineObject::default()).unwrap();
        let back = scene.insert_back(axes, ObjectKind::Group).unwrap();

        assert_eq!(scene.children(axes), &[second, first, back]);
        assert_eq!(scene.parent(first), Some(axes));
        assert_eq!(scene.ancestor_axes(first), Some(axes));
        assert_eq!(scene.figures(), vec![figure]);
    }

    #[test]
    fn axes_need_a_figure() {
        let mut scene = SceneGraph::new();
        let figure = scene.add_figure(Figure::default());
        let axes = scene.add_axes(figure, Axes::default()).unwrap();

        assert!(matches!(
            scene.add_axes(axes, Axes::default()),
            Err(EngineError::UnexpectedKind { .. })
        ));
    }

    #[test]
    fn set_children_needs_a_permutation() {
        let mut scene = SceneGraph::new();
        let figure = scene.add_figure(Figure::default());
        let axes = scene.add_axes(figure, Axes::default()).unwrap();
        let a = scene.add_group(axes).unwrap();
        let b = scene.add_group(axes).unwrap();

        assert_eq!(
            scene.set_children(axes, vec![a]),
            Err(EngineError::ChildrenMismatch(axes))
        );
        assert_eq!(
            scene.set_children(axes, vec![a, a]),
            Err(EngineError::ChildrenMismatch(axes))
        );
        scene.set_children(axes, vec![a, b]).unwrap();
        assert_eq!(scene.children(axes), &[a, b]);
    }

    #[test]
    fn remove_is_recursive() {
        let mut scene = SceneGraph::new();
        let figure = scene.add_figure(Figure::default());
        let axes = scene.add_axes(figure, Axes::default()).unwrap();
        let group = scene.add_group(axes).unwrap();
        let line = scene.add_line(group, LineObject::default()).unwrap();
        scene.set_tag(line, "curve").unwrap();

        assert_eq!(scene.find_by_tag("curve"), Some(line));
        assert_eq!(scene.remove(group), Ok(2));
        assert!(!scene.contains(line));
        assert!(scene.children(axes).is_empty());
        assert_eq!(scene.find_by_tag("curve"), None);
    }

    #[test]
    fn json_roundtrip_keeps_structure() {
        let mut scene = SceneGraph::new();
        let figure = scene.add_figure(Figure::default());
        let axes = scene.add_axes(figure, Axes::default()).unwrap();
        let line = scene
            .add_line(axes, LineObject::new(vec![0.0, 1.0], vec![1.0, 0.0]))
            .unwrap();

        let loaded = SceneGraph::load_from_json(&scene.to_json().unwrap()).unwrap();

        assert_eq!(loaded.children(axes), &[line]);
        assert_eq!(loaded.line(line).map(|l| l.xdata.clone()), Some(vec![0.0, 1.0]));
    }

    #[test]
    fn load_rejects_cyclic_children() {
        let mut scene = SceneGraph::new();
        let figure = scene.add_figure(Figure::default());
        let axes = scene.add_axes(figure, Axes::default()).unwrap();
        let group = scene.add_group(axes).unwrap();

        let mut self_listing = scene.clone();
        self_listing.objects[group].children.push(group);
        assert!(SceneGraph::load_from_json(&self_listing.to_json().unwrap()).is_err());

        let mut ancestor_listing = scene.clone();
        ancestor_listing.objects[group].children.push(figure);
        assert!(SceneGraph::load_from_json(&ancestor_listing.to_json().unwrap()).is_err());

        let mut detached_cycle = scene.clone();
        let inner = detached_cycle.add_group(group).unwrap();
        detached_cycle.detach(group).unwrap();
        detached_cycle.objects[inner].children.push(group);
        assert!(SceneGraph::load_from_json(&detached_cycle.to_json().unwrap()).is_err());

        let mut dangling = scene.clone();
        let line = dangling.add_line(group, LineObject::default()).unwrap();
        dangling.objects.remove(line);
        assert!(SceneGraph::load_from_json(&dangling.to_json().unwrap()).is_err());

        assert!(SceneGraph::load_from_json(&scene.to_json().unwrap()).is_ok());
    }

    #[test]
    fn load_keeps_unlisted_children() {
        let mut scene = SceneGraph::new();
        let figure = scene.add_figure(Figure::default());
        let axes = scene.add_axes(figure, Axes::default()).unwrap();
        let line = scene.add_line(axes, LineObject::default()).unwrap();
        scene.objects[axes].children.clear();

        let loaded = SceneGraph::load_from_json(&scene.to_json().unwrap()).unwrap();

        assert_eq!(loaded.parent(line), Some(axes));
        assert!(loaded.children(axes).is_empty());
    }
}
