use crate::source::kind::SourceNodeKind;
use crate::source::model::{NodeTreeDef, ObjectDef, ObjectKindDef, SceneDef};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SchemaPathElem {
    Field(&'static str),
    Key(String),
    Index(usize),
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaError {
    pub(crate) path: Vec<SchemaPathElem>,
    pub(crate) message: String,
}

impl SchemaError {
    fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match p {
            SchemaPathElem::Field(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Key(key) => {
                s.push_str("[\"");
                s.push_str(key);
                s.push_str("\"]");
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

#[derive(Debug, Clone)]
pub(crate) struct SchemaErrors {
    pub(crate) errors: Vec<SchemaError>,
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

pub(crate) fn validate_scene(def: &SceneDef) -> Result<(), SchemaErrors> {
    let mut errors = Vec::new();

    for (key, tree) in &def.groups {
        let path = [SchemaPathElem::Field("groups"), SchemaPathElem::Key(key.clone())];
        validate_tree(tree, &path, &def.groups, &mut errors);
    }
    for (key, mat) in &def.materials {
        if let Some(tree) = &mat.node_tree {
            let path = [
                SchemaPathElem::Field("materials"),
                SchemaPathElem::Key(key.clone()),
                SchemaPathElem::Field("node_tree"),
            ];
            validate_tree(tree, &path, &def.groups, &mut errors);
        }
    }
    if let Some(world) = &def.world {
        validate_tree(
            world,
            &[SchemaPathElem::Field("world")],
            &def.groups,
            &mut errors,
        );
    }

    if let Some(cycle) = find_group_cycle(&def.groups) {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("groups")],
            format!("recursive group reference: {}", cycle.join(" -> ")),
        ));
    }

    validate_objects(&def.objects, &mut errors);

    let r = &def.render;
    if r.resolution_x == 0 || r.resolution_y == 0 {
        errors.push(SchemaError::at(
            &[SchemaPathElem::Field("render")],
            "resolution must be non-zero",
        ));
    }
    if r.resolution_percentage == 0 {
        errors.push(SchemaError::at(
            &[
                SchemaPathElem::Field("render"),
                SchemaPathElem::Field("resolution_percentage"),
            ],
            "resolution_percentage must be > 0",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(SchemaErrors { errors })
    }
}

fn validate_tree(
    tree: &NodeTreeDef,
    base: &[SchemaPathElem],
    groups: &BTreeMap<String, NodeTreeDef>,
    errors: &mut Vec<SchemaError>,
) {
    let mut by_name = HashMap::<&str, usize>::new();
    for (i, node) in tree.nodes.iter().enumerate() {
        let mut path = base.to_vec();
        path.extend([SchemaPathElem::Field("nodes"), SchemaPathElem::Index(i)]);

        if by_name.insert(node.name.as_str(), i).is_some() {
            errors.push(SchemaError::at(
                &path,
                format!("duplicate node name '{}'", node.name),
            ));
        }

        if SourceNodeKind::from_tag(&node.tag) == SourceNodeKind::Group {
            match node.group.as_deref() {
                None => errors.push(SchemaError::at(&path, "group node without a group key")),
                Some(g) if !groups.contains_key(g) => errors.push(SchemaError::at(
                    &path,
                    format!("unknown group '{g}'"),
                )),
                Some(_) => {}
            }
        }

        if let Some(ramp) = &node.ramp {
            if ramp
                .elements
                .iter()
                .any(|e| !e.position.is_finite() || e.color.iter().any(|c| !c.is_finite()))
            {
                errors.push(SchemaError::at(&path, "ramp elements must be finite"));
            }
        }
    }

    for (i, link) in tree.links.iter().enumerate() {
        let mut path = base.to_vec();
        path.extend([SchemaPathElem::Field("links"), SchemaPathElem::Index(i)]);

        match by_name.get(link.from_node.as_str()) {
            None => errors.push(SchemaError::at(
                &path,
                format!("unknown source node '{}'", link.from_node),
            )),
            Some(&n) => {
                if link.from_socket.resolve(&tree.nodes[n].outputs).is_none() {
                    errors.push(SchemaError::at(
                        &path,
                        format!(
                            "node '{}' has no output {:?}",
                            link.from_node, link.from_socket
                        ),
                    ));
                }
            }
        }
        match by_name.get(link.to_node.as_str()) {
            None => errors.push(SchemaError::at(
                &path,
                format!("unknown target node '{}'", link.to_node),
            )),
            Some(&n) => {
                if link.to_socket.resolve(&tree.nodes[n].inputs).is_none() {
                    errors.push(SchemaError::at(
                        &path,
                        format!("node '{}' has no input {:?}", link.to_node, link.to_socket),
                    ));
                }
            }
        }
    }
}

/// Group names a tree references directly.
pub(crate) fn group_refs(tree: &NodeTreeDef) -> impl Iterator<Item = &str> {
    tree.nodes
        .iter()
        .filter(|n| SourceNodeKind::from_tag(&n.tag) == SourceNodeKind::Group)
        .filter_map(|n| n.group.as_deref())
}

fn find_group_cycle(groups: &BTreeMap<String, NodeTreeDef>) -> Option<Vec<String>> {
    #[derive(Clone, Copy, PartialEq, Eq)]
    enum Mark {
        Active,
        Done,
    }

    fn visit<'a>(
        key: &'a str,
        groups: &'a BTreeMap<String, NodeTreeDef>,
        marks: &mut HashMap<&'a str, Mark>,
        stack: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        match marks.get(key) {
            Some(Mark::Done) => return None,
            Some(Mark::Active) => {
                let start = stack.iter().position(|k| *k == key).unwrap_or(0);
                let mut cycle: Vec<String> = stack[start..].iter().map(|s| (*s).to_owned()).collect();
                cycle.push(key.to_owned());
                return Some(cycle);
            }
            None => {}
        }
        let tree = groups.get(key)?;
        marks.insert(key, Mark::Active);
        stack.push(key);
        for dep in group_refs(tree) {
            if let Some(c) = visit(dep, groups, marks, stack) {
                return Some(c);
            }
        }
        stack.pop();
        marks.insert(key, Mark::Done);
        None
    }

    let mut marks = HashMap::new();
    let mut stack = Vec::new();
    groups
        .keys()
        .find_map(|k| visit(k.as_str(), groups, &mut marks, &mut stack))
}

fn validate_objects(objects: &[ObjectDef], errors: &mut Vec<SchemaError>) {
    let names: HashSet<&str> = objects.iter().map(|o| o.name.as_str()).collect();
    let mut seen = HashSet::<&str>::new();

    for (i, obj) in objects.iter().enumerate() {
        let path = [SchemaPathElem::Field("objects"), SchemaPathElem::Index(i)];

        if !seen.insert(obj.name.as_str()) {
            errors.push(SchemaError::at(
                &path,
                format!("duplicate object name '{}'", obj.name),
            ));
        }
        if obj.matrix_world.iter().flatten().any(|v| !v.is_finite()) {
            errors.push(SchemaError::at(&path, "matrix_world must be finite"));
        }

        match obj.kind {
            ObjectKindDef::Mesh => match &obj.mesh {
                None => errors.push(SchemaError::at(&path, "mesh object without mesh data")),
                Some(mesh) => {
                    if mesh
                        .instances
                        .iter()
                        .any(|m| m.iter().flatten().any(|v| !v.is_finite()))
                    {
                        errors.push(SchemaError::at(&path, "instance matrices must be finite"));
                    }
                }
            },
            ObjectKindDef::Camera => match &obj.camera {
                None => errors.push(SchemaError::at(&path, "camera object without camera data")),
                Some(cam) => {
                    if !cam.angle.is_finite() || cam.angle <= 0.0 {
                        errors.push(SchemaError::at(&path, "camera angle must be > 0"));
                    }
                    if let Some(dof) = &cam.dof {
                        if !dof.fstop.is_finite() || dof.fstop <= 0.0 {
                            errors.push(SchemaError::at(&path, "dof fstop must be > 0"));
                        }
                        if let Some(target) = dof.focus_object.as_deref() {
                            if !names.contains(target) {
                                errors.push(SchemaError::at(
                                    &path,
                                    format!("unknown focus object '{target}'"),
                                ));
                            }
                        }
                    }
                }
            },
            ObjectKindDef::Other => {}
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/validate.rs"]
mod tests;
