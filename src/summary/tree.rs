use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Result, RollupError};
use crate::summary::total::TotalColumn;

/// Material, shape and dimension of one member row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Properties {
    pub material: String,
    pub shape: String,
    pub dimension: String,
}

impl Properties {
    pub fn new(
        material: impl Into<String>,
        shape: impl Into<String>,
        dimension: impl Into<String>,
    ) -> Self {
        Self {
            material: material.into(),
            shape: shape.into(),
            dimension: dimension.into(),
        }
    }

    pub fn cells(&self) -> [&str; 3] {
        [self.material.as_str(), self.shape.as_str(), self.dimension.as_str()]
    }
}

impl From<[&str; 3]> for Properties {
    fn from([material, shape, dimension]: [&str; 3]) -> Self {
        Self::new(material, shape, dimension)
    }
}

/// Leaf entry: the value a component carries for one member row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub value: String,
    pub properties: Properties,
}

/// Index of a column inside a [`SummaryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(usize);

impl ColumnId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A component of the structure, built from one data column of a sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub level: u8,
    /// Name of the component one level up that this column belongs to.
    pub level_name: String,
    pub items: Vec<Item>,
    parent: Option<ColumnId>,
    children: Vec<ColumnId>,
}

impl Column {
    pub fn new(name: impl Into<String>, level: u8, level_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level,
            level_name: level_name.into(),
            items: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// `None` for level-1 columns, which hang off the tree root.
    pub fn parent(&self) -> Option<ColumnId> {
        self.parent
    }

    pub fn children(&self) -> &[ColumnId] {
        &self.children
    }

    pub fn properties(&self) -> impl Iterator<Item = &Properties> {
        self.items.iter().map(|item| &item.properties)
    }
}

/// The component hierarchy of a summary file.
///
/// Columns live in an arena and refer to each other by [`ColumnId`]. The
/// level index built while parsing is kept, so columns of one level can be
/// listed in the order they were read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryTree {
    nodes: Vec<Option<Column>>,
    roots: Vec<ColumnId>,
    levels: IndexMap<u8, Vec<ColumnId>>,
    total: TotalColumn,
}

impl SummaryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column under `parent` (or the root) and index it by level.
    pub fn insert(&mut self, mut column: Column, parent: Option<ColumnId>) -> Result<ColumnId> {
        if let Some(parent_id) = parent {
            self.live(parent_id)?;
        }

        let id = ColumnId(self.nodes.len());
        column.parent = parent;
        column.children.clear();
        let level = column.level;
        self.nodes.push(Some(column));

        match parent {
            Some(parent_id) => self.live_mut(parent_id)?.children.push(id),
            None => self.roots.push(id),
        }
        self.levels.entry(level).or_default().push(id);

        Ok(id)
    }

    pub(crate) fn set_total(&mut self, total: TotalColumn) {
        self.total = total;
    }

    pub fn get(&self, id: ColumnId) -> Option<&Column> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    fn live(&self, id: ColumnId) -> Result<&Column> {
        self.get(id).ok_or(RollupError::UnknownColumn(id.0))
    }

    fn live_mut(&mut self, id: ColumnId) -> Result<&mut Column> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(RollupError::UnknownColumn(id.0))
    }

    /// Level-1 columns in file order.
    pub fn roots(&self) -> &[ColumnId] {
        &self.roots
    }

    pub fn children(&self, id: ColumnId) -> &[ColumnId] {
        self.get(id).map(Column::children).unwrap_or(&[])
    }

    pub fn parent(&self, id: ColumnId) -> Option<ColumnId> {
        self.get(id).and_then(Column::parent)
    }

    /// Every column, depth first, parents before their children.
    pub fn descendants(&self) -> Vec<ColumnId> {
        let mut ids = Vec::with_capacity(self.len());
        for root in &self.roots {
            self.collect_subtree(*root, &mut ids);
        }
        ids
    }

    /// Columns below `id`, depth first, excluding `id` itself.
    pub fn descendants_of(&self, id: ColumnId) -> Vec<ColumnId> {
        let mut ids = Vec::new();
        for child in self.children(id) {
            self.collect_subtree(*child, &mut ids);
        }
        ids
    }

    fn collect_subtree(&self, id: ColumnId, ids: &mut Vec<ColumnId>) {
        ids.push(id);
        for child in self.children(id) {
            self.collect_subtree(*child, ids);
        }
    }

    /// Columns of one level in the order they were built.
    pub fn columns_at(&self, level: u8) -> &[ColumnId] {
        self.levels.get(&level).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Levels present in the tree, ascending.
    pub fn levels(&self) -> Vec<u8> {
        let mut levels: Vec<u8> = self
            .levels
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(level, _)| *level)
            .collect();
        levels.sort_unstable();
        levels
    }

    /// First column of `level` named `name`.
    pub fn find(&self, level: u8, name: &str) -> Option<ColumnId> {
        self.columns_at(level)
            .iter()
            .copied()
            .find(|id| self.get(*id).is_some_and(|column| column.name == name))
    }

    pub fn total(&self) -> &TotalColumn {
        &self.total
    }

    /// Name of the whole structure, as written beside the level-1 columns.
    pub fn root_name(&self) -> Option<&str> {
        self.roots
            .first()
            .and_then(|id| self.get(*id))
            .map(|column| column.level_name.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move every child of `donor` under `receiver`, then drop `donor`.
    ///
    /// Both columns must exist, differ and sit at the same level. The donor's
    /// own items go away with it.
    ///
    /// Moved children keep their `level_name`, which still names the donor.
    /// After a merge the hierarchy is given by the parent ids, not by names.
    pub fn merge_columns(&mut self, receiver: ColumnId, donor: ColumnId) -> Result<()> {
        if receiver == donor {
            return Err(RollupError::InvalidMerge(format!(
                "column {} cannot be merged into itself",
                receiver
            )));
        }

        let receiver_column = self.live(receiver)?;
        let receiver_level = receiver_column.level;
        let receiver_name = receiver_column.name.clone();
        let donor_column = self.live(donor)?;
        if donor_column.level != receiver_level {
            return Err(RollupError::InvalidMerge(format!(
                "'{}' is at level {} but '{}' is at level {}",
                donor_column.name, donor_column.level, receiver_name, receiver_level
            )));
        }

        let donor_column = self.nodes[donor.0]
            .take()
            .ok_or(RollupError::UnknownColumn(donor.0))?;

        for child in &donor_column.children {
            if let Some(Some(node)) = self.nodes.get_mut(child.0) {
                node.parent = Some(receiver);
            }
        }
        self.live_mut(receiver)?.children.extend(donor_column.children);

        match donor_column.parent {
            Some(parent) => {
                if let Some(Some(node)) = self.nodes.get_mut(parent.0) {
                    node.children.retain(|id| *id != donor);
                }
            }
            None => self.roots.retain(|id| *id != donor),
        }
        if let Some(ids) = self.levels.get_mut(&donor_column.level) {
            ids.retain(|id| *id != donor);
        }

        Ok(())
    }
}
