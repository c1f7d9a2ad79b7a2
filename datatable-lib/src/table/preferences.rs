//! User column layout: visibility and order.

use serde::Deserialize;
use serde::Serialize;

use super::Column;

/// Saved visibility and position of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnPreference {
    pub id: String,
    pub visible: bool,
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ColumnMeta {
    id: String,
    hideable: bool,
}

/// Column visibility and order for a table.
///
/// Non-hideable columns are always visible, and the last visible column
/// cannot be hidden while any column is hideable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    columns: Vec<ColumnMeta>,
    defaults: Vec<ColumnPreference>,
    preferences: Vec<ColumnPreference>,
}

impl ColumnLayout {
    /// Builds the layout from column definitions, with optional default overrides.
    pub fn new<R>(columns: &[Column<R>], defaults: Option<&[ColumnPreference]>) -> Self {
        let metas: Vec<ColumnMeta> = columns
            .iter()
            .map(|c| ColumnMeta {
                id: c.key().to_string(),
                hideable: c.is_hideable(),
            })
            .collect();

        let mut initial: Vec<ColumnPreference> = columns
            .iter()
            .enumerate()
            .map(|(index, c)| {
                let base = ColumnPreference {
                    id: c.key().to_string(),
                    visible: c.is_default_visible() || !c.is_hideable(),
                    order: index,
                };
                match defaults.and_then(|d| d.iter().find(|p| p.id == base.id)) {
                    Some(saved) => ColumnPreference {
                        visible: saved.visible || !c.is_hideable(),
                        order: saved.order,
                        ..base
                    },
                    None => base,
                }
            })
            .collect();
        initial.sort_by_key(|p| p.order);

        Self {
            columns: metas,
            preferences: initial.clone(),
            defaults: initial,
        }
    }

    /// Current preferences in display order.
    pub fn preferences(&self) -> &[ColumnPreference] {
        &self.preferences
    }

    pub fn defaults(&self) -> &[ColumnPreference] {
        &self.defaults
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.preferences.iter().any(|p| p.id == id && p.visible)
    }

    pub fn visible_count(&self) -> usize {
        self.preferences
            .iter()
            .filter(|p| p.visible || !self.is_hideable(&p.id))
            .count()
    }

    fn is_hideable(&self, id: &str) -> bool {
        self.columns.iter().any(|c| c.id == id && c.hideable)
    }

    fn minimum_visible(&self) -> usize {
        if self.columns.iter().any(|c| c.hideable) { 1 } else { 0 }
    }

    /// Flips a column's visibility.
    ///
    /// Returns `false` when the toggle was refused: unknown or non-hideable
    /// column, or hiding the last visible column.
    pub fn toggle(&mut self, id: &str) -> bool {
        let Some(meta) = self.columns.iter().find(|c| c.id == id) else {
            return false;
        };
        if !meta.hideable {
            return false;
        }
        let currently_visible = self.is_visible(id);
        if currently_visible && self.visible_count() <= self.minimum_visible() {
            return false;
        }

        let next: Vec<ColumnPreference> = self
            .preferences
            .iter()
            .map(|p| ColumnPreference {
                visible: if p.id == id {
                    !p.visible
                } else {
                    p.visible || !self.is_hideable(&p.id)
                },
                ..p.clone()
            })
            .collect();
        self.apply(next);
        true
    }

    /// Moves the column at display position `from` to position `to`.
    pub fn move_column(&mut self, from: usize, to: usize) {
        if from >= self.preferences.len() || to >= self.preferences.len() {
            return;
        }
        let mut items = self.preferences.clone();
        let moved = items.remove(from);
        items.insert(to, moved);
        self.apply(items);
    }

    /// Restores the default layout.
    pub fn reset(&mut self) {
        self.preferences = self.defaults.clone();
    }

    /// Replaces the layout with saved preferences.
    ///
    /// Entries are renumbered in the given order and entries for unknown
    /// columns are dropped. Columns without an entry keep their current
    /// preference and are appended.
    pub fn apply(&mut self, next: Vec<ColumnPreference>) {
        let mut normalized: Vec<ColumnPreference> = next
            .into_iter()
            .filter(|p| self.columns.iter().any(|c| c.id == p.id))
            .collect();
        for current in &self.preferences {
            if !normalized.iter().any(|p| p.id == current.id) {
                normalized.push(current.clone());
            }
        }
        for (index, pref) in normalized.iter_mut().enumerate() {
            pref.order = index;
            if !self.is_hideable(&pref.id) {
                pref.visible = true;
            }
        }
        self.preferences = normalized;
    }

    /// Returns the visible columns in display order.
    pub fn visible_columns<'c, R>(&self, columns: &'c [Column<R>]) -> Vec<&'c Column<R>> {
        self.preferences
            .iter()
            .filter(|p| p.visible)
            .filter_map(|p| columns.iter().find(|c| c.key() == p.id))
            .collect()
    }
}
