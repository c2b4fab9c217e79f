use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Table column descriptor. Also used to describe the columns of aggregated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub key: String,

    pub label: String,

    #[serde(default = "default_sortable")]
    pub sortable: bool,
}

fn default_sortable() -> bool {
    true
}

impl ColumnSpec {
    pub fn new<K: Into<String>, L: Into<String>>(key: K, label: L) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            sortable: true,
        }
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// Current sort of a table. No key means rows keep their input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    pub fn new<K: Into<String>>(key: K, direction: SortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }

    /// State after a header click on `column`.
    ///
    /// Clicking the active column flips the direction, clicking another column sorts it
    /// ascending, and clicking a non-sortable column changes nothing.
    pub fn toggle(&self, column: &ColumnSpec) -> SortState {
        if !column.sortable {
            return self.clone();
        }
        if self.key.as_deref() == Some(column.key.as_str()) {
            SortState {
                key: self.key.clone(),
                direction: self.direction.reversed(),
            }
        } else {
            SortState::new(column.key.clone(), SortDirection::Asc)
        }
    }
}
