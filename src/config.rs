use crate::domain::record::EntityKind;
use std::collections::HashMap;
use std::env;

/// Collection name for each entity kind.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    tables: HashMap<EntityKind, String>,
}

impl Default for TableConfig {
    fn default() -> Self {
        let tables = EntityKind::ALL
            .into_iter()
            .map(|kind| (kind, kind.default_collection()))
            .collect();
        Self { tables }
    }
}

impl TableConfig {
    /// Reads `<KIND>_TABLE` for every kind, e.g. `DOOR_TABLE`.
    ///
    /// Unset or blank variables fall back to the lowercase kind name.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        for kind in EntityKind::ALL {
            if let Some(name) = lookup(&kind.table_env_var()).filter(|v| !v.trim().is_empty()) {
                config.tables.insert(kind, name.trim().to_string());
            }
        }
        config
    }

    pub fn with_table(mut self, kind: EntityKind, name: impl Into<String>) -> Self {
        self.tables.insert(kind, name.into());
        self
    }

    pub fn table(&self, kind: EntityKind) -> String {
        self.tables
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| kind.default_collection())
    }

    /// Distinct configured collection names, in kind order.
    ///
    /// Kinds configured onto the same table yield that name once.
    pub fn collections(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for kind in EntityKind::ALL {
            let name = self.table(kind);
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}
