//! Planned row changes for one menu

use uuid::Uuid;

use super::menu_item::MenuItem;

/// The outcome of planning a menu write: the exact rows to insert, update and
/// delete. Planned in memory by the services, applied by the item repository
/// inside a single transaction.
///
/// `inserts` is in pre-order: every parent precedes its children, so the
/// storage layer can apply it front to back without violating referential
/// integrity.
#[derive(Debug, Clone, Default)]
pub struct MenuChangeSet {
    pub inserts: Vec<MenuItem>,
    pub updates: Vec<MenuItem>,
    pub deletes: Vec<Uuid>,
}

impl MenuChangeSet {
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }
}
