use safiri_shared::UserRole;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated principal handed in by the external identity provider.
///
/// The core never consults a global "current user"; every mutating
/// operation takes the acting principal explicitly so ownership checks
/// are visible at the call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub role: UserRole,
}

impl Actor {
    pub fn new(id: Uuid, role: UserRole) -> Self {
        Self { id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Admins may act on any resource; everyone else only on their own.
    pub fn owns_or_admin(&self, owner_id: Uuid) -> bool {
        self.is_admin() || self.id == owner_id
    }
}
