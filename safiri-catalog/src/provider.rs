use chrono::{DateTime, Utc};
use safiri_core::{Actor, CoreError, CoreResult};
use safiri_shared::slugify;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tour operator, hotel or activity business selling through the
/// marketplace. Owned by exactly one operator account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceProvider {
    pub id: Uuid,
    /// Operator account that owns this provider profile.
    pub operator_id: Uuid,
    pub company_name: String,
    pub slug: String,
    pub description: String,
    pub contact_email: String,
    pub contact_phone: String,
    pub website: Option<String>,
    pub address: String,
    pub business_registration_number: Option<String>,
    pub tax_id: Option<String>,
    pub destination_id: Uuid,
    pub is_approved: bool,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ServiceProvider {
    pub fn new(
        operator_id: Uuid,
        company_name: impl Into<String>,
        contact_email: impl Into<String>,
        destination_id: Uuid,
    ) -> Self {
        let company_name = company_name.into();
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            operator_id,
            slug: slugify(&company_name),
            company_name,
            description: String::new(),
            contact_email: contact_email.into(),
            contact_phone: String::new(),
            website: None,
            address: String::new(),
            business_registration_number: None,
            tax_id: None,
            destination_id,
            is_approved: false,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Admin approval gate; providers cannot approve themselves.
    pub fn approve(&mut self, actor: &Actor) -> CoreResult<()> {
        if !actor.is_admin() {
            return Err(CoreError::Forbidden(
                "only admins may approve providers".into(),
            ));
        }
        self.is_approved = true;
        self.updated_at = Utc::now();
        tracing::info!(provider = %self.id, "provider approved");
        Ok(())
    }

    pub fn update_contact(
        &mut self,
        actor: &Actor,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> CoreResult<()> {
        if !actor.owns_or_admin(self.operator_id) {
            return Err(CoreError::Forbidden(
                "only the owning operator may edit this provider".into(),
            ));
        }
        self.contact_email = email.into();
        self.contact_phone = phone.into();
        self.updated_at = Utc::now();
        Ok(())
    }
}
