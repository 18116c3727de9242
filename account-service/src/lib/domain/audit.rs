use chrono::DateTime;
use chrono::Utc;

/// The caller on whose behalf a write is performed.
///
/// Built by the inbound layer from the bearer token and handed to every
/// persistence write, which stamps it into the record's audit trail.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActorContext {
    pub name: Option<String>,
    pub role: Option<String>,
}

impl ActorContext {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            role: Some(role.into()),
        }
    }

    /// Actor for writes with no authenticated caller (bootstrap, maintenance).
    pub fn system() -> Self {
        Self::default()
    }
}

/// Creation and modification stamps of a persisted record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditTrail {
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub created_by_role: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
}

impl AuditTrail {
    /// Stamps for a record being added.
    pub fn created(actor: &ActorContext, at: DateTime<Utc>) -> Self {
        Self {
            created_at: at,
            created_by: actor.name.clone(),
            created_by_role: actor.role.clone(),
            modified_at: None,
            modified_by: None,
        }
    }

    /// Record a modification. Creation stamps are left untouched.
    pub fn touch(&mut self, actor: &ActorContext, at: DateTime<Utc>) {
        self.modified_at = Some(at);
        self.modified_by = actor.name.clone();
    }
}
