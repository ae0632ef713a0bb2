//! Editing session orchestration.
//!
//! One [`EditorSession`] per tenant per edit session: it owns the canonical
//! model exclusively (single-writer model), funnels every change through
//! the merge engine, and hands each resulting snapshot to the synchronizer.
//! The model is never shared across concurrent sessions for the same
//! tenant.

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::instrument;

use vitrine_core::model::{Appointment, Inquiry, ShopConfig};
use vitrine_core::types::{LeadStatus, RecordId, TenantKey};

use crate::backend::DocumentBackend;
use crate::error::StoreError;
use crate::merge::{self, ShopPatch};
use crate::normalize;
use crate::sync::{self, SyncEvent, SyncHandle, SyncOptions, SyncState};

/// A live editing session for one tenant's shop configuration.
pub struct EditorSession {
    tenant: TenantKey,
    config: ShopConfig,
    sync: SyncHandle,
}

impl EditorSession {
    /// Open a session: read and normalize the stored document, or start
    /// from defaults when no document exists yet (an unknown tenant is not
    /// an error; the first save inserts).
    ///
    /// Returns the session and the stream of save/failure events for the
    /// caller's notification surface.
    ///
    /// # Errors
    ///
    /// Returns an error only if the initial read fails; a missing document
    /// does not.
    #[instrument(skip(backend, options), fields(tenant = %tenant))]
    pub async fn open<B: DocumentBackend>(
        backend: B,
        tenant: TenantKey,
        options: SyncOptions,
    ) -> Result<(Self, mpsc::UnboundedReceiver<SyncEvent>), StoreError> {
        let raw = backend.read(&tenant).await?;
        let exists = raw.is_some();
        let config = raw.map_or_else(ShopConfig::defaults, |doc| normalize::normalize(&doc));

        let (sync, events) = sync::spawn(backend, tenant.clone(), exists, options);

        Ok((
            Self {
                tenant,
                config,
                sync,
            },
            events,
        ))
    }

    /// The tenant this session edits.
    #[must_use]
    pub const fn tenant(&self) -> &TenantKey {
        &self.tenant
    }

    /// The current canonical model.
    #[must_use]
    pub const fn config(&self) -> &ShopConfig {
        &self.config
    }

    /// Current synchronizer state.
    #[must_use]
    pub fn sync_state(&self) -> SyncState {
        self.sync.state()
    }

    /// Apply a partial update and schedule a (debounced) save.
    pub fn apply(&mut self, patch: ShopPatch) {
        self.config = merge::apply(&self.config, patch);
        self.sync.submit(self.config.clone());
    }

    /// Reset the seller-editable groups to defaults, preserving identity,
    /// auxiliary flags, leads and stats.
    pub fn restore_defaults(&mut self) {
        let fresh = ShopConfig::defaults();
        self.config = ShopConfig {
            identity: self.config.identity.clone(),
            aux: self.config.aux.clone(),
            leads: self.config.leads.clone(),
            stats: self.config.stats,
            ..fresh
        };
        self.sync.submit(self.config.clone());
    }

    /// Buyer-side append of an inquiry. Returns the assigned ID.
    pub fn record_inquiry(
        &mut self,
        name: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
    ) -> RecordId {
        let inquiry = Inquiry {
            id: RecordId::generate(),
            name: name.into(),
            phone: phone.into(),
            message: message.into(),
            status: LeadStatus::New,
            created_at: Utc::now(),
        };
        let id = inquiry.id.clone();
        self.config.leads.inquiries.push(inquiry);
        self.sync.submit(self.config.clone());
        id
    }

    /// Buyer-side append of an appointment request. Returns the assigned ID.
    pub fn record_appointment(
        &mut self,
        name: impl Into<String>,
        phone: impl Into<String>,
        service: impl Into<String>,
        scheduled_for: Option<chrono::DateTime<Utc>>,
    ) -> RecordId {
        let appointment = Appointment {
            id: RecordId::generate(),
            name: name.into(),
            phone: phone.into(),
            service: service.into(),
            scheduled_for,
            status: LeadStatus::New,
            created_at: Utc::now(),
        };
        let id = appointment.id.clone();
        self.config.leads.appointments.push(appointment);
        self.sync.submit(self.config.clone());
        id
    }

    /// Seller-side status change for an inquiry. Returns false when the ID
    /// is unknown.
    pub fn set_inquiry_status(&mut self, id: &RecordId, status: LeadStatus) -> bool {
        let Some(inquiry) = self
            .config
            .leads
            .inquiries
            .iter_mut()
            .find(|i| &i.id == id)
        else {
            return false;
        };
        inquiry.status = status;
        self.sync.submit(self.config.clone());
        true
    }

    /// Seller-side status change for an appointment. Returns false when the
    /// ID is unknown.
    pub fn set_appointment_status(&mut self, id: &RecordId, status: LeadStatus) -> bool {
        let Some(appointment) = self
            .config
            .leads
            .appointments
            .iter_mut()
            .find(|a| &a.id == id)
        else {
            return false;
        };
        appointment.status = status;
        self.sync.submit(self.config.clone());
        true
    }
}
