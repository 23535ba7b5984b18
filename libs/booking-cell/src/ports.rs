use crate::models::AppointmentDraft;

/// External navigation capability. Platform-specific behavior (user-agent
/// quirks, popup handling) lives behind implementations, never in the
/// booking logic. The return value is a best-effort success signal: `false`
/// means the navigation visibly did not happen.
pub trait NavigationPort: Send + Sync {
    fn open_external(&self, url: &str) -> bool;
}

/// Draft persistence across page reloads. Injected so the form logic stays
/// storage-agnostic.
pub trait DraftStorage: Send + Sync {
    fn load(&self) -> Option<AppointmentDraft>;
    fn save(&self, draft: &AppointmentDraft);
    fn clear(&self);
}

/// In-memory draft storage, used in tests and as a no-persistence default.
#[derive(Default)]
pub struct InMemoryDraftStorage {
    draft: std::sync::Mutex<Option<AppointmentDraft>>,
}

impl DraftStorage for InMemoryDraftStorage {
    fn load(&self) -> Option<AppointmentDraft> {
        self.draft.lock().expect("storage lock").clone()
    }

    fn save(&self, draft: &AppointmentDraft) {
        *self.draft.lock().expect("storage lock") = Some(draft.clone());
    }

    fn clear(&self) {
        *self.draft.lock().expect("storage lock") = None;
    }
}
