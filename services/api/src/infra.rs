use chrono::NaiveDate;
use crew_match::workflows::matching::{
    CandidateId, CandidateProfile, CandidateSource, OfferError, OfferIntent, OfferPublisher,
    SourceError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, RwLock};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateSource {
    candidates: Arc<RwLock<Vec<CandidateProfile>>>,
}

impl InMemoryCandidateSource {
    pub(crate) fn with_candidates(candidates: Vec<CandidateProfile>) -> Self {
        Self {
            candidates: Arc::new(RwLock::new(candidates)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.candidates
            .read()
            .map(|guard| guard.len())
            .unwrap_or_default()
    }
}

impl CandidateSource for InMemoryCandidateSource {
    fn candidates(&self) -> Result<Vec<CandidateProfile>, SourceError> {
        let guard = self
            .candidates
            .read()
            .map_err(|_| SourceError::Unavailable("roster lock poisoned".to_string()))?;
        Ok(guard.clone())
    }

    fn candidate(&self, id: &CandidateId) -> Result<Option<CandidateProfile>, SourceError> {
        let guard = self
            .candidates
            .read()
            .map_err(|_| SourceError::Unavailable("roster lock poisoned".to_string()))?;
        Ok(guard.iter().find(|candidate| &candidate.id == id).cloned())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryOfferPublisher {
    events: Arc<Mutex<Vec<OfferIntent>>>,
}

impl OfferPublisher for InMemoryOfferPublisher {
    fn publish(&self, offer: OfferIntent) -> Result<(), OfferError> {
        let mut guard = self
            .events
            .lock()
            .map_err(|_| OfferError::Transport("offer outbox poisoned".to_string()))?;
        guard.push(offer);
        Ok(())
    }
}

impl InMemoryOfferPublisher {
    pub(crate) fn events(&self) -> Vec<OfferIntent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
