//! Editing session over a single study.
//!
//! Every operation that produces a new study replaces the session's copy and
//! then calls the observer with it. A rejected operation leaves the study
//! untouched and does not notify.

use sp_core::{MonthKey, Real};
use sp_period::{PeriodMode, SwitchParams};
use sp_project::Study;
use sp_timeline::DateRange;

use crate::error::AppResult;
use crate::{load_factor_service, period_service};

/// Callback invoked with the new study after each accepted operation.
pub type StudyObserver = Box<dyn FnMut(&Study) -> AppResult<()>>;

pub struct StudySession {
    study: Study,
    observer: Option<StudyObserver>,
    revision: u64,
}

impl StudySession {
    pub fn new(study: Study) -> Self {
        Self {
            study,
            observer: None,
            revision: 0,
        }
    }

    pub fn with_observer(study: Study, observer: StudyObserver) -> Self {
        Self {
            study,
            observer: Some(observer),
            revision: 0,
        }
    }

    pub fn study(&self) -> &Study {
        &self.study
    }

    pub fn into_study(self) -> Study {
        self.study
    }

    /// Number of accepted operations so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn switch_mode(&mut self, target: PeriodMode, params: SwitchParams) -> AppResult<()> {
        let next = period_service::switch_study_mode(&self.study, target, params)?;
        self.commit(next)
    }

    pub fn set_simulation_years(&mut self, simulation_years: u32) -> AppResult<()> {
        let next = period_service::set_study_years(&self.study, simulation_years)?;
        self.commit(next)
    }

    pub fn set_period(&mut self, period: DateRange) -> AppResult<()> {
        let next = period_service::set_study_period(&self.study, period)?;
        self.commit(next)
    }

    pub fn set_override(
        &mut self,
        route_id: &str,
        class: &str,
        key: MonthKey,
        value: Real,
    ) -> AppResult<()> {
        let next =
            load_factor_service::set_study_override(&self.study, route_id, class, key, value)?;
        self.commit(next)
    }

    pub fn clear_override(&mut self, route_id: &str, class: &str, key: MonthKey) -> AppResult<()> {
        let next = load_factor_service::clear_study_override(&self.study, route_id, class, key)?;
        self.commit(next)
    }

    pub fn delete_route(&mut self, route_id: &str) -> AppResult<()> {
        let next = load_factor_service::delete_route(&self.study, route_id)?;
        self.commit(next)
    }

    pub fn remove_cabin_class(&mut self, class: &str) -> AppResult<()> {
        let next = load_factor_service::remove_cabin_class(&self.study, class)?;
        self.commit(next)
    }

    /// Adopt `next` and notify. An observer error is returned, but the new
    /// study stays in place.
    fn commit(&mut self, next: Study) -> AppResult<()> {
        self.study = next;
        self.revision += 1;
        match self.observer.as_mut() {
            Some(observer) => observer(&self.study),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for StudySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StudySession")
            .field("study", &self.study.name)
            .field("revision", &self.revision)
            .field("observed", &self.observer.is_some())
            .finish()
    }
}
