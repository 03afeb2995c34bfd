use super::events::{ControllerState, RunStats, SelectionEvent};
use super::logic::{
    AggregationOptions, Category, Dataset, ViewBundle, compute_all, emit_views, subset_of,
};
use crate::error::Result;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;

/// Ties one selection input to the six derived views.
///
/// Each event is handled to completion before the next one. A cycle either
/// publishes all six payloads or publishes nothing, so subscribers and
/// [`current`](Self::current) only ever see whole bundles.
pub struct ReactiveController {
    dataset: Dataset,
    options: AggregationOptions,
    state: ControllerState,
    current: Option<Arc<ViewBundle>>,
    subscribers: Vec<Sender<Arc<ViewBundle>>>,
}

impl ReactiveController {
    pub fn new(dataset: Dataset, options: AggregationOptions) -> Self {
        Self {
            dataset,
            options,
            state: ControllerState::Idle,
            current: None,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// Last successfully emitted bundle.
    pub fn current(&self) -> Option<&Arc<ViewBundle>> {
        self.current.as_ref()
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Registers a new listener for emitted bundles.
    pub fn subscribe(&mut self) -> Receiver<Arc<ViewBundle>> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Handles one selection change.
    ///
    /// Returns `Ok(None)` when the selection is empty: nothing is recomputed or
    /// emitted.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::InvalidCategory`](crate::error::DashboardError::InvalidCategory)
    /// for values outside the six categories. The previous bundle stays current.
    pub fn handle(&mut self, event: &SelectionEvent) -> Result<Option<Arc<ViewBundle>>> {
        let Some(value) = event.effective_value() else {
            tracing::debug!("Empty selection, update suppressed");
            return Ok(None);
        };

        self.state = ControllerState::Recomputing;
        let start = std::time::Instant::now();
        let result = self.recompute(value);
        self.state = ControllerState::Idle;

        match result {
            Ok(bundle) => {
                let bundle = Arc::new(bundle);
                self.current = Some(Arc::clone(&bundle));
                self.publish(&bundle);
                tracing::info!(
                    category = %bundle.category,
                    elapsed_us = start.elapsed().as_micros() as u64,
                    "Views recomputed"
                );
                Ok(Some(bundle))
            }
            Err(e) => {
                tracing::warn!(selection = value, error = %e, "Recompute aborted, keeping previous views");
                Err(e)
            }
        }
    }

    /// Drains `events` until every sender is dropped, recovering from
    /// per-selection errors.
    pub fn run(&mut self, events: &Receiver<SelectionEvent>) -> RunStats {
        let mut stats = RunStats::default();
        for event in events {
            stats.handled += 1;
            match self.handle(&event) {
                Ok(Some(_)) => stats.emitted += 1,
                Ok(None) => stats.suppressed += 1,
                Err(_) => stats.failed += 1,
            }
        }
        tracing::debug!(?stats, "Selection stream closed");
        stats
    }

    fn recompute(&self, value: &str) -> Result<ViewBundle> {
        let category: Category = value.parse()?;
        let subset = subset_of(self.dataset.records(), category);
        let aggregates = compute_all(&subset, &self.options);
        Ok(emit_views(category, &aggregates, &self.options))
    }

    fn publish(&mut self, bundle: &Arc<ViewBundle>) {
        self.subscribers
            .retain(|tx| tx.send(Arc::clone(bundle)).is_ok());
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::unwrap_used)]

    use super::*;
    use crate::dashboard::logic::{Category, Gender, LaureateRecord};
    use crate::error::DashboardError;

    fn record(category: Category, gender: Gender, country: &str) -> LaureateRecord {
        LaureateRecord::new(
            category,
            gender,
            Some(country.to_owned()),
            Some(country.to_owned()),
            Some(country.to_owned()),
            None,
            None,
            vec![format!("{country} University, Somewhere")],
        )
    }

    fn controller() -> ReactiveController {
        let dataset = Dataset::from_records(vec![
            record(Category::Physics, Gender::Male, "USA"),
            record(Category::Physics, Gender::Female, "France"),
            record(Category::Peace, Gender::Female, "Kenya"),
        ]);
        ReactiveController::new(dataset, AggregationOptions::default())
    }

    #[test]
    fn test_empty_selection_is_suppressed() {
        let mut ctl = controller();
        let rx = ctl.subscribe();

        assert!(ctl.handle(&SelectionEvent::cleared()).unwrap().is_none());
        assert!(ctl.handle(&SelectionEvent::selected("   ")).unwrap().is_none());
        assert!(ctl.current().is_none());
        assert!(rx.try_recv().is_err(), "nothing should be published");
    }

    #[test]
    fn test_empty_selection_keeps_previous_views() {
        let mut ctl = controller();
        let first = ctl
            .handle(&SelectionEvent::selected("Physics"))
            .unwrap()
            .expect("emitted");

        assert!(ctl.handle(&SelectionEvent::cleared()).unwrap().is_none());
        assert!(Arc::ptr_eq(ctl.current().unwrap(), &first));
    }

    #[test]
    fn test_valid_selection_publishes_bundle() {
        let mut ctl = controller();
        let rx = ctl.subscribe();

        let bundle = ctl
            .handle(&SelectionEvent::selected("Physics"))
            .unwrap()
            .expect("emitted");

        assert_eq!(bundle.category, Category::Physics);
        assert_eq!(ctl.state(), ControllerState::Idle);
        let received = rx.try_recv().expect("subscriber notified");
        assert!(Arc::ptr_eq(&received, &bundle));
        assert_eq!(received.gender_counts.rows.len(), 2);
    }

    #[test]
    fn test_invalid_category_keeps_prior_state() {
        let mut ctl = controller();
        let rx = ctl.subscribe();
        let first = ctl
            .handle(&SelectionEvent::selected("Peace"))
            .unwrap()
            .expect("emitted");
        rx.try_recv().expect("first bundle");

        let err = ctl
            .handle(&SelectionEvent::selected("Mathematics"))
            .expect_err("unknown category");

        assert!(matches!(err, DashboardError::InvalidCategory(ref v) if v == "Mathematics"));
        assert_eq!(ctl.state(), ControllerState::Idle);
        assert!(Arc::ptr_eq(ctl.current().unwrap(), &first));
        assert!(rx.try_recv().is_err(), "no partial emission");
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let mut ctl = controller();
        let kept = ctl.subscribe();
        drop(ctl.subscribe());

        ctl.handle(&SelectionEvent::selected("Physics")).unwrap();
        assert_eq!(ctl.subscribers.len(), 1);
        assert!(kept.try_recv().is_ok());
    }

    #[test]
    fn test_run_drains_event_stream() {
        let mut ctl = controller();
        let views = ctl.subscribe();
        let (tx, rx) = crossbeam_channel::unbounded();

        for event in [
            SelectionEvent::selected("Physics"),
            SelectionEvent::cleared(),
            SelectionEvent::selected("Astrology"),
            SelectionEvent::selected("Peace"),
        ] {
            tx.send(event).unwrap();
        }
        drop(tx);

        let stats = ctl.run(&rx);
        assert_eq!(
            stats,
            RunStats {
                handled: 4,
                emitted: 2,
                suppressed: 1,
                failed: 1,
            }
        );

        let categories: Vec<Category> = views.try_iter().map(|b| b.category).collect();
        assert_eq!(categories, vec![Category::Physics, Category::Peace]);
        assert_eq!(ctl.current().unwrap().category, Category::Peace);
    }

    #[test]
    fn test_recompute_is_byte_identical() {
        let mut ctl = controller();
        let a = ctl.handle(&SelectionEvent::selected("Physics")).unwrap().unwrap();
        let b = ctl.handle(&SelectionEvent::selected("Physics")).unwrap().unwrap();

        assert_eq!(
            serde_json::to_vec(&*a).unwrap(),
            serde_json::to_vec(&*b).unwrap()
        );
    }
}
