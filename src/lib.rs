//! # Laureate Dashboard
//!
//! Turns a static table of Nobel laureate records into six category-scoped
//! aggregate views, recomputed whenever a different award category is selected.
//!
//! ## Quick Start
//!
//! ```no_run
//! use laureate_dashboard::dashboard::logic::{LoadOptions, AggregationOptions, load_dataset};
//! use laureate_dashboard::dashboard::{ReactiveController, SelectionEvent};
//!
//! # fn example() -> laureate_dashboard::error::Result<()> {
//! let dataset = load_dataset("laureates.csv".as_ref(), LoadOptions::default())?;
//! let mut controller = ReactiveController::new(dataset, AggregationOptions::default());
//! let views = controller.subscribe();
//!
//! controller.handle(&SelectionEvent::selected("Physics"))?;
//! let bundle = views.recv().expect("bundle published");
//! println!("{}", bundle.top_affiliations.title);
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`dashboard::logic`]: loading, aggregation and payload formatting
//! - [`dashboard::controller`]: the selection-driven recompute cycle
//! - [`config`]: persisted settings
//! - [`export`]: CSV/JSON output of emitted bundles
//! - [`error`]: error types and handling utilities
//! - [`logging`]: tracing setup
//!
//! ## Snapshot Sharing
//!
//! [`Dataset`](dashboard::logic::Dataset) is loaded once and never mutated.
//! Clones share one allocation, so any number of controllers, possibly on
//! different threads, read it without locks.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod logging;
