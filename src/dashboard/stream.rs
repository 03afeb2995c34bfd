//! Line-oriented front end for the controller.
//!
//! ```text
//! input lines ──> reader thread ──> events ──> ReactiveController (caller thread)
//!                                                 │
//!                              writer thread <────┘ one JSON bundle per line
//! ```

use super::controller::ReactiveController;
use super::events::{RunStats, SelectionEvent};
use super::logic::{Category, ViewBundle};
use crate::error::{DashboardError, Result};
use crossbeam_channel::{Receiver, Sender};
use std::io::{BufRead, Write};
use std::sync::Arc;

/// Treats every input line as a selection and writes every published bundle
/// to `output` as NDJSON until `input` is exhausted.
///
/// `initial`, when given, is emitted before the first line is handled.
/// Invalid or blank lines are tallied in the returned stats and emit nothing.
///
/// # Errors
///
/// Returns an error if reading `input` or writing `output` fails, or if a
/// worker thread panics.
pub fn serve_lines<R, W>(
    mut controller: ReactiveController,
    input: R,
    output: W,
    initial: Option<Category>,
) -> Result<RunStats>
where
    R: BufRead + Send,
    W: Write + Send,
{
    let views = controller.subscribe();
    let (events_tx, events_rx) = crossbeam_channel::unbounded::<SelectionEvent>();

    std::thread::scope(|scope| {
        let writer = scope.spawn(move || write_bundles(views, output));
        let reader = scope.spawn(move || read_selections(input, &events_tx));

        if let Some(category) = initial {
            controller.handle(&SelectionEvent::selected(category.label()))?;
        }
        let stats = controller.run(&events_rx);
        // Closes the subscriber channel so the writer drains and exits.
        drop(controller);

        reader.join().map_err(|panic| {
            DashboardError::Other(format!("selection reader panicked: {panic:?}"))
        })??;
        writer.join().map_err(|panic| {
            DashboardError::Other(format!("bundle writer panicked: {panic:?}"))
        })??;
        Ok(stats)
    })
}

fn read_selections<R: BufRead>(input: R, events: &Sender<SelectionEvent>) -> Result<()> {
    for line in input.lines() {
        if events.send(SelectionEvent::selected(line?)).is_err() {
            break;
        }
    }
    Ok(())
}

fn write_bundles<W: Write>(views: Receiver<Arc<ViewBundle>>, mut output: W) -> Result<()> {
    for bundle in views {
        serde_json::to_writer(&mut output, &*bundle)?;
        writeln!(output)?;
        output.flush()?;
    }
    Ok(())
}
