use crate::error::FetchError;
use crate::fetcher::ResultsFetcher;
use crate::state::{ViewSnapshot, ViewState};
use core_types::{QueryParameters, ResultRecord};
use tokio::sync::watch;

/// Identifies one issued fetch: the generation it belongs to and the
/// parameters it was issued for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    parameters: QueryParameters,
}

impl FetchTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn parameters(&self) -> &QueryParameters {
        &self.parameters
    }
}

/// The loading/loaded/failed state machine behind the results table.
///
/// `Loading` is entered on every parameter change, and only the resolution of the
/// latest ticket may move the session to `Loaded` or `Failed`. Older tickets that
/// resolve late are dropped. There is no terminal state and no timeout: a fetch
/// that never resolves leaves the session `Loading`.
pub struct ViewSession {
    fetcher: ResultsFetcher,
    state: watch::Sender<ViewSnapshot>,
}

impl ViewSession {
    pub fn new(fetcher: ResultsFetcher) -> Self {
        let (state, _) = watch::channel(ViewSnapshot::initial());
        Self { fetcher, state }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> ViewSnapshot {
        self.state.borrow().clone()
    }

    /// Subscribes to every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<ViewSnapshot> {
        self.state.subscribe()
    }

    /// Records new parameters and returns the ticket for the fetch they require.
    ///
    /// The session is `Loading` when this returns a ticket. Returns `None` when the
    /// parameters equal those of the latest fetch, in which case nothing changes.
    pub fn set_parameters(&self, parameters: QueryParameters) -> Option<FetchTicket> {
        let mut ticket = None;
        self.state.send_if_modified(|snapshot| {
            if snapshot.parameters.as_ref() == Some(&parameters) {
                return false;
            }
            ticket = Some(begin(snapshot, parameters));
            true
        });

        if let Some(ticket) = &ticket {
            tracing::info!(
                generation = ticket.generation,
                name_filter = ticket.parameters.name_filter(),
                page_size = %ticket.parameters.page_size(),
                "Issuing results fetch."
            );
        }
        ticket
    }

    /// Re-issues the current parameters under a new generation.
    ///
    /// Returns `None` if no parameters have been set yet.
    pub fn refresh(&self) -> Option<FetchTicket> {
        let mut ticket = None;
        self.state.send_if_modified(|snapshot| match snapshot.parameters.clone() {
            Some(parameters) => {
                ticket = Some(begin(snapshot, parameters));
                true
            }
            None => false,
        });

        if let Some(ticket) = &ticket {
            tracing::info!(generation = ticket.generation, "Reloading results.");
        }
        ticket
    }

    /// Applies the outcome of a fetch if `ticket` is still the latest one.
    ///
    /// Returns `false` when the outcome was discarded as stale.
    pub fn resolve(
        &self,
        ticket: &FetchTicket,
        outcome: Result<Vec<ResultRecord>, FetchError>,
    ) -> bool {
        let applied = self.state.send_if_modified(|snapshot| {
            if snapshot.generation != ticket.generation || !snapshot.state.is_loading() {
                return false;
            }
            snapshot.state = match outcome {
                Ok(records) => ViewState::Loaded { records },
                Err(e) => ViewState::Failed { message: e.message },
            };
            true
        });

        if !applied {
            tracing::debug!(
                generation = ticket.generation,
                current = self.state.borrow().generation,
                "Discarding stale results."
            );
        }
        applied
    }

    /// Fetches for `ticket` and resolves it. Returns whether the result was applied.
    pub async fn run(&self, ticket: FetchTicket) -> bool {
        let outcome = self.fetcher.fetch(&ticket.parameters).await;
        self.resolve(&ticket, outcome)
    }

    /// Sets `parameters`, waits for the resulting fetch, and returns the snapshot.
    ///
    /// If the parameters are unchanged no fetch is issued and the current snapshot
    /// is returned as is.
    pub async fn apply(&self, parameters: QueryParameters) -> ViewSnapshot {
        if let Some(ticket) = self.set_parameters(parameters) {
            self.run(ticket).await;
        }
        self.snapshot()
    }
}

fn begin(snapshot: &mut ViewSnapshot, parameters: QueryParameters) -> FetchTicket {
    snapshot.generation += 1;
    snapshot.parameters = Some(parameters.clone());
    snapshot.state = ViewState::Loading;
    FetchTicket {
        generation: snapshot.generation,
        parameters,
    }
}
