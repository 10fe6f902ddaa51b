//! Simulation core: the events feed, the mutation engine, the scheduler and
//! the owned simulation state that ties them together.

pub mod events;
pub mod metrics;
pub mod mutation;
pub mod schedule;
pub mod state;

pub use events::{DEFAULT_EVENT_CAPACITY, EventLog};
pub use metrics::sample_metrics;
pub use mutation::{MutationConfig, MutationEngine, TickReport};
pub use schedule::{Scheduler, TaskHandle};
pub use state::{Simulation, rng_from_seed};
