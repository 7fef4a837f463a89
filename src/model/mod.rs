//! Pure data structures (DTOs) for the five portfolio resources.
//!
//! Every record is delivered wholesale by the API and never mutated by the client.
//! Optional URL fields are `None` when a record has no such link; renderers omit
//! the matching affordance instead of treating it as an error.

pub mod education;
pub mod experience;
pub mod profile;
pub mod project;
pub mod technology;

pub use education::*;
pub use experience::*;
pub use profile::*;
pub use project::*;
pub use technology::*;
