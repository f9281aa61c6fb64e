//! SOCD (simultaneous opposite cardinal direction) resolution.
//!
//! A digital controller can report two physically opposed directions at once,
//! which no analog stick can. [`SocdResolver`] turns such a snapshot into one in
//! which at most one direction of every configured [`SocdPair`] is held, using
//! the pair's [`SocdPolicy`].
//!
//! The resolver is the only stateful piece of the input pipeline: it remembers,
//! per pair, the previous raw state of both directions and which one currently
//! has priority. Memory is driven by press edges only, so resolving the same
//! snapshot twice in a row yields the same result.
//!
//! # Example
//!
//! ```
//! use openframe_socd::{SocdPair, SocdPolicy, SocdResolver};
//! use openframe_state::{InputState, LogicalButton};
//!
//! let mut resolver = SocdResolver::new(SocdPair::standard(SocdPolicy::SecondInputPriority))?;
//! let _left_only = resolver.resolve(&InputState::from_buttons(&[LogicalButton::Left]));
//! let both = InputState::from_buttons(&[LogicalButton::Left, LogicalButton::Right]);
//! let resolved = resolver.resolve(&both);
//! assert!(resolved.is_pressed(LogicalButton::Right));
//! assert!(!resolved.is_pressed(LogicalButton::Left));
//! # Ok::<(), openframe_socd::SocdError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(clippy::unwrap_used)]

pub mod pair;
pub mod policy;
pub mod resolver;

pub use pair::SocdPair;
pub use policy::SocdPolicy;
pub use resolver::SocdResolver;

use openframe_state::LogicalButton;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SocdError {
    #[error("SOCD pair opposes {0} with itself")]
    DegeneratePair(LogicalButton),

    #[error("{0} belongs to more than one SOCD pair")]
    OverlappingPairs(LogicalButton),

    #[error("Unknown SOCD policy: {0}")]
    UnknownPolicy(String),
}

pub type SocdResult<T> = Result<T, SocdError>;
