pub mod candidate;
pub mod domain;
pub mod error;
pub mod extract;
pub mod features;
pub mod fetch;
pub mod pipeline;
pub mod probe;
pub mod rank;
pub mod score;

pub use candidate::{Candidate, CandidateKind, FeatureSet, Logo, LookupOutcome};
pub use domain::normalize_domain;
pub use error::{FetchError, LookupError};
pub use fetch::{HttpPageSource, PageSource};
pub use pipeline::{FinderConfig, LogoFinder, LookupStrategy};
pub use probe::{HttpImageProbe, ImageDimensions, ImageProbe};
pub use score::{AspectRule, ScoreWeights};
