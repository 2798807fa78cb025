pub mod identifiers;
pub mod kisao;
pub mod level_version;

pub use identifiers::IdentifierError;
pub use kisao::{KisaoError, KisaoTerms};
pub use level_version::{Availability, LevelVersion};
