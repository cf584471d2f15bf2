//! Rule-driven implementations of the three annotation stages, each backed
//! by one model resource.

pub mod predicate;
pub mod roleset;
pub mod semantic;

pub use predicate::PredicateIdentifier;
pub use roleset::RolesetClassifier;
pub use semantic::SrlLabeler;
