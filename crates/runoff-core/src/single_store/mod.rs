/// Single store: a one-store, two-parameter teaching model.
///
/// Rain fills a bucket of fixed capacity, PET empties it, anything above the
/// capacity spills as runoff and a fixed fraction of the remainder is lost
/// each step. Too crude for real water-resource work; it exists to exercise
/// the model contract with something small.
pub mod constants;
pub mod params;
pub mod run;

pub use params::Parameters;
pub use run::{default_transform, SingleStore, State};
