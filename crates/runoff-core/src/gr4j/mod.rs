/// GR4J: Génie Rural à 4 paramètres Journalier.
///
/// A lumped conceptual daily rainfall-runoff model with 4 parameters,
/// 2 stores, and unit hydrograph routing.
pub mod constants;
pub mod params;
pub mod processes;
pub mod run;
pub mod state;
pub mod transform;
pub mod unit_hydrographs;

pub use params::Parameters;
pub use run::Gr4j;
pub use state::State;
pub use transform::default_transform;
