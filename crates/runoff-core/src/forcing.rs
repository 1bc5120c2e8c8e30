use crate::error::{Error, Result};

/// Paired rainfall and potential evapotranspiration series.
///
/// Both series always have the same length; one value per timestep.
#[derive(Debug, Clone, PartialEq)]
pub struct Forcing {
    rain: Vec<f64>,
    pet: Vec<f64>,
}

impl Forcing {
    /// Create new Forcing, rejecting series of unequal length.
    ///
    /// Missing values are not screened here; NaN forcing simply yields NaN
    /// runoff downstream.
    pub fn new(rain: Vec<f64>, pet: Vec<f64>) -> Result<Self> {
        Error::check_len("pet", rain.len(), pet.len())?;
        Ok(Self { rain, pet })
    }

    pub fn rain(&self) -> &[f64] {
        &self.rain
    }

    pub fn pet(&self) -> &[f64] {
        &self.pet
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.rain.len()
    }

    /// Returns `true` if there are no timesteps.
    pub fn is_empty(&self) -> bool {
        self.rain.is_empty()
    }
}
