//! Scenario sampling
//!
//! A scenario is the randomized physical setup of one example: the mirror's reflectivity and
//! the incident angle of the light ray, from which the reflected angle follows by the law of
//! reflection.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::SampleRange;
use crate::error::Result;

/// Physical configuration of one example
///
/// Angles are measured from the surface normal. A positive incident angle means the ray arrives
/// from the left of the normal, so the reflected ray leaves to the right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Only reported in the prompt text; it has no geometric effect
    pub reflectivity: f64,
    pub incident_angle_deg: f64,
    pub incident_angle_rad: f64,
    pub reflected_angle_deg: f64,
    pub reflected_angle_rad: f64,
}
impl Scenario {
    pub fn new(reflectivity: f64, incident_angle_deg: f64) -> Self {
        let incident_angle_rad = incident_angle_deg.to_radians();
        // Angle of incidence equals angle of reflection
        Self {
            reflectivity,
            incident_angle_deg,
            incident_angle_rad,
            reflected_angle_deg: incident_angle_deg,
            reflected_angle_rad: incident_angle_rad,
        }
    }
}

/// Draws scenarios from a seedable random source
pub struct ScenarioSampler<R: Rng> {
    rng: R,
    reflectivity: SampleRange,
    incident_angle_deg: SampleRange,
}
impl<R: Rng> ScenarioSampler<R> {
    pub fn new(reflectivity: SampleRange, incident_angle_deg: SampleRange, rng: R) -> Result<Self> {
        reflectivity.validate("reflectivity")?;
        incident_angle_deg.validate("incident_angle")?;
        Ok(Self {
            rng,
            reflectivity,
            incident_angle_deg,
        })
    }

    pub fn sample(&mut self) -> Scenario {
        let reflectivity = self
            .rng
            .gen_range(self.reflectivity.min..=self.reflectivity.max);
        let theta = self
            .rng
            .gen_range(self.incident_angle_deg.min..=self.incident_angle_deg.max);
        Scenario::new(reflectivity, theta)
    }

    /// Hand back the random source, e.g. to keep drawing prompt choices from it
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}
