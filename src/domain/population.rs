//! Reference population for the Age vs BMI comparison chart.

use super::metrics::HealthMetrics;

/// Reference sample as (age, BMI) points.
pub const REFERENCE_POPULATION: [(f64, f64); 9] = [
    (20.0, 18.0),
    (25.0, 22.0),
    (30.0, 27.0),
    (35.0, 30.0),
    (40.0, 25.0),
    (45.0, 28.0),
    (50.0, 32.0),
    (60.0, 35.0),
    (70.0, 29.0),
];

/// Age axis bounds.
pub const AGE_AXIS: [f64; 2] = [18.0, 100.0];

/// BMI axis bounds.
pub const BMI_AXIS: [f64; 2] = [10.0, 50.0];

/// Shaded BMI region drawn behind the points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiBand {
    pub name: &'static str,
    pub lower: f64,
    pub upper: f64,
}

impl BmiBand {
    #[must_use]
    pub fn contains(&self, bmi: f64) -> bool {
        (self.lower..=self.upper).contains(&bmi)
    }
}

/// Bands in ascending order. The gaps (below 18.5, 24.9-25, 29.9-30) are
/// intentional and match the chart shading.
pub const BMI_BANDS: [BmiBand; 3] = [
    BmiBand {
        name: "Healthy BMI",
        lower: 18.5,
        upper: 24.9,
    },
    BmiBand {
        name: "Overweight",
        lower: 25.0,
        upper: 29.9,
    },
    BmiBand {
        name: "Obese",
        lower: 30.0,
        upper: 50.0,
    },
];

/// Everything the presentation layer needs to draw the comparison chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationChart {
    pub population: Vec<(f64, f64)>,
    /// The caller's (age, BMI)
    pub you: (f64, f64),
    pub bands: &'static [BmiBand],
    pub age_bounds: [f64; 2],
    pub bmi_bounds: [f64; 2],
}

impl PopulationChart {
    #[must_use]
    pub fn for_metrics(metrics: &HealthMetrics) -> Self {
        Self {
            population: REFERENCE_POPULATION.to_vec(),
            you: (f64::from(metrics.age), metrics.bmi),
            bands: &BMI_BANDS,
            age_bounds: AGE_AXIS,
            bmi_bounds: BMI_AXIS,
        }
    }

    /// Shaded band the caller's BMI falls in, if any.
    #[must_use]
    pub fn band(&self) -> Option<&BmiBand> {
        self.bands.iter().find(|b| b.contains(self.you.1))
    }

    /// Fraction of the reference sample with a strictly lower BMI.
    #[must_use]
    pub fn share_below(&self) -> f64 {
        if self.population.is_empty() {
            return 0.0;
        }
        let below = self
            .population
            .iter()
            .filter(|(_, bmi)| *bmi < self.you.1)
            .count();
        below as f64 / self.population.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_for(age: u32, bmi: f64) -> PopulationChart {
        PopulationChart::for_metrics(&HealthMetrics {
            age,
            bmi,
            ..HealthMetrics::sample()
        })
    }

    #[test]
    fn test_chart_places_caller() {
        let chart = chart_for(42, 26.5);
        assert_eq!(chart.you, (42.0, 26.5));
        assert_eq!(chart.population.len(), 9);
        assert_eq!(chart.age_bounds, [18.0, 100.0]);
        assert_eq!(chart.bmi_bounds, [10.0, 50.0]);
    }

    #[test]
    fn test_band_lookup() {
        assert_eq!(chart_for(30, 22.0).band().map(|b| b.name), Some("Healthy BMI"));
        assert_eq!(chart_for(30, 27.0).band().map(|b| b.name), Some("Overweight"));
        assert_eq!(chart_for(30, 30.0).band().map(|b| b.name), Some("Obese"));
        assert!(chart_for(30, 17.0).band().is_none());
        assert!(chart_for(30, 24.95).band().is_none());
    }

    #[test]
    fn test_share_below() {
        assert!((chart_for(30, 10.0).share_below() - 0.0).abs() < f64::EPSILON);
        assert!((chart_for(30, 50.0).share_below() - 1.0).abs() < f64::EPSILON);
        // 18, 22, 25 are below 27
        assert!((chart_for(30, 27.0).share_below() - 3.0 / 9.0).abs() < 1e-12);
    }
}
