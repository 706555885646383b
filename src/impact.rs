use serde::Serialize;

use crate::util::format_amount;

/// Savings per kg of correctly sorted waste
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactFactors {
    pub co2_kg: f64,
    pub water_l: f64,
    pub energy_kwh: f64,
}

pub const WET_FACTORS: ImpactFactors = ImpactFactors {
    co2_kg: 0.5,
    water_l: 10.0,
    energy_kwh: 0.2,
};

pub const DRY_FACTORS: ImpactFactors = ImpactFactors {
    co2_kg: 2.1,
    water_l: 25.0,
    energy_kwh: 0.8,
};

pub const HAZARDOUS_FACTORS: ImpactFactors = ImpactFactors {
    co2_kg: 1.8,
    water_l: 15.0,
    energy_kwh: 0.6,
};

/// Kilograms sorted per week. Negative or non-finite input counts as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WeeklyWaste {
    pub wet_kg: f64,
    pub dry_kg: f64,
    pub hazardous_kg: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Impact {
    pub co2_kg: f64,
    pub water_l: f64,
    pub energy_kwh: f64,
}

impl Impact {
    pub fn summary(&self) -> String {
        format!(
            "🌱 Your weekly segregation saves {:.1}kg CO2, {}L water, and {:.1}kWh energy!",
            self.co2_kg,
            format_amount(self.water_l, 1),
            self.energy_kwh
        )
    }
}

fn sanitize(kg: f64) -> f64 {
    if kg.is_finite() && kg > 0.0 {
        kg
    } else {
        0.0
    }
}

pub fn calculate(waste: &WeeklyWaste) -> Impact {
    let parts = [
        (sanitize(waste.wet_kg), WET_FACTORS),
        (sanitize(waste.dry_kg), DRY_FACTORS),
        (sanitize(waste.hazardous_kg), HAZARDOUS_FACTORS),
    ];

    parts
        .iter()
        .fold(Impact::default(), |acc, (kg, factors)| Impact {
            co2_kg: acc.co2_kg + kg * factors.co2_kg,
            water_l: acc.water_l + kg * factors.water_l,
            energy_kwh: acc.energy_kwh + kg * factors.energy_kwh,
        })
}
