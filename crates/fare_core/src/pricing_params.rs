//! Parameters for the price calculation

use crate::constants::{Weight, DEFAULT_WEIGHT};

/// Coefficients of the fare formula
///
/// `max(base_fee + miles * price_per_mile - discount, base_fee)` where the
/// discount is `(11 - w) * weight_step` summed over both airports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingParams {
    pub base_fee: f64,
    pub price_per_mile: f64,
    pub weight_step: f64,
    // Weight assumed for airports without one
    pub default_weight: Weight,
}

impl PricingParams {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn base_fee(mut self, fee: f64) -> Self {
        self.base_fee = fee;
        self
    }

    pub fn price_per_mile(mut self, price: f64) -> Self {
        self.price_per_mile = price;
        self
    }

    pub fn weight_step(mut self, step: f64) -> Self {
        self.weight_step = step;
        self
    }

    pub fn default_weight(mut self, weight: Weight) -> Self {
        self.default_weight = weight;
        self
    }
}

// Fares include the 20% increase over the previous model
impl Default for PricingParams {
    fn default() -> Self {
        PricingParams {
            base_fee: 48.0,
            price_per_mile: 0.072,
            weight_step: 2.0,
            default_weight: DEFAULT_WEIGHT,
        }
    }
}
