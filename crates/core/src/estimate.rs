//! Rough price estimation for garden work.
//!
//! All amounts are whole yen. The ranges intentionally stay wide; the real
//! quote happens after an on-site visit.

use serde::{Deserialize, Serialize};

/// Fixed call-out fee added to every estimate, in yen.
pub const CALL_OUT_FEE_YEN: u64 = 5_000;

/// Mowing is billed for at least this many square meters.
pub const MIN_MOWING_AREA_SQM: u64 = 10;

/// Per-tree services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeService {
    /// Pruning and shaping.
    Pruning,
    /// Felling and removal.
    Felling,
}

impl TreeService {
    /// Get string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pruning => "pruning",
            Self::Felling => "felling",
        }
    }

    /// Parse from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pruning" => Some(Self::Pruning),
            "felling" => Some(Self::Felling),
            _ => None,
        }
    }
}

/// Tree height band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeightBand {
    /// Under 3 meters.
    Low,
    /// 3 to 5 meters.
    Medium,
    /// Over 5 meters.
    High,
}

impl HeightBand {
    /// Get string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse from string.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A price range in whole yen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceRange {
    /// Lower bound in yen.
    pub min: u64,
    /// Upper bound in yen.
    pub max: u64,
}

impl PriceRange {
    const fn new(min: u64, max: u64) -> Self {
        Self { min, max }
    }
}

/// An estimate request, already parsed and validated at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateRequest {
    /// Per-tree work priced by height band.
    PerTree {
        /// Which service.
        service: TreeService,
        /// Height band of the trees.
        height: HeightBand,
        /// Number of trees.
        count: u64,
    },
    /// Grass mowing priced by area.
    Mowing {
        /// Area in square meters.
        area_sqm: u64,
    },
}

/// Per-tree price range for a service and height band, in yen.
#[must_use]
pub const fn per_tree(service: TreeService, height: HeightBand) -> PriceRange {
    match (service, height) {
        (TreeService::Pruning, HeightBand::Low) => PriceRange::new(3_000, 5_000),
        (TreeService::Pruning, HeightBand::Medium) => PriceRange::new(5_000, 10_000),
        (TreeService::Pruning, HeightBand::High) => PriceRange::new(10_000, 20_000),
        (TreeService::Felling, HeightBand::Low) => PriceRange::new(5_000, 10_000),
        (TreeService::Felling, HeightBand::Medium) => PriceRange::new(10_000, 30_000),
        (TreeService::Felling, HeightBand::High) => PriceRange::new(30_000, 80_000),
    }
}

/// Mowing price range per square meter, in yen.
pub const PER_SQM: PriceRange = PriceRange::new(200, 500);

/// Compute the estimated price range including the call-out fee.
#[must_use]
pub fn estimate(request: EstimateRequest) -> PriceRange {
    let work = match request {
        EstimateRequest::PerTree {
            service,
            height,
            count,
        } => {
            let per = per_tree(service, height);
            PriceRange::new(per.min.saturating_mul(count), per.max.saturating_mul(count))
        }
        EstimateRequest::Mowing { area_sqm } => {
            let billable = area_sqm.max(MIN_MOWING_AREA_SQM);
            PriceRange::new(
                PER_SQM.min.saturating_mul(billable),
                PER_SQM.max.saturating_mul(billable),
            )
        }
    };

    PriceRange::new(
        CALL_OUT_FEE_YEN.saturating_add(work.min),
        CALL_OUT_FEE_YEN.saturating_add(work.max),
    )
}


#[cfg(test)]
mod property_tests {
    use proptest::prelude::*;

    use super::*;

    fn any_service() -> impl Strategy<Value = TreeService> {
        prop_oneof![Just(TreeService::Pruning), Just(TreeService::Felling)]
    }

    fn any_height() -> impl Strategy<Value = HeightBand> {
        prop_oneof![
            Just(HeightBand::Low),
            Just(HeightBand::Medium),
            Just(HeightBand::High),
        ]
    }

    // For any estimate, min never exceeds max.
    proptest! {
        #[test]
        fn prop_range_min_not_above_max(
            service in any_service(),
            height in any_height(),
            count in 0u64..1_000,
            area in 0u64..100_000,
        ) {
            let tree = estimate(EstimateRequest::PerTree { service, height, count });
            prop_assert!(tree.min <= tree.max);

            let mowing = estimate(EstimateRequest::Mowing { area_sqm: area });
            prop_assert!(mowing.min <= mowing.max);
        }
    }

    // More trees never cost less.
    proptest! {
        #[test]
        fn prop_more_trees_never_cheaper(
            service in any_service(),
            height in any_height(),
            count in 0u64..1_000,
        ) {
            let fewer = estimate(EstimateRequest::PerTree { service, height, count });
            let more = estimate(EstimateRequest::PerTree { service, height, count: count + 1 });

            prop_assert!(more.min >= fewer.min);
            prop_assert!(more.max >= fewer.max);
        }
    }

    // A larger lawn never costs less.
    proptest! {
        #[test]
        fn prop_larger_area_never_cheaper(area in 0u64..100_000) {
            let smaller = estimate(EstimateRequest::Mowing { area_sqm: area });
            let larger = estimate(EstimateRequest::Mowing { area_sqm: area + 1 });

            prop_assert!(larger.min >= smaller.min);
            prop_assert!(larger.max >= smaller.max);
        }
    }

    // Every estimate includes at least the call-out fee.
    proptest! {
        #[test]
        fn prop_call_out_fee_floor(area in 0u64..100_000) {
            let range = estimate(EstimateRequest::Mowing { area_sqm: area });
            prop_assert!(range.min >= CALL_OUT_FEE_YEN);
        }
    }
}
