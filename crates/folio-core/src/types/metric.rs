//! Display metric descriptors.

use crate::types::Snapshot;

/// The portfolio metrics exposed to display surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    MarketValue,
    OpenPl,
    OpenPlPercent,
    DailyPl,
    DailyPlPercent,
}

/// Display class of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricClass {
    /// A currency amount.
    Monetary,
    /// A percentage measurement.
    Percentage,
}

/// Static display metadata for one metric.
///
/// One parameterized descriptor per metric instead of a set of near-identical
/// display entity types.
#[derive(Debug, Clone, Copy)]
pub struct MetricDescriptor {
    pub metric: Metric,
    /// Stable key for entity ids and attribute names.
    pub key: &'static str,
    pub label: &'static str,
    pub unit: &'static str,
    pub class: MetricClass,
    pub icon: &'static str,
}

/// Fixed descriptor table driving display surfaces.
///
/// Ordered to match the `Metric` discriminants.
pub const METRICS: [MetricDescriptor; 5] = [
    MetricDescriptor {
        metric: Metric::MarketValue,
        key: "market_value",
        label: "Market Value",
        unit: "€",
        class: MetricClass::Monetary,
        icon: "mdi:cash-multiple",
    },
    MetricDescriptor {
        metric: Metric::OpenPl,
        key: "open_pl",
        label: "Open P/L",
        unit: "€",
        class: MetricClass::Monetary,
        icon: "mdi:chart-line-variant",
    },
    MetricDescriptor {
        metric: Metric::OpenPlPercent,
        key: "open_pl_percent",
        label: "Open P/L %",
        unit: "%",
        class: MetricClass::Percentage,
        icon: "mdi:percent",
    },
    MetricDescriptor {
        metric: Metric::DailyPl,
        key: "daily_pl",
        label: "Daily P/L",
        unit: "€",
        class: MetricClass::Monetary,
        icon: "mdi:calendar-today",
    },
    MetricDescriptor {
        metric: Metric::DailyPlPercent,
        key: "daily_pl_percent",
        label: "Daily P/L %",
        unit: "%",
        class: MetricClass::Percentage,
        icon: "mdi:percent",
    },
];

impl Metric {
    /// Read this metric's value out of a snapshot.
    pub fn value(&self, snapshot: &Snapshot) -> f64 {
        match self {
            Metric::MarketValue => snapshot.market_value,
            Metric::OpenPl => snapshot.open_pl,
            Metric::OpenPlPercent => snapshot.open_pl_percent,
            Metric::DailyPl => snapshot.daily_pl,
            Metric::DailyPlPercent => snapshot.daily_pl_percent,
        }
    }

    /// The descriptor for this metric.
    pub fn descriptor(&self) -> &'static MetricDescriptor {
        &METRICS[*self as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_table_matches_discriminants() {
        for descriptor in &METRICS {
            assert_eq!(descriptor.metric.descriptor().key, descriptor.key);
        }
    }

    #[test]
    fn test_percentage_metrics_use_percent_unit() {
        for descriptor in &METRICS {
            match descriptor.class {
                MetricClass::Percentage => assert_eq!(descriptor.unit, "%"),
                MetricClass::Monetary => assert_eq!(descriptor.unit, "€"),
            }
        }
    }
}
