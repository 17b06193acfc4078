use std::collections::HashMap;
use std::sync::Arc;

use crate::chart::{Chart, ChartKey};

/// Flat chart lookup built from a provider song list.
#[derive(Debug, Clone, Default)]
pub struct ChartList {
    charts: HashMap<ChartKey, Arc<Chart>>,
}

impl ChartList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a chart, replacing any chart with the same key
    pub fn insert(&mut self, chart: Chart) {
        self.charts.insert(chart.key(), Arc::new(chart));
    }

    pub fn get(&self, key: &ChartKey) -> Option<Arc<Chart>> {
        self.charts.get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Chart>> {
        self.charts.values()
    }
}

impl FromIterator<Chart> for ChartList {
    fn from_iter<I: IntoIterator<Item = Chart>>(iter: I) -> Self {
        let mut list = Self::new();
        for chart in iter {
            list.insert(chart);
        }
        list
    }
}
