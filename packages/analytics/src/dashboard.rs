//! Memoized access to every derived view of one record store.
//!
//! The store is immutable, so a view only needs computing once per
//! parameter set. Repeated calls hand back the same [`Arc`].

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crime_insights_analytics_models::{
    CategoryTotal, ClusterProfile, ClusterScatter, ClusterSummary, ProportionSeries, RankedEntry,
    RateMatrix, StateShare, TrendSeries, YearlyTotal,
};
use crime_insights_crime_models::{ClusterId, Metric};
use crime_insights_store::RecordStore;

use crate::views;

/// Cache keyed by the parameters of a view.
struct Memo<K, V> {
    name: &'static str,
    entries: Mutex<HashMap<K, Arc<V>>>,
}

impl<K: Eq + Hash + Copy + std::fmt::Debug, V> Memo<K, V> {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: Mutex::new(HashMap::new()),
        }
    }

    fn get_or_compute(&self, key: K, compute: impl FnOnce() -> V) -> Arc<V> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(hit) = entries.get(&key) {
            log::trace!("{} cache hit for {key:?}", self.name);
            return hit.clone();
        }

        log::debug!("Computing {} for {key:?}", self.name);
        let value = Arc::new(compute());
        entries.insert(key, value.clone());
        value
    }
}

fn once<V>(cell: &OnceLock<Arc<V>>, name: &str, compute: impl FnOnce() -> V) -> Arc<V> {
    cell.get_or_init(|| {
        log::debug!("Computing {name}");
        Arc::new(compute())
    })
    .clone()
}

/// Derived views of a [`RecordStore`], each computed on first use.
pub struct Dashboard {
    store: Arc<RecordStore>,
    yearly_totals: OnceLock<Arc<Vec<YearlyTotal>>>,
    category_ranking: OnceLock<Arc<Vec<CategoryTotal>>>,
    cluster_summary: OnceLock<Arc<Vec<ClusterSummary>>>,
    cluster_scatter: OnceLock<Arc<Vec<ClusterScatter>>>,
    cluster_profiles: OnceLock<Arc<BTreeMap<ClusterId, ClusterProfile>>>,
    state_distribution: OnceLock<Arc<Vec<StateShare>>>,
    trend_series: OnceLock<Arc<TrendSeries>>,
    proportion_series: OnceLock<Arc<ProportionSeries>>,
    rate_matrix: OnceLock<Arc<RateMatrix>>,
    top_states: Memo<(i32, Metric), Vec<RankedEntry>>,
}

impl Dashboard {
    /// Creates a dashboard over `store`. Nothing is computed until asked.
    #[must_use]
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self {
            store,
            yearly_totals: OnceLock::new(),
            category_ranking: OnceLock::new(),
            cluster_summary: OnceLock::new(),
            cluster_scatter: OnceLock::new(),
            cluster_profiles: OnceLock::new(),
            state_distribution: OnceLock::new(),
            trend_series: OnceLock::new(),
            proportion_series: OnceLock::new(),
            rate_matrix: OnceLock::new(),
            top_states: Memo::new("top states"),
        }
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// See [`views::yearly_totals`].
    #[must_use]
    pub fn yearly_totals(&self) -> Arc<Vec<YearlyTotal>> {
        once(&self.yearly_totals, "yearly totals", || {
            views::yearly_totals(self.store.records())
        })
    }

    /// See [`views::top_states`].
    #[must_use]
    pub fn top_states(&self, year: i32, metric: Metric) -> Arc<Vec<RankedEntry>> {
        self.top_states.get_or_compute((year, metric), || {
            views::top_states(self.store.records(), year, metric)
        })
    }

    /// See [`views::category_ranking`].
    #[must_use]
    pub fn category_ranking(&self) -> Arc<Vec<CategoryTotal>> {
        once(&self.category_ranking, "category ranking", || {
            views::category_ranking(self.store.records())
        })
    }

    /// See [`views::cluster_summary`].
    #[must_use]
    pub fn cluster_summary(&self) -> Arc<Vec<ClusterSummary>> {
        once(&self.cluster_summary, "cluster summary", || {
            views::cluster_summary(self.store.records())
        })
    }

    /// See [`views::cluster_scatter`].
    #[must_use]
    pub fn cluster_scatter(&self) -> Arc<Vec<ClusterScatter>> {
        once(&self.cluster_scatter, "cluster scatter", || {
            views::cluster_scatter(self.store.records())
        })
    }

    /// See [`views::cluster_profiles`].
    #[must_use]
    pub fn cluster_profiles(&self) -> Arc<BTreeMap<ClusterId, ClusterProfile>> {
        once(&self.cluster_profiles, "cluster profiles", || {
            views::cluster_profiles(self.store.records())
        })
    }

    /// Profile for one cluster, or `None` if no record carries the label.
    #[must_use]
    pub fn cluster_profile(&self, cluster: ClusterId) -> Option<ClusterProfile> {
        self.cluster_profiles().get(&cluster).cloned()
    }

    /// See [`views::clustered_state_distribution`].
    #[must_use]
    pub fn state_distribution(&self) -> Arc<Vec<StateShare>> {
        once(&self.state_distribution, "state distribution", || {
            views::clustered_state_distribution(self.store.records())
        })
    }

    /// See [`views::trend_series`].
    #[must_use]
    pub fn trend_series(&self) -> Arc<TrendSeries> {
        once(&self.trend_series, "trend series", || {
            views::trend_series(self.store.records())
        })
    }

    /// See [`views::proportion_series`].
    #[must_use]
    pub fn proportion_series(&self) -> Arc<ProportionSeries> {
        once(&self.proportion_series, "proportion series", || {
            views::proportion_series(self.store.records())
        })
    }

    /// See [`views::rate_matrix`].
    #[must_use]
    pub fn rate_matrix(&self) -> Arc<RateMatrix> {
        once(&self.rate_matrix, "rate matrix", || {
            views::rate_matrix(self.store.records())
        })
    }
}
