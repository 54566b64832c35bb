use crate::path::bbox::{BBox, path_bbox};

/// Width used for the gap threshold when no path has a positive width.
const DEFAULT_MEDIAN_WIDTH: f64 = 20.0;
/// Fraction of the median path width below which two paths count as one letter.
const GAP_RATIO: f64 = 0.6;

/// A path `d` string together with its parsed bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct PathItem {
    pub path: String,
    pub bbox: BBox,
}

impl PathItem {
    /// Parse `path`; `None` when it has no coordinates.
    pub fn parse(path: impl Into<String>) -> Option<Self> {
        let path = path.into();
        let bbox = path_bbox(path.as_str())?;
        Some(Self { path, bbox })
    }
}

/// Horizontally adjacent paths, ordered top to bottom.
pub type Cluster = Vec<PathItem>;

/// Position of one ordered path within the cluster structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterMeta {
    pub cluster_index: usize,
    pub index_in_cluster: usize,
    pub cluster_size: usize,
}

/// Flattened reveal order with per-path cluster metadata (index-aligned).
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderedPaths {
    pub ordered_paths: Vec<String>,
    pub cluster_meta: Vec<ClusterMeta>,
}

impl OrderedPaths {
    pub fn len(&self) -> usize {
        self.ordered_paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered_paths.is_empty()
    }

    /// Number of clusters represented in the metadata.
    pub fn cluster_count(&self) -> usize {
        self.cluster_meta
            .iter()
            .map(|m| m.cluster_index + 1)
            .max()
            .unwrap_or(0)
    }

    /// Iterate `(index, path, meta)` in reveal order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, &ClusterMeta)> {
        self.ordered_paths
            .iter()
            .zip(&self.cluster_meta)
            .enumerate()
            .map(|(i, (p, m))| (i, p.as_str(), m))
    }
}

/// Upper median of the positive widths.
fn median_width(items: &[PathItem]) -> f64 {
    let mut widths: Vec<f64> = items
        .iter()
        .map(|it| it.bbox.w)
        .filter(|w| *w > 0.0)
        .collect();
    if widths.is_empty() {
        return DEFAULT_MEDIAN_WIDTH;
    }
    widths.sort_by(f64::total_cmp);
    widths[widths.len() / 2]
}

/// Group paths into letter clusters.
///
/// Paths are swept left to right by `min_x`; a path joins the current cluster when the gap
/// between its left edge and the cluster's right edge is at most `0.6 * median width`.
/// Each cluster is then ordered by vertical center. Both sorts are stable, so ties keep input
/// order.
pub fn cluster_paths(items: Vec<PathItem>) -> Vec<Cluster> {
    if items.is_empty() {
        return Vec::new();
    }

    let mut sorted = items;
    sorted.sort_by(|a, b| a.bbox.min_x.total_cmp(&b.bbox.min_x));
    let gap_threshold = median_width(&sorted) * GAP_RATIO;

    let mut clusters: Vec<Cluster> = Vec::new();
    let mut current: Cluster = Vec::new();
    let mut cluster_max_x = f64::NEG_INFINITY;

    for item in sorted {
        if !current.is_empty() && item.bbox.min_x - cluster_max_x > gap_threshold {
            clusters.push(std::mem::take(&mut current));
            cluster_max_x = f64::NEG_INFINITY;
        }
        cluster_max_x = cluster_max_x.max(item.bbox.max_x);
        current.push(item);
    }
    clusters.push(current);

    for cluster in &mut clusters {
        cluster.sort_by(|a, b| a.bbox.cy.total_cmp(&b.bbox.cy));
    }
    clusters
}

/// Parse, cluster and flatten path strings into reveal order.
///
/// Paths without coordinates are dropped.
#[tracing::instrument(skip(paths), fields(input = paths.len()))]
pub fn order_paths<S: AsRef<str>>(paths: &[S]) -> OrderedPaths {
    let items: Vec<PathItem> = paths
        .iter()
        .filter_map(|p| PathItem::parse(p.as_ref()))
        .collect();
    let dropped = paths.len() - items.len();
    if dropped > 0 {
        tracing::debug!(dropped, "skipping paths without coordinates");
    }

    let clusters = cluster_paths(items);
    let mut out = OrderedPaths::default();
    for (cluster_index, cluster) in clusters.into_iter().enumerate() {
        let cluster_size = cluster.len();
        for (index_in_cluster, item) in cluster.into_iter().enumerate() {
            out.ordered_paths.push(item.path);
            out.cluster_meta.push(ClusterMeta {
                cluster_index,
                index_in_cluster,
                cluster_size,
            });
        }
    }
    tracing::debug!(paths = out.len(), clusters = out.cluster_count(), "ordered");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/order/cluster.rs"]
mod tests;
