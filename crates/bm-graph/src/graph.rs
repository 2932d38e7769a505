//! Spatial graph representation and builder.
//!
//! # Lifecycle
//!
//! Loading and querying are separate types.  [`SpatialGraphBuilder`] accepts
//! the load-time event stream (`add_node`, `connect`, `add_name`); calling
//! [`build`](SpatialGraphBuilder::build) consumes it, prunes isolated nodes
//! from the traversal view, and returns a read-only [`SpatialGraph`].
//! Because the builder is consumed, no reader can ever observe a graph that
//! is still being loaded.
//!
//! # Data layout
//!
//! Connected nodes ("vertices") are stored in ascending id order and their
//! neighbour sets in **Compressed Sparse Row (CSR)** format.  Given vertex
//! row `r`, its neighbours occupy the slice:
//!
//! ```text
//! adj[ adj_start[r] .. adj_start[r+1] ]
//! ```
//!
//! Every neighbour list is sorted and free of duplicates.  Pruned nodes keep
//! their coordinates and names in `nodes` and stay reachable through name
//! search.

use rustc_hash::{FxHashMap, FxHashSet};

use bm_core::{GeoPoint, NodeId};

use crate::names::{NameIndex, NameIndexConfig, normalize};
use crate::{GraphError, GraphResult};

// ── Node ──────────────────────────────────────────────────────────────────────

/// An intersection or point of interest.
///
/// Id and position are fixed at creation; the display name may be replaced
/// while the graph is still being built.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id:   NodeId,
    pos:  GeoPoint,
    name: String,
}

impl Node {
    #[inline]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[inline]
    pub fn pos(&self) -> GeoPoint {
        self.pos
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.pos.lat
    }

    #[inline]
    pub fn lon(&self) -> f64 {
        self.pos.lon
    }

    /// Display name, empty when the node was never named.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }
}

// ── Location ──────────────────────────────────────────────────────────────────

/// A full search hit, as handed to the query layer.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub id:   NodeId,
    pub name: String,
    pub lat:  f64,
    pub lon:  f64,
}

impl From<&Node> for Location {
    fn from(n: &Node) -> Self {
        Location { id: n.id, name: n.name.clone(), lat: n.pos.lat, lon: n.pos.lon }
    }
}

// ── SpatialGraph ──────────────────────────────────────────────────────────────

/// Undirected road graph plus a location-name index.  Read-only.
///
/// Do not construct directly; use [`SpatialGraphBuilder`].
pub struct SpatialGraph {
    // ── Node data (including pruned nodes) ────────────────────────────────
    nodes: FxHashMap<NodeId, Node>,

    // ── CSR adjacency over connected nodes ────────────────────────────────
    /// Connected node ids, ascending.  Position = CSR row.
    vertex_ids: Vec<NodeId>,
    vertex_row: FxHashMap<NodeId, u32>,
    /// Length = `vertex_ids.len() + 1`.
    adj_start:  Vec<u32>,
    adj:        Vec<NodeId>,

    // ── Search ────────────────────────────────────────────────────────────
    names: NameIndex,
}

impl SpatialGraph {
    /// Construct an empty graph: no nodes, no vertices, no names.
    pub fn empty() -> Self {
        SpatialGraphBuilder::new().build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    /// Every node ever added, pruned ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes with at least one neighbour.
    pub fn vertex_count(&self) -> usize {
        self.vertex_ids.len()
    }

    /// Number of undirected connections.  A self-loop counts once.
    pub fn edge_count(&self) -> usize {
        let loops = self
            .vertex_ids
            .iter()
            .enumerate()
            .filter(|&(row, v)| self.neighbours_of_row(row as u32).binary_search(v).is_ok())
            .count();
        (self.adj.len() - loops) / 2 + loops
    }

    pub fn is_empty(&self) -> bool {
        self.vertex_ids.is_empty()
    }

    pub fn names(&self) -> &NameIndex {
        &self.names
    }

    // ── Node lookup ───────────────────────────────────────────────────────

    pub fn node(&self, id: NodeId) -> GraphResult<&Node> {
        self.nodes.get(&id).ok_or(GraphError::NodeNotFound(id))
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn lat(&self, id: NodeId) -> GraphResult<f64> {
        self.node(id).map(Node::lat)
    }

    pub fn lon(&self, id: NodeId) -> GraphResult<f64> {
        self.node(id).map(Node::lon)
    }

    // ── Traversal ─────────────────────────────────────────────────────────

    /// Ids of all connected nodes, ascending.  Isolated nodes never appear.
    pub fn vertices(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.vertex_ids.iter().copied()
    }

    /// Neighbours of `id`, ascending.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] if `id` is not a connected node, even if
    /// it exists as a pruned, name-only node.
    pub fn adjacent(&self, id: NodeId) -> GraphResult<&[NodeId]> {
        self.vertex_row
            .get(&id)
            .map(|&row| self.neighbours_of_row(row))
            .ok_or(GraphError::NodeNotFound(id))
    }

    #[inline]
    fn neighbours_of_row(&self, row: u32) -> &[NodeId] {
        let start = self.adj_start[row as usize] as usize;
        let end   = self.adj_start[row as usize + 1] as usize;
        &self.adj[start..end]
    }

    // ── Geodesy ───────────────────────────────────────────────────────────

    /// Great-circle distance between two nodes, in miles.
    pub fn distance(&self, v: NodeId, w: NodeId) -> GraphResult<f64> {
        Ok(self.node(v)?.pos.distance_miles(self.node(w)?.pos))
    }

    /// Initial bearing from `v` towards `w`, in degrees within `(-180, 180]`.
    pub fn bearing(&self, v: NodeId, w: NodeId) -> GraphResult<f64> {
        Ok(self.node(v)?.pos.bearing_deg(self.node(w)?.pos))
    }

    /// The connected node nearest to `(lon, lat)` by great-circle distance.
    ///
    /// Linear scan in ascending id order with a strict comparison, so the
    /// lowest id wins exact ties.  Returns `None` when the graph has no
    /// connected nodes; callers needing a raw sentinel use
    /// `.unwrap_or(NodeId::INVALID)`.
    pub fn closest(&self, lon: f64, lat: f64) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &id in &self.vertex_ids {
            let Some(node) = self.nodes.get(&id) else { continue };
            let d = bm_core::distance_miles(lon, lat, node.pos.lon, node.pos.lat);
            if d.is_nan() {
                continue;
            }
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    // ── Name search ───────────────────────────────────────────────────────

    /// Display names of every node whose normalized name starts with
    /// `prefix`.
    ///
    /// `prefix` is matched as given, so it should already be lower-case.
    /// Keys are visited in ascending order and the nodes under each key in
    /// registration order; repeated names are not collapsed.
    pub fn locations_by_prefix(&self, prefix: &str) -> Vec<String> {
        self.names
            .entries_with_prefix(prefix)
            .flat_map(|(_, ids)| ids.iter())
            .filter_map(|id| self.nodes.get(id))
            .map(|n| n.name.clone())
            .collect()
    }

    /// Full records for every node whose normalized name matches the
    /// normalized form of `name`.
    pub fn locations(&self, name: &str) -> Vec<Location> {
        let cleaned = normalize(name);
        self.names
            .keys_that_match(&cleaned)
            .filter_map(|key| self.names.get(key))
            .flat_map(|ids| ids.iter())
            .filter_map(|id| self.nodes.get(id))
            .map(Location::from)
            .collect()
    }
}

// ── SpatialGraphBuilder ───────────────────────────────────────────────────────

/// Accumulate the load-time event stream, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use bm_core::NodeId;
/// use bm_graph::SpatialGraphBuilder;
///
/// let mut b = SpatialGraphBuilder::new();
/// b.add_node("", NodeId(1), 37.8697, -122.2597);
/// b.add_node("", NodeId(2), 37.8700, -122.2590);
/// b.add_node("", NodeId(3), 37.8800, -122.2500);
/// b.connect(NodeId(1), NodeId(2)).unwrap();
/// b.add_name(NodeId(3), "Peet's Coffee");
/// let graph = b.build();
/// assert_eq!(graph.vertex_count(), 2); // node 3 is isolated
/// assert_eq!(graph.locations_by_prefix("pe"), vec!["Peet's Coffee"]);
/// ```
pub struct SpatialGraphBuilder {
    nodes:     FxHashMap<NodeId, Node>,
    adjacency: FxHashMap<NodeId, FxHashSet<NodeId>>,
    names:     NameIndex,
}

impl SpatialGraphBuilder {
    pub fn new() -> Self {
        Self::with_config(NameIndexConfig::default())
    }

    pub fn with_config(config: NameIndexConfig) -> Self {
        Self {
            nodes:     FxHashMap::default(),
            adjacency: FxHashMap::default(),
            names:     NameIndex::new(config),
        }
    }

    /// Pre-allocate for the expected number of nodes.
    pub fn with_capacity(nodes: usize, config: NameIndexConfig) -> Self {
        let mut b = Self::with_config(config);
        b.nodes.reserve(nodes);
        b.adjacency.reserve(nodes);
        b
    }

    /// Add a node.  The first insertion of an id wins; later calls with the
    /// same id change nothing and return `false`.
    ///
    /// `name` becomes the display name but is **not** indexed for search;
    /// use [`add_name`](Self::add_name) for that.
    pub fn add_node(&mut self, name: impl Into<String>, id: NodeId, lat: f64, lon: f64) -> bool {
        if self.nodes.contains_key(&id) {
            log::debug!("ignoring duplicate node {id}");
            return false;
        }
        self.nodes.insert(id, Node { id, pos: GeoPoint::new(lat, lon), name: name.into() });
        self.adjacency.insert(id, FxHashSet::default());
        true
    }

    /// Record an undirected road between `a` and `b`.  Idempotent.
    ///
    /// # Errors
    ///
    /// [`GraphError::NodeNotFound`] naming the first unknown id; the graph is
    /// left untouched.
    pub fn connect(&mut self, a: NodeId, b: NodeId) -> GraphResult<()> {
        for id in [a, b] {
            if !self.adjacency.contains_key(&id) {
                return Err(GraphError::NodeNotFound(id));
            }
        }
        if let Some(set) = self.adjacency.get_mut(&a) {
            set.insert(b);
        }
        if let Some(set) = self.adjacency.get_mut(&b) {
            set.insert(a);
        }
        Ok(())
    }

    /// Set the display name of `id` and index it under its normalized form.
    ///
    /// Naming an unknown id is deliberately a no-op (returns `false`): map
    /// extracts routinely carry tags for nodes that were filtered out.
    pub fn add_name(&mut self, id: NodeId, name: impl Into<String>) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            log::debug!("ignoring name for unknown node {id}");
            return false;
        };
        node.name = name.into();
        let key = normalize(&node.name);
        self.names.insert(key, id);
        true
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Consume the builder and produce a read-only [`SpatialGraph`].
    ///
    /// Nodes without neighbours are pruned from the traversal view (they stay
    /// in the node table and the name index).
    ///
    /// Time complexity: O(V log V + E log E).
    pub fn build(self) -> SpatialGraph {
        let mut vertex_ids: Vec<NodeId> = self
            .adjacency
            .iter()
            .filter(|(_, n)| !n.is_empty())
            .map(|(&id, _)| id)
            .collect();
        vertex_ids.sort_unstable();

        let vertex_row: FxHashMap<NodeId, u32> = vertex_ids
            .iter()
            .enumerate()
            .map(|(row, &id)| (id, row as u32))
            .collect();

        let mut adj_start = Vec::with_capacity(vertex_ids.len() + 1);
        let mut adj = Vec::new();
        adj_start.push(0u32);
        for id in &vertex_ids {
            if let Some(set) = self.adjacency.get(id) {
                let mut neighbours: Vec<NodeId> = set.iter().copied().collect();
                neighbours.sort_unstable();
                adj.extend(neighbours);
            }
            adj_start.push(adj.len() as u32);
        }

        let pruned = self.nodes.len() - vertex_ids.len();
        log::info!(
            "sealed spatial graph: {} nodes, {} connected, {} pruned, {} names",
            self.nodes.len(),
            vertex_ids.len(),
            pruned,
            self.names.len(),
        );

        SpatialGraph {
            nodes: self.nodes,
            vertex_ids,
            vertex_row,
            adj_start,
            adj,
            names: self.names,
        }
    }
}

impl Default for SpatialGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
