//! Unit tests for bm-graph.
//!
//! All tests use hand-crafted graphs so they run without any map extract.

#[cfg(test)]
mod helpers {
    use bm_core::NodeId;
    use crate::{NameIndexConfig, SpatialGraph, SpatialGraphBuilder};

    /// A one-block square near the Berkeley campus plus one isolated café.
    ///
    /// Nodes (lat, lon):
    ///   4:(37.8710,-122.2600) ── 3:(37.8710,-122.2590)
    ///   │                        │
    ///   1:(37.8700,-122.2600) ── 2:(37.8700,-122.2590)
    ///
    ///   5:(37.8800,-122.2500)  isolated, named "Peet's Coffee"
    ///
    /// Names: 5 and 3 "Peet's Coffee", 2 "Top Dog", 4 "Pegasus Books".
    pub fn campus_builder(config: NameIndexConfig) -> SpatialGraphBuilder {
        let mut b = SpatialGraphBuilder::with_config(config);
        b.add_node("", NodeId(1), 37.8700, -122.2600);
        b.add_node("", NodeId(2), 37.8700, -122.2590);
        b.add_node("", NodeId(3), 37.8710, -122.2590);
        b.add_node("", NodeId(4), 37.8710, -122.2600);
        b.add_node("", NodeId(5), 37.8800, -122.2500);

        b.connect(NodeId(1), NodeId(2)).unwrap();
        b.connect(NodeId(2), NodeId(3)).unwrap();
        b.connect(NodeId(3), NodeId(4)).unwrap();
        b.connect(NodeId(4), NodeId(1)).unwrap();

        b.add_name(NodeId(5), "Peet's Coffee");
        b.add_name(NodeId(2), "Top Dog");
        b.add_name(NodeId(3), "Peet's Coffee");
        b.add_name(NodeId(4), "Pegasus Books");
        b
    }

    pub fn campus() -> SpatialGraph {
        campus_builder(NameIndexConfig::default()).build()
    }
}

// ── Builder & lifecycle ───────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use bm_core::NodeId;
    use crate::{GraphError, NameIndexConfig, SpatialGraph, SpatialGraphBuilder};

    #[test]
    fn empty_build() {
        let g = SpatialGraph::empty();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.vertex_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
    }

    #[test]
    fn first_insertion_wins() {
        let mut b = SpatialGraphBuilder::new();
        assert!(b.add_node("first", NodeId(7), 37.0, -122.0));
        assert!(!b.add_node("second", NodeId(7), 38.0, -121.0));
        assert_eq!(b.node_count(), 1);
        let g = b.build();
        let n = g.node(NodeId(7)).unwrap();
        assert_eq!(n.name(), "first");
        assert_eq!(n.lat(), 37.0);
        assert_eq!(n.lon(), -122.0);
    }

    #[test]
    fn connect_unknown_node_fails_without_side_effects() {
        let mut b = SpatialGraphBuilder::new();
        b.add_node("", NodeId(1), 37.0, -122.0);
        let err = b.connect(NodeId(1), NodeId(99)).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(NodeId(99))));
        let err = b.connect(NodeId(42), NodeId(1)).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(NodeId(42))));
        // Node 1 must not have picked up a half-made edge.
        let g = b.build();
        assert_eq!(g.vertex_count(), 0);
    }

    #[test]
    fn connect_is_idempotent() {
        let mut b = SpatialGraphBuilder::new();
        b.add_node("", NodeId(1), 37.0, -122.0);
        b.add_node("", NodeId(2), 37.1, -122.0);
        b.connect(NodeId(1), NodeId(2)).unwrap();
        b.connect(NodeId(2), NodeId(1)).unwrap();
        b.connect(NodeId(1), NodeId(2)).unwrap();
        let g = b.build();
        assert_eq!(g.adjacent(NodeId(1)).unwrap(), &[NodeId(2)]);
        assert_eq!(g.adjacent(NodeId(2)).unwrap(), &[NodeId(1)]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn self_loop_counts_once() {
        let mut b = SpatialGraphBuilder::new();
        b.add_node("", NodeId(1), 37.0, -122.0);
        b.connect(NodeId(1), NodeId(1)).unwrap();
        let g = b.build();
        assert_eq!(g.vertices().collect::<Vec<_>>(), vec![NodeId(1)]);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn add_name_on_unknown_node_is_ignored() {
        let mut b = SpatialGraphBuilder::new();
        assert!(!b.add_name(NodeId(3), "Ghost Street"));
        let g = b.build();
        assert!(g.names().is_empty());
        assert!(g.locations("ghost street").is_empty());
    }

    #[test]
    fn presized_builder_honours_config() {
        let config = NameIndexConfig { dedup_ids: true };
        let mut b = SpatialGraphBuilder::with_capacity(16, config);
        assert_eq!(b.node_count(), 0);
        b.add_node("", NodeId(1), 37.0, -122.0);
        b.add_node("", NodeId(2), 37.1, -122.0);
        b.connect(NodeId(1), NodeId(2)).unwrap();
        b.add_name(NodeId(1), "Top Dog");
        b.add_name(NodeId(1), "Top Dog");
        let g = b.build();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.locations("top dog").len(), 1);
    }

    #[test]
    fn seal_prunes_only_isolated_nodes() {
        let g = super::helpers::campus();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.vertex_count(), 4);
        // Pruned node keeps its data.
        assert!(g.contains_node(NodeId(5)));
        assert_eq!(g.lat(NodeId(5)).unwrap(), 37.8800);
        assert_eq!(g.lon(NodeId(5)).unwrap(), -122.2500);
    }
}

// ── Traversal ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod traversal {
    use bm_core::NodeId;
    use crate::GraphError;

    #[test]
    fn vertices_ascending_without_isolated() {
        let g = super::helpers::campus();
        let v: Vec<_> = g.vertices().collect();
        assert_eq!(v, vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)]);
    }

    #[test]
    fn adjacent_sorted() {
        let g = super::helpers::campus();
        assert_eq!(g.adjacent(NodeId(1)).unwrap(), &[NodeId(2), NodeId(4)]);
        assert_eq!(g.adjacent(NodeId(3)).unwrap(), &[NodeId(2), NodeId(4)]);
    }

    #[test]
    fn adjacency_is_symmetric() {
        let g = super::helpers::campus();
        for v in g.vertices() {
            for &w in g.adjacent(v).unwrap() {
                assert!(g.adjacent(w).unwrap().contains(&v), "{v} -> {w} not mirrored");
            }
        }
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn adjacent_of_pruned_or_unknown_fails() {
        let g = super::helpers::campus();
        assert!(matches!(g.adjacent(NodeId(5)), Err(GraphError::NodeNotFound(NodeId(5)))));
        assert!(matches!(g.adjacent(NodeId(999)), Err(GraphError::NodeNotFound(_))));
    }
}

// ── Geodesy ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod geodesy {
    use bm_core::NodeId;
    use crate::{GraphError, distance_miles};

    const EPS: f64 = 1e-9;

    #[test]
    fn distance_symmetric_for_all_pairs() {
        let g = super::helpers::campus();
        let ids = [1, 2, 3, 4, 5].map(NodeId);
        for &v in &ids {
            for &w in &ids {
                let vw = g.distance(v, w).unwrap();
                let wv = g.distance(w, v).unwrap();
                assert!(vw >= 0.0);
                assert!((vw - wv).abs() < EPS, "{v} {w}: {vw} vs {wv}");
            }
        }
    }

    #[test]
    fn distance_to_self_is_zero() {
        let g = super::helpers::campus();
        for v in g.vertices() {
            assert!(g.distance(v, v).unwrap().abs() < EPS);
        }
    }

    #[test]
    fn distance_matches_coordinate_form() {
        let g = super::helpers::campus();
        let d = g.distance(NodeId(1), NodeId(3)).unwrap();
        let expected = distance_miles(-122.2600, 37.8700, -122.2590, 37.8710);
        assert!((d - expected).abs() < EPS);
        // One block is well under a tenth of a mile.
        assert!(d > 0.05 && d < 0.1, "got {d}");
    }

    #[test]
    fn unknown_node_distance_fails() {
        let g = super::helpers::campus();
        assert!(matches!(
            g.distance(NodeId(1), NodeId(404)),
            Err(GraphError::NodeNotFound(NodeId(404)))
        ));
        assert!(g.bearing(NodeId(404), NodeId(1)).is_err());
    }

    #[test]
    fn bearings_around_the_block() {
        let g = super::helpers::campus();
        // 1 → 4 is due north, 4 → 1 due south.
        assert!(g.bearing(NodeId(1), NodeId(4)).unwrap().abs() < EPS);
        assert!((g.bearing(NodeId(4), NodeId(1)).unwrap() - 180.0).abs() < EPS);
        // 1 → 2 is (almost exactly) east, 2 → 1 west.
        assert!((g.bearing(NodeId(1), NodeId(2)).unwrap() - 90.0).abs() < 0.01);
        assert!((g.bearing(NodeId(2), NodeId(1)).unwrap() + 90.0).abs() < 0.01);
    }
}

// ── Nearest node ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod closest {
    use bm_core::NodeId;
    use crate::{SpatialGraph, SpatialGraphBuilder};

    #[test]
    fn exact_position() {
        let g = super::helpers::campus();
        assert_eq!(g.closest(-122.2590, 37.8710), Some(NodeId(3)));
    }

    #[test]
    fn nearest_corner() {
        let g = super::helpers::campus();
        assert_eq!(g.closest(-122.2598, 37.8701), Some(NodeId(1)));
        assert_eq!(g.closest(-122.2592, 37.8708), Some(NodeId(3)));
    }

    #[test]
    fn isolated_node_is_never_returned() {
        let g = super::helpers::campus();
        // Query sits on top of the pruned café; nearest connected is 3.
        assert_eq!(g.closest(-122.2500, 37.8800), Some(NodeId(3)));
    }

    #[test]
    fn empty_graph_returns_none() {
        assert_eq!(SpatialGraph::empty().closest(-122.25, 37.87), None);

        let mut b = SpatialGraphBuilder::new();
        b.add_node("", NodeId(1), 37.0, -122.0);
        let g = b.build();
        assert_eq!(g.closest(-122.0, 37.0).unwrap_or(NodeId::INVALID), NodeId::INVALID);
    }

    #[test]
    fn ties_go_to_lowest_id() {
        // Two nodes mirrored about the query point, inserted high id first.
        let mut b = SpatialGraphBuilder::new();
        b.add_node("", NodeId(20), 0.0, 1.0);
        b.add_node("", NodeId(10), 0.0, -1.0);
        b.connect(NodeId(20), NodeId(10)).unwrap();
        let g = b.build();
        assert_eq!(g.closest(0.0, 0.0), Some(NodeId(10)));
    }
}

// ── Name search ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod names {
    use bm_core::NodeId;
    use crate::{NameIndex, NameIndexConfig, SpatialGraphBuilder, normalize};

    #[test]
    fn normalization_rule() {
        assert_eq!(normalize("Peet's Coffee"), "peets coffee");
        assert_eq!(normalize("7-Eleven #2"), "eleven ");
        assert_eq!(normalize("Café Strada"), "caf strada");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn prefix_includes_and_excludes() {
        let g = super::helpers::campus();
        let hits = g.locations_by_prefix("pe");
        assert!(hits.iter().any(|n| n == "Peet's Coffee"));
        assert!(g.locations_by_prefix("zz").is_empty());
    }

    #[test]
    fn prefix_order_keys_then_insertion() {
        let g = super::helpers::campus();
        // "peets coffee" < "pegasus books"; ids under a key in insertion order.
        assert_eq!(
            g.locations_by_prefix("pe"),
            vec!["Peet's Coffee", "Peet's Coffee", "Pegasus Books"]
        );
    }

    #[test]
    fn prefix_is_not_normalized() {
        let g = super::helpers::campus();
        assert!(g.locations_by_prefix("Pe").is_empty());
        assert_eq!(g.locations_by_prefix("top"), vec!["Top Dog"]);
    }

    #[test]
    fn isolated_node_stays_searchable() {
        let g = super::helpers::campus();
        assert!(g.vertices().all(|v| v != NodeId(5)));
        let hits = g.locations("peets coffee");
        assert!(hits.iter().any(|l| l.id == NodeId(5)));
    }

    #[test]
    fn full_search_normalizes_query() {
        let g = super::helpers::campus();
        let hits = g.locations("PEET'S Coffee!");
        let ids: Vec<_> = hits.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![NodeId(5), NodeId(3)]);
        assert_eq!(hits[1].name, "Peet's Coffee");
        assert_eq!(hits[1].lat, 37.8710);
        assert_eq!(hits[1].lon, -122.2590);
    }

    #[test]
    fn full_search_is_exact_key() {
        let g = super::helpers::campus();
        assert!(g.locations("peets").is_empty());
        assert_eq!(g.locations("top dog").len(), 1);
    }

    #[test]
    fn duplicate_names_accumulate_by_default() {
        let mut b = super::helpers::campus_builder(NameIndexConfig::default());
        b.add_name(NodeId(2), "Top Dog");
        let g = b.build();
        let ids: Vec<_> = g.locations("top dog").iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![NodeId(2), NodeId(2)]);
        assert_eq!(g.locations_by_prefix("top").len(), 2);
    }

    #[test]
    fn duplicate_names_collapse_when_configured() {
        let config = NameIndexConfig { dedup_ids: true };
        let mut b = super::helpers::campus_builder(config);
        b.add_name(NodeId(2), "Top Dog");
        let g = b.build();
        assert_eq!(g.locations("top dog").len(), 1);
        assert_eq!(g.names().config(), config);
    }

    #[test]
    fn renamed_node_reports_current_name_under_old_key() {
        let mut b = super::helpers::campus_builder(NameIndexConfig::default());
        b.add_name(NodeId(2), "Jupiter");
        let g = b.build();
        assert_eq!(g.locations_by_prefix("top"), vec!["Jupiter"]);
        assert_eq!(g.locations_by_prefix("jup"), vec!["Jupiter"]);
    }

    #[test]
    fn unindexable_name_sets_display_name_only() {
        let mut b = SpatialGraphBuilder::new();
        b.add_node("", NodeId(1), 37.0, -122.0);
        assert!(b.add_name(NodeId(1), "76"));
        let g = b.build();
        assert!(g.names().is_empty());
        assert_eq!(g.node(NodeId(1)).unwrap().name(), "76");
    }

    #[test]
    fn add_node_name_is_not_indexed() {
        let mut b = SpatialGraphBuilder::new();
        b.add_node("Hidden Lane", NodeId(1), 37.0, -122.0);
        let g = b.build();
        assert!(g.locations("hidden lane").is_empty());
        assert_eq!(g.node(NodeId(1)).unwrap().name(), "Hidden Lane");
    }

    #[test]
    fn index_pattern_matching() {
        let mut idx = NameIndex::default();
        idx.insert("top dog".into(), NodeId(1));
        idx.insert("tip dog".into(), NodeId(2));
        idx.insert("top dogs".into(), NodeId(3));
        idx.insert(String::new(), NodeId(4));

        let m: Vec<_> = idx.keys_that_match("t.p dog").collect();
        assert_eq!(m, vec!["tip dog", "top dog"]);
        let m: Vec<_> = idx.keys_that_match("top dog").collect();
        assert_eq!(m, vec!["top dog"]);
        let p: Vec<_> = idx.keys_with_prefix("top").collect();
        assert_eq!(p, vec!["top dog", "top dogs"]);
        assert_eq!(idx.len(), 3);
        assert!(!idx.contains(""));
    }
}

// ── CSV loader ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use bm_core::{BmError, NodeId};
    use crate::{GraphError, NameIndexConfig, load_events_csv, load_events_reader};

    const CSV: &[u8] = b"\
event,id,lat,lon,other,name\n\
node,1,37.8700,-122.2600,,\n\
node,2,37.8700,-122.2590,,\n\
node,3,37.8800,-122.2500,,Ignored Display\n\
connect,1,,,2,\n\
name,2,,,,\"Peet's Coffee, Shattuck\"\n\
name,3,,,,Pegasus Books\n\
name,99,,,,Nowhere\n\
";

    #[test]
    fn loads_and_seals() {
        let g = load_events_reader(Cursor::new(CSV), NameIndexConfig::default()).unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.vertices().collect::<Vec<_>>(), vec![NodeId(1), NodeId(2)]);
        assert_eq!(g.locations_by_prefix("pe"), vec!["Peet's Coffee, Shattuck", "Pegasus Books"]);
        assert_eq!(g.names().len(), 2);
    }

    #[test]
    fn node_row_name_is_display_only() {
        let mut csv = CSV.to_vec();
        csv.extend_from_slice(b"node,4,37.0,-122.0,,Display Only\n");
        let g = load_events_reader(Cursor::new(csv), NameIndexConfig::default()).unwrap();
        assert_eq!(g.node(NodeId(4)).unwrap().name(), "Display Only");
        assert!(g.locations("display only").is_empty());
    }

    #[test]
    fn connect_to_unknown_node_errors() {
        let bad = b"\
event,id,lat,lon,other,name\n\
node,1,37.0,-122.0,,\n\
connect,1,,,2,\n\
";
        let result = load_events_reader(Cursor::new(bad.as_slice()), NameIndexConfig::default());
        assert!(matches!(result, Err(GraphError::NodeNotFound(NodeId(2)))));
    }

    #[test]
    fn unknown_event_errors() {
        let bad = b"\
event,id,lat,lon,other,name\n\
teleport,1,,,,\n\
";
        let result = load_events_reader(Cursor::new(bad.as_slice()), NameIndexConfig::default());
        assert!(matches!(result, Err(GraphError::Parse(_))));
    }

    #[test]
    fn missing_coordinates_error() {
        let bad = b"\
event,id,lat,lon,other,name\n\
node,1,37.0,,,\n\
";
        let result = load_events_reader(Cursor::new(bad.as_slice()), NameIndexConfig::default());
        assert!(matches!(result, Err(GraphError::Parse(msg)) if msg.contains("row 1")));
    }

    #[test]
    fn out_of_range_coordinates_error() {
        let bad = b"\
event,id,lat,lon,other,name\n\
node,1,137.0,-122.0,,\n\
";
        let result = load_events_reader(Cursor::new(bad.as_slice()), NameIndexConfig::default());
        assert!(matches!(
            result,
            Err(GraphError::Core(BmError::InvalidCoordinate { .. }))
        ));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV).unwrap();
        file.flush().unwrap();
        let g = load_events_csv(file.path(), NameIndexConfig::default()).unwrap();
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_events_csv(&dir.path().join("absent.csv"), NameIndexConfig::default());
        assert!(matches!(result, Err(GraphError::Io(_))));
    }
}

// ── OSM loader ────────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "osm"))]
mod osm {
    use std::io::Write;

    use crate::{GraphError, NameIndexConfig, osm::load_from_pbf};

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_from_pbf(&dir.path().join("absent.osm.pbf"), NameIndexConfig::default());
        assert!(matches!(result, Err(GraphError::Io(_))));
    }

    #[test]
    fn undecodable_file_is_osm_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not a protobuf blob stream").unwrap();
        file.flush().unwrap();
        let result = load_from_pbf(file.path(), NameIndexConfig::default());
        assert!(matches!(result, Err(GraphError::Osm(_))));
    }
}
