//! Discovery and decoding of semantic graph record files.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use memmap2::Mmap;
use protobuf::Message;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::domain::graph::{GraphRecord, NodeRecord};
use crate::domain::node_kind::NodeKind;
use crate::protos::scg::SemanticGraphFile;

/// Subdirectory of the workspace root that holds the records.
pub const RECORD_DIR_NAME: &str = ".semanticgraphs";
/// Suffix of record files. Anything else in the directory is skipped.
pub const RECORD_SUFFIX: &str = ".semanticgraphdb";

pub struct RecordLoader;

impl RecordLoader {
    /// Read every record file under `<workspace_root>/.semanticgraphs`.
    ///
    /// The walk is recursive, does not follow symlinks, and visits entries
    /// in sorted order so runs are reproducible. A missing record directory
    /// or a matching file that fails to decode aborts the load.
    pub fn load_workspace(workspace_root: &Path) -> Result<Vec<GraphRecord>> {
        let record_dir = workspace_root.join(RECORD_DIR_NAME);
        let mut records = Vec::new();
        for entry in WalkDir::new(&record_dir).sort_by_file_name() {
            let entry = entry.with_context(|| {
                format!("failed to walk record directory {}", record_dir.display())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let is_record = entry
                .file_name()
                .to_str()
                .map(|name| name.ends_with(RECORD_SUFFIX))
                .unwrap_or(false);
            if !is_record {
                debug!("skipping non-record file {}", entry.path().display());
                continue;
            }
            records.push(Self::read_record_file(entry.path())?);
        }
        info!(
            "loaded {} record files from {}",
            records.len(),
            record_dir.display()
        );
        Ok(records)
    }

    /// Decode a single `.semanticgraphdb` file.
    pub fn read_record_file(path: &Path) -> Result<GraphRecord> {
        let file = File::open(path)
            .with_context(|| format!("failed to open record file {}", path.display()))?;
        let len = file
            .metadata()
            .with_context(|| format!("failed to stat record file {}", path.display()))?
            .len();
        // mmap rejects zero-length files; an empty record has zero nodes.
        let wire = if len == 0 {
            SemanticGraphFile::new()
        } else {
            // Safety: the mapping is read-only and dropped before this returns.
            let mmap = unsafe { Mmap::map(&file) }
                .with_context(|| format!("failed to map record file {}", path.display()))?;
            SemanticGraphFile::parse_from_bytes(&mmap)
                .with_context(|| format!("failed to decode record file {}", path.display()))?
        };
        debug!("decoded {} nodes from {}", wire.nodes.len(), path.display());
        Ok(Self::into_record(wire, path))
    }

    fn into_record(wire: SemanticGraphFile, path: &Path) -> GraphRecord {
        let nodes = wire
            .nodes
            .into_iter()
            .map(|node| {
                let kind = NodeKind::from_wire(&node.kind);
                // An unset location decodes as the default message, so both
                // "no location" and "empty uri" land here as None.
                let uri = node.location.uri.clone();
                let targets = node.edges.iter().map(|edge| edge.to.clone()).collect();
                NodeRecord {
                    id: node.id,
                    kind,
                    display_name: node.display_name,
                    location: if uri.is_empty() { None } else { Some(uri) },
                    edges: targets,
                }
            })
            .collect();
        GraphRecord {
            source: path.to_path_buf(),
            nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use protobuf::MessageField;
    use tempfile::tempdir;

    use super::*;
    use crate::protos::scg::{Edge, GraphNode, Location};

    fn wire_node(id: &str, kind: &str, uri: &str, targets: &[&str]) -> GraphNode {
        let mut node = GraphNode::new();
        node.id = id.to_string();
        node.kind = kind.to_string();
        if !uri.is_empty() {
            let mut location = Location::new();
            location.uri = uri.to_string();
            node.location = MessageField::some(location);
        }
        for target in targets {
            let mut edge = Edge::new();
            edge.to = target.to_string();
            node.edges.push(edge);
        }
        node
    }

    fn write_record(dir: &Path, name: &str, nodes: Vec<GraphNode>) {
        let mut wire = SemanticGraphFile::new();
        wire.nodes = nodes;
        fs::write(dir.join(name), wire.write_to_bytes().unwrap()).unwrap();
    }

    #[test]
    fn test_load_skips_foreign_files_and_recurses() {
        let workspace = tempdir().unwrap();
        let record_dir = workspace.path().join(RECORD_DIR_NAME);
        let nested = record_dir.join("sub");
        fs::create_dir_all(&nested).unwrap();

        write_record(
            &record_dir,
            "root.semanticgraphdb",
            vec![wire_node("a", "CLASS", "a.rs", &["b"])],
        );
        write_record(
            &nested,
            "nested.semanticgraphdb",
            vec![wire_node("b", "METHOD", "b.rs", &[])],
        );
        fs::write(record_dir.join("README.txt"), "not a record").unwrap();
        fs::write(record_dir.join("old.semanticgraphdb.bak"), [0xffu8; 4]).unwrap();

        let records = RecordLoader::load_workspace(workspace.path()).unwrap();

        assert_eq!(records.len(), 2);
        let total_nodes: usize = records.iter().map(|record| record.nodes.len()).sum();
        assert_eq!(total_nodes, 2);
    }

    #[test]
    fn test_wire_fields_map_to_the_domain() {
        let workspace = tempdir().unwrap();
        let record_dir = workspace.path().join(RECORD_DIR_NAME);
        fs::create_dir_all(&record_dir).unwrap();

        let mut located = wire_node("app/Main#", "CLASS", "src/Main.scala", &["app/util#"]);
        located.display_name = "Main".to_string();
        let bare = wire_node("app/util#", "OBJECT", "", &[]);
        write_record(&record_dir, "app.semanticgraphdb", vec![located, bare]);

        let records = RecordLoader::load_workspace(workspace.path()).unwrap();
        let nodes = &records[0].nodes;

        assert_eq!(nodes[0].id, "app/Main#");
        assert_eq!(nodes[0].kind, NodeKind::Class);
        assert_eq!(nodes[0].display_name, "Main");
        assert_eq!(nodes[0].location.as_deref(), Some("src/Main.scala"));
        assert_eq!(nodes[0].edges, vec!["app/util#".to_string()]);
        assert_eq!(nodes[1].kind, NodeKind::Object);
        assert_eq!(nodes[1].location, None);
    }

    #[test]
    fn test_corrupt_record_fails_the_load() {
        let workspace = tempdir().unwrap();
        let record_dir = workspace.path().join(RECORD_DIR_NAME);
        fs::create_dir_all(&record_dir).unwrap();
        fs::write(record_dir.join("bad.semanticgraphdb"), [0xffu8; 16]).unwrap();

        let err = RecordLoader::load_workspace(workspace.path()).unwrap_err();
        assert!(format!("{err:#}").contains("bad.semanticgraphdb"));
    }

    #[test]
    fn test_missing_record_directory_is_fatal() {
        let workspace = tempdir().unwrap();
        assert!(RecordLoader::load_workspace(workspace.path()).is_err());
    }

    #[test]
    fn test_empty_record_directory_loads_nothing() {
        let workspace = tempdir().unwrap();
        fs::create_dir_all(workspace.path().join(RECORD_DIR_NAME)).unwrap();
        let records = RecordLoader::load_workspace(workspace.path()).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_zero_length_record_decodes_to_zero_nodes() {
        let workspace = tempdir().unwrap();
        let record_dir = workspace.path().join(RECORD_DIR_NAME);
        fs::create_dir_all(&record_dir).unwrap();
        fs::write(record_dir.join("empty.semanticgraphdb"), b"").unwrap();

        let records = RecordLoader::load_workspace(workspace.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].nodes.is_empty());
    }
}
