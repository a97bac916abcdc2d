//! Behavior of the core decoding pipeline: records → entries → tree.

mod common;

use common::*;
use serde_json::json;
use spotify_folders::rootlist::codec::compression::decode_block;
use spotify_folders::rootlist::format::tree;
use spotify_folders::{Entry, Node, Result, Rootlist, RootlistError};

fn folder_uri(id: &str) -> String {
    format!("spotify:user:unknown:folder:{:0>16}", id)
}

fn parse(uris: &[&str]) -> Result<Rootlist> {
    Rootlist::parse(&rootlist_value(uris), "unknown")
}

/// Re-emits a tree as its pre-order entry sequence.
fn flatten(node: &Node, out: &mut Vec<Entry>) {
    match node {
        Node::Folder { name, uri, children } => {
            out.push(Entry::FolderStart {
                uri: uri.clone(),
                name: name.clone(),
            });
            for child in children {
                flatten(child, out);
            }
            out.push(Entry::FolderEnd { uri: uri.clone() });
        }
        Node::Playlist { uri } => out.push(Entry::PlaylistRef { uri: uri.clone() }),
    }
}

#[test]
fn scenario_builds_documented_shape() {
    let rootlist = parse(&seasons_uris()).unwrap();
    let expected = Node::Folder {
        name: String::new(),
        uri: String::new(),
        children: vec![Node::Folder {
            name: "Seasons".to_string(),
            uri: folder_uri("f1"),
            children: vec![
                Node::Folder {
                    name: "Summer".to_string(),
                    uri: folder_uri("f2"),
                    children: vec![Node::Playlist {
                        uri: "spotify:playlist:p1".to_string(),
                    }],
                },
                Node::Playlist {
                    uri: "spotify:playlist:p2".to_string(),
                },
            ],
        }],
    };
    assert_eq!(rootlist.root(), &expected);
}

#[test]
fn scenario_resolves_summer_subtree() {
    let rootlist = parse(&seasons_uris()).unwrap();
    let subtree = rootlist.folder(Some("f2")).unwrap();
    let Node::Folder { name, children, .. } = subtree else {
        panic!("expected a folder, got {:?}", subtree);
    };
    assert_eq!(name, "Summer");
    assert_eq!(
        children.as_slice(),
        &[Node::Playlist {
            uri: "spotify:playlist:p1".to_string()
        }]
    );
}

#[test]
fn scenario_missing_folder_is_not_found() {
    let rootlist = parse(&seasons_uris()).unwrap();
    let err = rootlist.folder(Some("zzz")).unwrap_err();
    assert!(matches!(err, RootlistError::FolderNotFound(id) if id == "zzz"));
}

#[test]
fn no_target_resolves_to_root() {
    let rootlist = parse(&seasons_uris()).unwrap();
    assert_eq!(rootlist.folder(None).unwrap(), rootlist.root());
}

#[test]
fn full_folder_uri_resolves_too() {
    let rootlist = parse(&seasons_uris()).unwrap();
    let full_uri = folder_uri("f2");
    let subtree = rootlist.folder(Some(full_uri.as_str())).unwrap();
    assert_eq!(subtree.uri(), full_uri);
}

#[test]
fn balanced_entries_roundtrip_through_the_tree() {
    let entries = vec![
        Entry::FolderStart {
            uri: "u:a".to_string(),
            name: "A".to_string(),
        },
        Entry::PlaylistRef {
            uri: "p:1".to_string(),
        },
        Entry::FolderStart {
            uri: "u:b".to_string(),
            name: "B".to_string(),
        },
        Entry::FolderEnd {
            uri: "u:b".to_string(),
        },
        Entry::PlaylistRef {
            uri: "p:2".to_string(),
        },
        Entry::FolderEnd {
            uri: "u:a".to_string(),
        },
        Entry::PlaylistRef {
            uri: "p:3".to_string(),
        },
    ];
    let root = tree::build(entries.iter().cloned().map(Ok)).unwrap();
    let mut reemitted = Vec::new();
    flatten(&root, &mut reemitted);
    // Strip the synthetic root's own start/end markers.
    assert_eq!(&reemitted[1..reemitted.len() - 1], entries.as_slice());
}

#[test]
fn mismatched_end_marker_is_unbalanced() {
    let err = parse(&[
        "spotify:start-group:f1:Seasons",
        "spotify:end-group:f9",
    ])
    .unwrap_err();
    match err {
        RootlistError::UnbalancedHierarchy { expected, found } => {
            assert_eq!(expected, folder_uri("f1"));
            assert_eq!(found, folder_uri("f9"));
        }
        other => panic!("expected UnbalancedHierarchy, got {:?}", other),
    }
}

#[test]
fn unterminated_folder_is_unbalanced() {
    let err = parse(&["spotify:start-group:f1:Seasons"]).unwrap_err();
    assert!(matches!(err, RootlistError::UnbalancedHierarchy { .. }));
}

#[test]
fn end_marker_without_open_folder_is_unbalanced() {
    let err = parse(&["spotify:end-group:f1"]).unwrap_err();
    assert!(matches!(err, RootlistError::UnbalancedHierarchy { .. }));
}

#[test]
fn unknown_fields_do_not_change_the_projection() {
    let clean = parse(&seasons_uris()).unwrap();

    // The same uris with unknown fields scattered at both nesting levels
    // and a non-structural item in the middle.
    let mut noisy = Vec::new();
    push_varint_record(&mut noisy, 1, 114_800_625);
    push_varint_record(&mut noisy, 5, 0xdead_beef);
    push_bytes_record(&mut noisy, 9, b"opaque future field");
    for uri in seasons_uris() {
        let mut item_bytes = item(uri);
        push_varint_record(&mut item_bytes, 3, 42);
        push_bytes_record(&mut item_bytes, 7, b"row metadata");
        push_bytes_record(&mut noisy, 2, &item_bytes);
    }
    push_bytes_record(&mut noisy, 2, &item("spotify:album:not-structural"));

    let parsed = Rootlist::parse(&noisy, "unknown").unwrap();
    assert_eq!(parsed.root(), clean.root());
}

#[test]
fn unknown_wire_kind_is_rejected() {
    let mut data = Vec::new();
    push_tag(&mut data, 3, 5);
    let err = Rootlist::parse(&data, "unknown").unwrap_err();
    assert!(matches!(err, RootlistError::UnknownWireKind(5)));
}

#[test]
fn overlong_declared_length_is_truncated() {
    let mut data = Vec::new();
    push_tag(&mut data, 2, 2);
    push_varint(&mut data, 100);
    data.extend_from_slice(b"short");
    let err = Rootlist::parse(&data, "unknown").unwrap_err();
    assert!(matches!(
        err,
        RootlistError::TruncatedRecord {
            needed: 100,
            remaining: 5
        }
    ));
}

#[test]
fn start_group_without_name_is_incomplete() {
    let err = parse(&["spotify:start-group:f1"]).unwrap_err();
    assert!(matches!(
        err,
        RootlistError::IncompleteEntry {
            missing: "folder name",
            ..
        }
    ));
}

#[test]
fn start_group_without_id_is_incomplete() {
    let err = parse(&["spotify:start-group::Seasons"]).unwrap_err();
    assert!(matches!(
        err,
        RootlistError::IncompleteEntry {
            missing: "folder id",
            ..
        }
    ));
}

#[test]
fn item_without_uri_is_incomplete() {
    let mut data = Vec::new();
    let mut item_bytes = Vec::new();
    push_varint_record(&mut item_bytes, 3, 42);
    push_bytes_record(&mut data, 2, &item_bytes);
    let err = Rootlist::parse(&data, "unknown").unwrap_err();
    assert!(matches!(
        err,
        RootlistError::IncompleteEntry {
            missing: "item uri",
            ..
        }
    ));
}

#[test]
fn folder_names_are_form_decoded() {
    let rootlist = parse(&[
        "spotify:start-group:f1:Summer+%26+Fun+%28%2B%29",
        "spotify:end-group:f1",
    ])
    .unwrap();
    let Some([Node::Folder { name, .. }]) = rootlist.root().children() else {
        panic!("expected one folder");
    };
    assert_eq!(name, "Summer & Fun (+)");
}

#[test]
fn sibling_order_is_preserved() {
    let uris: Vec<String> = (0..5).map(|i| format!("spotify:playlist:p{}", i)).collect();
    let uri_refs: Vec<&str> = uris.iter().map(String::as_str).collect();
    let rootlist = parse(&uri_refs).unwrap();
    let children = rootlist.root().children().unwrap();
    let got: Vec<&str> = children.iter().map(Node::uri).collect();
    assert_eq!(got, uri_refs);
}

#[test]
fn json_layout_matches_serializer_contract() {
    let rootlist = parse(&seasons_uris()).unwrap();
    let value = serde_json::to_value(rootlist.folder(Some("f2")).unwrap()).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "folder",
            "name": "Summer",
            "uri": folder_uri("f2"),
            "children": [
                { "type": "playlist", "uri": "spotify:playlist:p1" }
            ]
        })
    );
}

#[cfg(feature = "snappy")]
#[test]
fn snappy_block_roundtrips() {
    let original: Vec<u8> = rootlist_value(&seasons_uris())
        .iter()
        .cycle()
        .take(4096)
        .copied()
        .collect();
    let compressed = snap::raw::Encoder::new().compress_vec(&original).unwrap();
    assert_eq!(decode_block(&compressed, 1).unwrap(), original);
}

#[cfg(feature = "snappy")]
#[test]
fn out_of_range_back_reference_is_malformed() {
    // Declared length 4, then a copy of 4 bytes from offset 1 with no
    // output produced yet.
    let bogus = [0x04, 0x01, 0x01];
    let err = decode_block(&bogus, 1).unwrap_err();
    assert!(matches!(err, RootlistError::MalformedBlock(_)));
}

#[test]
fn plain_blocks_pass_through() {
    assert_eq!(decode_block(b"as-is", 0).unwrap(), b"as-is");
}

#[test]
fn unknown_block_marker_is_unrecognized() {
    let err = decode_block(b"whatever", 7).unwrap_err();
    assert!(matches!(err, RootlistError::UnrecognizedCacheFormat(7)));
}
