//! Hierarchy reconstruction and subtree resolution.
//!
//! The entry stream encodes the tree as balanced markers in a flat pre-order
//! list. An explicit stack of open folders turns that list back into a tree
//! in one linear pass: O(entries) time, O(nesting depth) auxiliary space.
//! The stack also avoids unbounded call depth on deeply nested hierarchies
//! and lets a mismatch name both the expected and the found uri.

use crate::rootlist::types::error::{Result, RootlistError};
use crate::rootlist::types::models::{Entry, Node};

/// Reported as the "found" side when entries end with folders still open.
const END_OF_ENTRIES: &str = "<end of entries>";

struct OpenFolder {
    name: String,
    uri: String,
    children: Vec<Node>,
}

impl OpenFolder {
    fn close(self) -> Node {
        Node::Folder {
            name: self.name,
            uri: self.uri,
            children: self.children,
        }
    }
}

/// Builds the tree from an ordered entry stream.
///
/// The stack starts with the synthetic root. `FolderStart` pushes a new open
/// folder, `PlaylistRef` appends a leaf to the innermost one, and
/// `FolderEnd` must name the innermost open folder's uri, then pops it into
/// its parent. Sibling order is exactly entry order; nothing is re-sorted.
///
/// # Errors
/// [`RootlistError::UnbalancedHierarchy`] when an end marker does not match
/// the innermost open folder, when an end marker arrives with no folder
/// open, or when the stream ends with folders still open.
pub fn build<I>(entries: I) -> Result<Node>
where
    I: IntoIterator<Item = Result<Entry>>,
{
    let mut stack = vec![OpenFolder {
        name: String::new(),
        uri: String::new(),
        children: Vec::new(),
    }];

    for entry in entries {
        match entry? {
            Entry::FolderStart { uri, name } => {
                stack.push(OpenFolder {
                    name,
                    uri,
                    children: Vec::new(),
                });
            }
            Entry::PlaylistRef { uri } => {
                // The stack is never empty: the root is only popped below
                // when it is the last element, which returns immediately.
                stack
                    .last_mut()
                    .expect("stack holds at least the root")
                    .children
                    .push(Node::Playlist { uri });
            }
            Entry::FolderEnd { uri } => {
                if stack.len() == 1 {
                    return Err(RootlistError::UnbalancedHierarchy {
                        expected: "<no open folder>".to_string(),
                        found: uri,
                    });
                }
                let top = stack.pop().expect("stack holds at least two folders");
                if top.uri != uri {
                    return Err(RootlistError::UnbalancedHierarchy {
                        expected: top.uri,
                        found: uri,
                    });
                }
                stack
                    .last_mut()
                    .expect("parent folder remains on the stack")
                    .children
                    .push(top.close());
            }
        }
    }

    if stack.len() > 1 {
        let innermost = stack.pop().expect("stack holds the unterminated folder");
        return Err(RootlistError::UnbalancedHierarchy {
            expected: innermost.uri,
            found: END_OF_ENTRIES.to_string(),
        });
    }
    Ok(stack.pop().expect("stack holds the root").close())
}

/// Resolves a folder inside the tree by identifier.
///
/// With no target the root is returned. Otherwise folders are searched in
/// pre-order and the first whose uri ends with `folder_id` wins, so both a
/// bare group id and a full folder uri resolve. The returned node is a view
/// into `root`; nothing is copied or mutated.
///
/// # Errors
/// [`RootlistError::FolderNotFound`] when no folder matches.
pub fn resolve<'a>(root: &'a Node, folder_id: Option<&str>) -> Result<&'a Node> {
    let Some(folder_id) = folder_id else {
        return Ok(root);
    };
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        if let Node::Folder { uri, children, .. } = node {
            if uri.ends_with(folder_id) {
                return Ok(node);
            }
            // Reverse so pre-order siblings are visited left to right.
            pending.extend(children.iter().rev());
        }
    }
    Err(RootlistError::FolderNotFound(folder_id.to_string()))
}
