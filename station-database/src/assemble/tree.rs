//! Re-keying de l'arbre de recherche spatiale (kd-tree) en identifiants de station
//!
//! Un sommet dont le propre code ne se résout pas rend l'arbre incohérent avec
//! l'ensemble des stations : c'est une erreur fatale. Les liens `left`/`right`
//! non résolus deviennent des feuilles (warning). Les sous-arbres `segment` ne
//! sont pas parcourus, leur nom est conservé tel quel.

use crate::diagnostics::Diagnostics;
use crate::error::{ChildSide, Warning};
use crate::resolve::{Resolution, StationIndex};
use crate::types::{Ident, StationCode, Tree, TreeNode, TreeNodeRecord, TreeSegment};
use crate::DatasetError;

pub fn reconcile(
    segment: TreeSegment,
    stations: &StationIndex,
    diagnostics: &mut Diagnostics,
) -> Result<Tree, DatasetError> {
    let records = match segment.node_list {
        Some(records) => records,
        None => {
            diagnostics.warn(Warning::TreeNodeListMissing);
            Vec::new()
        }
    };

    let node_list = records
        .into_iter()
        .map(|record| reconcile_node(record, stations, diagnostics))
        .collect::<Result<Vec<_>, _>>()?;

    let root = match segment.root {
        None => {
            diagnostics.warn(Warning::TreeRootMissing);
            None
        }
        Some(code) => match stations.resolve(code) {
            Resolution::Resolved(id) => Some(id.clone()),
            Resolution::Missing => {
                diagnostics.warn(Warning::UnresolvedTreeRoot { code });
                None
            }
        },
    };

    Ok(Tree { root, node_list })
}

fn reconcile_node(
    record: TreeNodeRecord,
    stations: &StationIndex,
    diagnostics: &mut Diagnostics,
) -> Result<TreeNode, DatasetError> {
    let id = stations
        .resolve(record.code)
        .ok()
        .cloned()
        .ok_or(DatasetError::UnresolvedTreeNode(record.code))?;

    let left = resolve_child(record.code, ChildSide::Left, record.left, stations, diagnostics);
    let right = resolve_child(record.code, ChildSide::Right, record.right, stations, diagnostics);

    Ok(TreeNode {
        id,
        left,
        right,
        segment: record.segment,
    })
}

fn resolve_child(
    node: StationCode,
    side: ChildSide,
    child: Option<StationCode>,
    stations: &StationIndex,
    diagnostics: &mut Diagnostics,
) -> Option<Ident> {
    let code = child?;
    match stations.resolve(code) {
        Resolution::Resolved(id) => Some(id.clone()),
        Resolution::Missing => {
            diagnostics.warn(Warning::UnresolvedTreeChild { node, side, code });
            None
        }
    }
}
