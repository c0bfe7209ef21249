use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// A review row as stored: flat, with an optional parent pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatReview {
    pub id: i32,
    pub name: String,
    pub text: String,
    pub parent_id: Option<i32>,
}

/// A review with its replies embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewNode {
    pub id: i32,
    pub name: String,
    pub text: String,
    pub children: Vec<ReviewNode>,
}

impl ReviewNode {
    /// Number of reviews in this subtree, the node itself included.
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        1 + self.children.iter().map(Self::subtree_size).sum::<usize>()
    }
}

/// Assembles the review forest of one movie from its flat rows.
///
/// Roots are rows without a parent or whose parent is not among `reviews`.
/// Siblings keep ascending id order. Rows caught in a parent cycle that no
/// root reaches are left out.
#[must_use]
pub fn build_forest(mut reviews: Vec<FlatReview>) -> Vec<ReviewNode> {
    reviews.sort_by_key(|r| r.id);

    let known: HashSet<i32> = reviews.iter().map(|r| r.id).collect();

    let mut roots: Vec<usize> = Vec::new();
    let mut children: HashMap<i32, Vec<usize>> = HashMap::new();
    for (idx, review) in reviews.iter().enumerate() {
        match review.parent_id {
            Some(parent) if known.contains(&parent) => {
                children.entry(parent).or_default().push(idx);
            }
            _ => roots.push(idx),
        }
    }

    // Pre-order walk from the roots; every row has one parent so each is
    // reached at most once.
    let mut order: Vec<usize> = Vec::with_capacity(reviews.len());
    let mut visited = vec![false; reviews.len()];
    let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
    while let Some(idx) = stack.pop() {
        if std::mem::replace(&mut visited[idx], true) {
            continue;
        }
        order.push(idx);
        if let Some(kids) = children.get(&reviews[idx].id) {
            stack.extend(kids.iter().rev().copied());
        }
    }

    // Children come after their parent in pre-order, so building in reverse
    // finishes every subtree before its parent needs it.
    let mut built: Vec<Option<ReviewNode>> = vec![None; reviews.len()];
    for &idx in order.iter().rev() {
        let review = &reviews[idx];
        let nested = children
            .get(&review.id)
            .map(|kids| kids.iter().filter_map(|&k| built[k].take()).collect())
            .unwrap_or_default();
        built[idx] = Some(ReviewNode {
            id: review.id,
            name: review.name.clone(),
            text: review.text.clone(),
            children: nested,
        });
    }

    roots.into_iter().filter_map(|idx| built[idx].take()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(id: i32, parent_id: Option<i32>) -> FlatReview {
        FlatReview {
            id,
            name: format!("name-{id}"),
            text: format!("text-{id}"),
            parent_id,
        }
    }

    #[test]
    fn replies_nest_under_their_parent() {
        let forest = build_forest(vec![review(3, None), review(4, Some(3))]);

        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, 3);
        assert_eq!(forest[0].children.len(), 1);
        assert_eq!(forest[0].children[0].id, 4);
        assert!(forest[0].children[0].children.is_empty());
    }

    #[test]
    fn deep_threads_and_sibling_order() {
        let forest = build_forest(vec![
            review(7, Some(2)),
            review(1, None),
            review(2, Some(1)),
            review(5, Some(1)),
            review(9, Some(7)),
            review(3, None),
        ]);

        let root_ids: Vec<i32> = forest.iter().map(|n| n.id).collect();
        assert_eq!(root_ids, vec![1, 3]);

        let first = &forest[0];
        let child_ids: Vec<i32> = first.children.iter().map(|n| n.id).collect();
        assert_eq!(child_ids, vec![2, 5]);
        assert_eq!(first.children[0].children[0].id, 7);
        assert_eq!(first.children[0].children[0].children[0].id, 9);
        assert_eq!(first.subtree_size(), 5);
    }

    #[test]
    fn reply_to_unknown_parent_becomes_root() {
        let forest = build_forest(vec![review(1, None), review(2, Some(40))]);
        let root_ids: Vec<i32> = forest.iter().map(|n| n.id).collect();
        assert_eq!(root_ids, vec![1, 2]);
    }

    #[test]
    fn unrooted_cycles_terminate() {
        let forest = build_forest(vec![
            review(1, None),
            review(2, Some(3)),
            review(3, Some(2)),
            review(4, Some(4)),
        ]);
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].id, 1);
    }

    #[test]
    fn empty_input_builds_empty_forest() {
        assert!(build_forest(Vec::new()).is_empty());
    }
}
