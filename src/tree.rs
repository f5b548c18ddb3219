use crate::frequency::FrequencyMap;
use crate::heap::{PriorityQueue, Weighted};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    Leaf {
        symbol: char,
        frequency: u64,
    },
    Internal {
        frequency: u64,
        left: Box<TreeNode>,
        right: Box<TreeNode>,
    },
}

impl TreeNode {
    pub fn leaf(symbol: char, frequency: u64) -> Self {
        TreeNode::Leaf { symbol, frequency }
    }

    /// Joins two subtrees; `left` is the one popped first.
    pub fn merge(left: TreeNode, right: TreeNode) -> Self {
        TreeNode::Internal {
            frequency: left.frequency() + right.frequency(),
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn frequency(&self) -> u64 {
        match self {
            TreeNode::Leaf { frequency, .. } | TreeNode::Internal { frequency, .. } => *frequency,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }
}

impl Weighted for TreeNode {
    fn weight(&self) -> u64 {
        self.frequency()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: TreeNode,
}

impl HuffmanTree {
    /// Builds the tree greedily. Returns `None` when there are no symbols.
    pub fn from_frequencies(frequencies: &FrequencyMap) -> Option<Self> {
        let mut queue = PriorityQueue::new();
        for (&symbol, &frequency) in frequencies {
            queue.push(TreeNode::leaf(symbol, frequency));
        }

        while queue.size() > 1 {
            let x = queue.pop()?;
            let y = queue.pop()?;
            queue.push(TreeNode::merge(x, y));
        }

        let root = queue.pop()?;
        tracing::debug!(
            symbols = frequencies.len(),
            total = root.frequency(),
            "built huffman tree"
        );
        Some(HuffmanTree { root })
    }

    pub fn leaf_count(&self) -> usize {
        fn count(node: &TreeNode) -> usize {
            match node {
                TreeNode::Leaf { .. } => 1,
                TreeNode::Internal { left, right, .. } => count(left) + count(right),
            }
        }
        count(&self.root)
    }
}
