/// Disjoint-set forest over `0..size`, with path halving and union by rank.
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    /// Number of disjoint sets
    sets: usize,
}

impl UnionFind {
    /// Creates `size` singleton sets.
    pub fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
            sets: size,
        }
    }

    /// Number of disjoint sets left.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Returns the representative of the set containing `x`.
    /// The representative stays the same until the next successful [`UnionFind::union`].
    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            // Point x at its grandparent on the way up
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Merges the sets containing `x` and `y`.
    /// Returns `false` if they were already in the same set.
    pub fn union(&mut self, x: usize, y: usize) -> bool {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return false; // Already in same set
        }

        match self.rank[root_x].cmp(&self.rank[root_y]) {
            std::cmp::Ordering::Greater => {
                self.parent[root_y] = root_x;
            }
            std::cmp::Ordering::Less => {
                self.parent[root_x] = root_y;
            }
            std::cmp::Ordering::Equal => {
                self.parent[root_y] = root_x;
                self.rank[root_x] += 1;
            }
        }
        self.sets -= 1;
        true
    }

    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }
}
