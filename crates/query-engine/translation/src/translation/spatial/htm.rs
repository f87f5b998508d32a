//! The Hierarchical Triangular Mesh: trixel ids of positions and id-range covers of
//! convex regions.
//!
//! The sphere is split into eight root trixels, S0..S3 (ids 8..11) and N0..N3 (ids 12..15).
//! Each trixel is split into four children, the child `k` of trixel `id` having id
//! `4 * id + k`. A trixel at depth `d` therefore covers the ids `[id << 2(L - d),
//! ((id + 1) << 2(L - d)) - 1]` at level `L`.

use query_engine_metadata::metadata::{CoverSettings, Encoding};

use super::sphere::Vector3;

/// Slack on bounding-cap disjointness, in radians. It only makes covers larger.
const MARGIN: f64 = 1e-7;

/// A half-space of the sphere: the points `p` with `normal . p >= offset`. This is a cap of
/// angular radius `acos(offset)` around `normal`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    pub normal: Vector3,
    pub offset: f64,
}

impl Constraint {
    pub fn contains(&self, p: Vector3) -> bool {
        self.normal.dot(p) >= self.offset
    }

    fn radius(&self) -> f64 {
        self.offset.clamp(-1.0, 1.0).acos()
    }
}

/// The intersection of a set of half-spaces.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvexRegion {
    pub constraints: Vec<Constraint>,
}

/// An inclusive range of trixel ids at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Range {
    pub low: u64,
    pub high: u64,
}

#[derive(Debug, Clone, Copy)]
struct Trixel {
    id: u64,
    depth: u8,
    corners: [Vector3; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Coverage {
    Inside,
    Partial,
    Outside,
}

fn roots() -> [Trixel; 8] {
    let v = [
        Vector3::new(0.0, 0.0, 1.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
        Vector3::new(-1.0, 0.0, 0.0),
        Vector3::new(0.0, -1.0, 0.0),
        Vector3::new(0.0, 0.0, -1.0),
    ];
    let root = |id, corners: [usize; 3]| Trixel {
        id,
        depth: 0,
        corners: corners.map(|corner| v[corner]),
    };
    [
        root(8, [1, 5, 2]),
        root(9, [2, 5, 3]),
        root(10, [3, 5, 4]),
        root(11, [4, 5, 1]),
        root(12, [1, 0, 4]),
        root(13, [4, 0, 3]),
        root(14, [3, 0, 2]),
        root(15, [2, 0, 1]),
    ]
}

impl Trixel {
    fn children(&self) -> [Trixel; 4] {
        let [v0, v1, v2] = self.corners;
        let w0 = v1.add(v2).normalize();
        let w1 = v0.add(v2).normalize();
        let w2 = v0.add(v1).normalize();
        let child = |k: u64, corners| Trixel {
            id: self.id * 4 + k,
            depth: self.depth + 1,
            corners,
        };
        [
            child(0, [v0, w2, w1]),
            child(1, [v1, w0, w2]),
            child(2, [v2, w1, w0]),
            child(3, [w0, w1, w2]),
        ]
    }

    /// How far inside the three edges a point is. Non-negative exactly for the points of the
    /// trixel.
    fn edge_margin(&self, p: Vector3) -> f64 {
        let [v0, v1, v2] = self.corners;
        v0.cross(v1)
            .dot(p)
            .min(v1.cross(v2).dot(p))
            .min(v2.cross(v0).dot(p))
    }

    /// A cap containing the whole trixel.
    fn bounding_cap(&self) -> (Vector3, f64) {
        let [v0, v1, v2] = self.corners;
        let center = v0.add(v1).add(v2).normalize();
        let radius = self
            .corners
            .iter()
            .map(|corner| center.angle(*corner))
            .fold(0.0, f64::max);
        (center, radius)
    }

    fn classify(&self, region: &ConvexRegion) -> Coverage {
        let (center, radius) = self.bounding_cap();
        let mut inside = true;
        for constraint in &region.constraints {
            if constraint.normal.angle(center) > constraint.radius() + radius + MARGIN {
                return Coverage::Outside;
            }
            if !self.corners.iter().all(|corner| constraint.contains(*corner)) {
                inside = false;
            }
        }
        if inside {
            Coverage::Inside
        } else {
            Coverage::Partial
        }
    }

    fn range(&self, level: u8) -> Range {
        let shift = 2 * u32::from(level - self.depth);
        Range {
            low: self.id << shift,
            high: ((self.id + 1) << shift) - 1,
        }
    }
}

/// The trixel a point is furthest inside of.
fn closest<const N: usize>(trixels: [Trixel; N], p: Vector3) -> Trixel {
    let mut best = trixels[0];
    for trixel in trixels {
        if trixel.edge_margin(p) > best.edge_margin(p) {
            best = trixel;
        }
    }
    best
}

/// The id of the trixel at `level` containing a unit vector.
pub fn lookup(p: Vector3, level: u8) -> u64 {
    let mut trixel = closest(roots(), p);
    while trixel.depth < level {
        trixel = closest(trixel.children(), p);
    }
    trixel.id
}

/// The ids at `level` of the trixels touching a region, as sorted, disjoint, merged ranges.
/// The cover always includes every trixel holding a point of the region and may include a
/// few more. Refinement goes no deeper than the configured cover depth and stops before
/// the number of ranges would exceed the configured maximum.
pub fn cover(region: &ConvexRegion, level: u8, settings: CoverSettings) -> Vec<Range> {
    let max_depth = settings.max_cover_depth.min(level);

    let mut inside = vec![];
    let mut partial = vec![];
    for root in roots() {
        match root.classify(region) {
            Coverage::Inside => inside.push(root),
            Coverage::Partial => partial.push(root),
            Coverage::Outside => (),
        }
    }
    let mut ranges = merge(inside.iter().chain(&partial), level);

    for _ in 0..max_depth {
        if partial.is_empty() {
            break;
        }
        let mut next_inside = inside.clone();
        let mut next_partial = vec![];
        for child in partial.iter().flat_map(Trixel::children) {
            match child.classify(region) {
                Coverage::Inside => next_inside.push(child),
                Coverage::Partial => next_partial.push(child),
                Coverage::Outside => (),
            }
        }
        let next_ranges = merge(next_inside.iter().chain(&next_partial), level);
        if next_ranges.len() > settings.max_ranges {
            break;
        }
        inside = next_inside;
        partial = next_partial;
        ranges = next_ranges;
    }

    ranges
}

fn merge<'a>(trixels: impl Iterator<Item = &'a Trixel>, level: u8) -> Vec<Range> {
    let mut ranges: Vec<Range> = trixels.map(|trixel| trixel.range(level)).collect();
    ranges.sort_unstable();
    let mut merged: Vec<Range> = Vec::with_capacity(ranges.len());
    for range in ranges {
        match merged.last_mut() {
            Some(last) if range.low <= last.high + 1 => last.high = last.high.max(range.high),
            _ => merged.push(range),
        }
    }
    merged
}

/// Write a trixel id the way the index column stores it.
pub fn encode(id: u64, encoding: Encoding) -> String {
    match encoding {
        Encoding::Base10 => id.to_string(),
        Encoding::Base4 => {
            let mut digits = vec![];
            let mut rest = id;
            loop {
                digits.push(char::from(b'0' + (rest % 4) as u8));
                rest /= 4;
                if rest == 0 {
                    break;
                }
            }
            digits.iter().rev().collect()
        }
    }
}
