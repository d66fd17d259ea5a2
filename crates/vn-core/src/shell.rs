//! Lazy, grid-free enumeration of coordinates by expanding shell distance.
//!
//! Both enumerators are pure arithmetic: they never touch the grid, produce
//! the same order on every run, and can be restarted.  They start at shell 1;
//! the centre itself is never yielded.
//!
//! | Enumerator          | Shell metric | Points in shell `d`          |
//! |---------------------|--------------|------------------------------|
//! | [`OctahedronShell`] | Manhattan    | `4d² + 2`                    |
//! | [`CuboidShell`]     | Chebyshev    | `(2d+1)³ − (2d−1)³`          |

use crate::Coord;

// ── OctahedronShell ───────────────────────────────────────────────────────────

/// Iterates the surfaces of octahedra (Manhattan spheres) of growing radius
/// around `center`, up to and including `max_distance`.
///
/// Within one shell the order is: ascending `dy`, then ascending `dx`, then
/// `-dz` before `+dz`.
#[derive(Clone, Debug)]
pub struct OctahedronShell {
    center:       Coord,
    max_distance: i32,
    d:            i32,
    dy:           i32,
    dx:           i32,
    positive_z:   bool,
}

impl OctahedronShell {
    pub fn new(center: Coord, max_distance: u32) -> Self {
        let mut shell = Self {
            center,
            max_distance: max_distance.min(i32::MAX as u32) as i32,
            d:            1,
            dy:           -1,
            dx:           0,
            positive_z:   false,
        };
        shell.restart();
        shell
    }

    /// Rewind to the first coordinate of shell 1.
    pub fn restart(&mut self) {
        self.d = 1;
        self.dy = -1;
        self.dx = 0;
        self.positive_z = false;
    }

    /// Shell distance of the next coordinate to be yielded.
    pub fn shell(&self) -> u32 {
        self.d as u32
    }

    pub fn center(&self) -> Coord {
        self.center
    }

    fn advance(&mut self, dz: i32) {
        if !self.positive_z && dz != 0 {
            self.positive_z = true;
            return;
        }
        self.positive_z = false;
        let rem = self.d - self.dy.abs();
        self.dx += 1;
        if self.dx > rem {
            self.dy += 1;
            if self.dy > self.d {
                self.d += 1;
                self.dy = -self.d;
            }
            self.dx = -(self.d - self.dy.abs());
        }
    }
}

impl Iterator for OctahedronShell {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.d > self.max_distance {
            return None;
        }
        let (dx, dy) = (self.dx, self.dy);
        let dz = self.d - dy.abs() - dx.abs();
        let out = self.center.offset(dx, dy, if self.positive_z { dz } else { -dz });
        self.advance(dz);
        Some(out)
    }
}

// ── CuboidShell ───────────────────────────────────────────────────────────────

/// Iterates the surfaces of cubes of growing radius around `center`, up to
/// and including `max_radius`.
///
/// Supports chunked pulls via [`next_chunk`](Self::next_chunk) so callers can
/// spread a large radius over several quanta.
#[derive(Clone, Debug)]
pub struct CuboidShell {
    center:     Coord,
    max_radius: i32,
    r:          i32,
    x:          i32,
    y:          i32,
    z:          i32,
}

impl CuboidShell {
    pub fn new(center: Coord, max_radius: u32) -> Self {
        Self {
            center,
            max_radius: max_radius.min(i32::MAX as u32) as i32,
            r: 1,
            x: -1,
            y: -1,
            z: -1,
        }
    }

    pub fn restart(&mut self) {
        self.r = 1;
        self.x = -1;
        self.y = -1;
        self.z = -1;
    }

    /// Radius of the next coordinate to be yielded.
    pub fn radius(&self) -> u32 {
        self.r as u32
    }

    /// Pull up to `n` coordinates.  An empty vec means the enumeration is done.
    pub fn next_chunk(&mut self, n: usize) -> Vec<Coord> {
        self.by_ref().take(n).collect()
    }

    fn advance(&mut self) {
        let r = self.r;
        let interior_xy = self.x.abs() < r && self.y.abs() < r;
        if interior_xy && self.z == -r {
            self.z = r;
        } else if self.z < r {
            self.z += 1;
        } else {
            self.z = -r;
            if self.y < r {
                self.y += 1;
            } else {
                self.y = -r;
                if self.x < r {
                    self.x += 1;
                } else {
                    self.r += 1;
                    self.x = -self.r;
                    self.y = -self.r;
                    self.z = -self.r;
                }
            }
        }
    }
}

impl Iterator for CuboidShell {
    type Item = Coord;

    fn next(&mut self) -> Option<Coord> {
        if self.r > self.max_radius {
            return None;
        }
        let out = self.center.offset(self.x, self.y, self.z);
        self.advance();
        Some(out)
    }
}
