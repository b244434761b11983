/// A 3D bounding box with an inclusive minimum and an exclusive maximum.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bounds3D {
    /// Inclusive minimum bound.
    pub min: (i32, i32, i32),
    /// Exclusive maximum bound.
    pub max: (i32, i32, i32),
}

impl Bounds3D {
    /// Create a new [Bounds3D] with the specified minimum and maximum bounds.
    pub fn new(min: (i32, i32, i32), max: (i32, i32, i32)) -> Self {
        Self { min, max }
    }

    /// Create a new [Bounds3D] from an origin and extents.
    pub fn from_origin(origin: (i32, i32, i32), size: (usize, usize, usize)) -> Self {
        Self {
            min: origin,
            max: (
                origin.0 + size.0 as i32,
                origin.1 + size.1 as i32,
                origin.2 + size.2 as i32,
            ),
        }
    }

    /// The size along the X axis.
    pub fn width(&self) -> u32 {
        (self.max.0 as i64 - self.min.0 as i64) as u32
    }

    /// The size along the Y axis.
    pub fn height(&self) -> u32 {
        (self.max.1 as i64 - self.min.1 as i64) as u32
    }

    /// The size along the Z axis.
    pub fn depth(&self) -> u32 {
        (self.max.2 as i64 - self.min.2 as i64) as u32
    }

    /// The volume is `width * height * depth`.
    pub fn volume(&self) -> u64 {
        self.width() as u64 * self.height() as u64 * self.depth() as u64
    }

    // intersects would need to copy self and other anyway, so
    // just accept copied values rather than references.
    /// Tests for intersection with another [Bounds3D].
    pub fn intersects(self, other: Bounds3D) -> bool {
        let (ax_min, ay_min, az_min) = self.min;
        let (ax_max, ay_max, az_max) = self.max;
        let (bx_min, by_min, bz_min) = other.min;
        let (bx_max, by_max, bz_max) = other.max;
        ax_min < bx_max
            && bx_min < ax_max
            && ay_min < by_max
            && by_min < ay_max
            && az_min < bz_max
            && bz_min < az_max
    }

    /// Determine if a point is within the [Bounds3D].
    pub fn contains(self, point: (i32, i32, i32)) -> bool {
        point.0 >= self.min.0
            && point.1 >= self.min.1
            && point.2 >= self.min.2
            && point.0 < self.max.0
            && point.1 < self.max.1
            && point.2 < self.max.2
    }

    /// Iterate over the points in the [Bounds3D].
    ///
    /// Points are visited `x -> y -> z`, the same order cells are laid out
    /// in a window buffer.
    pub fn iter(self) -> Bounds3DIter {
        Bounds3DIter {
            bounds: self,
            current: self.min,
        }
    }

    fn is_empty(&self) -> bool {
        self.min.0 >= self.max.0 || self.min.1 >= self.max.1 || self.min.2 >= self.max.2
    }
}

/// Iterator for all points within a [Bounds3D].
pub struct Bounds3DIter {
    bounds: Bounds3D,
    current: (i32, i32, i32),
}

impl Iterator for Bounds3DIter {
    type Item = (i32, i32, i32);

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.bounds.is_empty() || self.current.2 == self.bounds.max.2 {
            return (0, Some(0));
        }
        let (x, y, z) = (
            (self.current.0 - self.bounds.min.0) as usize,
            (self.current.1 - self.bounds.min.1) as usize,
            (self.current.2 - self.bounds.min.2) as usize,
        );
        let width = self.bounds.width() as usize;
        let height = self.bounds.height() as usize;
        let volume = self.bounds.volume() as usize;
        let index = (z * height + y) * width + x;
        (volume - index, Some(volume - index))
    }

    fn next(&mut self) -> Option<Self::Item> {
        if self.bounds.is_empty() || self.current.2 == self.bounds.max.2 {
            return None;
        }
        let result = self.current;
        // inc x, then y, then z
        self.current = if result.0 + 1 == self.bounds.max.0 {
            if result.1 + 1 == self.bounds.max.1 {
                (self.bounds.min.0, self.bounds.min.1, result.2 + 1)
            } else {
                (self.bounds.min.0, result.1 + 1, result.2)
            }
        } else {
            (result.0 + 1, result.1, result.2)
        };
        Some(result)
    }
}

impl ExactSizeIterator for Bounds3DIter {}
