pub trait AddCoord<Rhs> {
    type Output;
    fn add_coord(self, rhs: Rhs) -> Self::Output;
}

pub trait SubCoord<Rhs> {
    type Output;
    fn sub_coord(self, rhs: Rhs) -> Self::Output;
}

pub trait DivCoord<Rhs> {
    type Output;
    fn div_coord(self, rhs: Rhs) -> Self::Output;
}

// ******** IMPLEMENTATIONS ********

impl AddCoord<(i32, i32, i32)> for (i32, i32, i32) {
    type Output = (i32, i32, i32);
    #[inline(always)]
    fn add_coord(self, rhs: (i32, i32, i32)) -> Self::Output {
        (self.0 + rhs.0, self.1 + rhs.1, self.2 + rhs.2)
    }
}

impl SubCoord<(i32, i32, i32)> for (i32, i32, i32) {
    type Output = (i32, i32, i32);
    #[inline(always)]
    fn sub_coord(self, rhs: (i32, i32, i32)) -> Self::Output {
        (self.0 - rhs.0, self.1 - rhs.1, self.2 - rhs.2)
    }
}

impl DivCoord<i32> for (i32, i32, i32) {
    type Output = (i32, i32, i32);
    #[inline(always)]
    fn div_coord(self, rhs: i32) -> Self::Output {
        (self.0 / rhs, self.1 / rhs, self.2 / rhs)
    }
}

/// Converts extents to signed coordinates.
/// Extents are bounded by `i32::MAX` when a grid is created or resized.
#[inline]
pub(crate) const fn size_to_coord(size: (usize, usize, usize)) -> (i32, i32, i32) {
    (size.0 as i32, size.1 as i32, size.2 as i32)
}

/// Subtracts `origin` from `coord` without overflowing, producing a local position.
#[inline]
pub(crate) const fn local_delta(coord: (i32, i32, i32), origin: (i32, i32, i32)) -> (i64, i64, i64) {
    (
        coord.0 as i64 - origin.0 as i64,
        coord.1 as i64 - origin.1 as i64,
        coord.2 as i64 - origin.2 as i64,
    )
}

/// Clamps a window origin so that `origin + size` is still an `i32` on every axis.
pub(crate) fn clamp_origin(origin: (i64, i64, i64), size: (usize, usize, usize)) -> (i32, i32, i32) {
    fn clamp(value: i64, extent: usize) -> i32 {
        value.clamp(i32::MIN as i64, i32::MAX as i64 - extent as i64) as i32
    }
    (
        clamp(origin.0, size.0),
        clamp(origin.1, size.1),
        clamp(origin.2, size.2),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_origin_test() {
        assert_eq!(clamp_origin((-4, 0, 9), (3, 3, 3)), (-4, 0, 9));
        assert_eq!(
            clamp_origin((i32::MAX as i64, i64::MIN / 2, 0), (3, 1, 1)),
            (i32::MAX - 3, i32::MIN, 0),
        );
    }

    #[test]
    fn coord_arithmetic() {
        assert_eq!((1, 2, 3).add_coord((-1, 5, 0)), (0, 7, 3));
        assert_eq!((1, 2, 3).sub_coord((4, 4, 4)), (-3, -2, -1));
        assert_eq!((5, 4, 3).div_coord(2), (2, 2, 1));
        assert_eq!(
            local_delta((i32::MAX, 0, i32::MIN), (i32::MIN, 0, i32::MAX)),
            (u32::MAX as i64, 0, -(u32::MAX as i64)),
        );
    }
}
