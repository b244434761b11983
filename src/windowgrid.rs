use crate::bounds3d::Bounds3D;
use crate::error::{Result, WindowError};
use crate::error_messages::*;
use crate::math::*;
use log::{debug, trace};

pub type Coord = (i32, i32, i32);

/// Called with the world coordinate and the value of every non-empty cell that
/// leaves the window.
pub type EvictCallback<T> = Box<dyn FnMut(Coord, T)>;

/// A fixed-size 3D window over an unbounded grid of cells.
///
/// A cell holding `T::default()` is empty. Empty cells are not counted and are
/// never reported to the eviction callback.
///
/// Cells are stored `x -> y -> z`, so the buffer index of a local position is
/// `(z * height + y) * width + x`.
pub struct WindowedGrid<T> {
    cells: Vec<T>,
    /// Same size as `cells`. Translation writes into it and then swaps.
    scratch: Vec<T>,
    size: (usize, usize, usize),
    /// `offset + size` fits in `i32` on every axis.
    offset: Coord,
    count: usize,
    on_evict: Option<EvictCallback<T>>,
}

fn checked_volume(width: usize, height: usize, depth: usize) -> usize {
    let volume = width
        .checked_mul(height)
        .expect(SIZE_TOO_LARGE)
        .checked_mul(depth)
        .expect(SIZE_TOO_LARGE);
    if volume == 0 {
        panic!("{VOLUME_IS_ZERO}");
    }
    if volume > i32::MAX as usize {
        panic!("{SIZE_TOO_LARGE}");
    }
    volume
}

fn empty_buffer<T: Default>(volume: usize) -> Vec<T> {
    (0..volume).map(|_| T::default()).collect()
}

impl<T: Default + PartialEq> WindowedGrid<T> {
    /// Create a window of `width * height * depth` empty cells with its origin at `(0, 0, 0)`.
    ///
    /// # Panics
    /// If any extent is 0 or the volume exceeds `i32::MAX`.
    pub fn new(width: usize, height: usize, depth: usize) -> Self {
        Self::with_offset(width, height, depth, (0, 0, 0))
    }

    /// Create a window of empty cells with its origin at `offset`.
    ///
    /// # Panics
    /// If any extent is 0, the volume exceeds `i32::MAX`, or the far corner of
    /// the window does not fit in `i32`.
    pub fn with_offset<C: Into<Coord>>(width: usize, height: usize, depth: usize, offset: C) -> Self {
        let offset: Coord = offset.into();
        let volume = checked_volume(width, height, depth);
        if offset.0.checked_add(width as i32).is_none()
            || offset.1.checked_add(height as i32).is_none()
            || offset.2.checked_add(depth as i32).is_none()
        {
            panic!("{OFFSET_TOO_CLOSE_TO_MAX}");
        }
        Self {
            cells: empty_buffer(volume),
            scratch: empty_buffer(volume),
            size: (width, height, depth),
            offset,
            count: 0,
            on_evict: None,
        }
    }

    /// Install the eviction callback, replacing any previous one.
    ///
    /// The callback runs synchronously inside [WindowedGrid::clear],
    /// [WindowedGrid::translate], [WindowedGrid::set_center] and [WindowedGrid::resize].
    pub fn set_evict_callback<F>(&mut self, callback: F)
    where
        F: FnMut(Coord, T) + 'static,
    {
        self.on_evict = Some(Box::new(callback));
    }

    /// Remove the eviction callback and return it. Evicted values are dropped
    /// silently afterwards.
    pub fn remove_evict_callback(&mut self) -> Option<EvictCallback<T>> {
        self.on_evict.take()
    }

    /// Local position of a world coordinate, if it is inside the window.
    fn local_coord(&self, coord: Coord) -> Option<(usize, usize, usize)> {
        let (lx, ly, lz) = local_delta(coord, self.offset);
        let (width, height, depth) = self.size;
        if lx < 0
            || ly < 0
            || lz < 0
            || lx >= width as i64
            || ly >= height as i64
            || lz >= depth as i64
        {
            return None;
        }
        Some((lx as usize, ly as usize, lz as usize))
    }

    #[inline(always)]
    fn local_index(&self, (x, y, z): (usize, usize, usize)) -> usize {
        (z * self.size.1 + y) * self.size.0 + x
    }

    fn offset_index(&self, coord: Coord) -> Option<usize> {
        let local = self.local_coord(coord)?;
        Some(self.local_index(local))
    }

    /// Whether `coord` is inside the window.
    pub fn is_inside<C: Into<Coord>>(&self, coord: C) -> bool {
        self.local_coord(coord.into()).is_some()
    }

    /// The cell at `coord`, or `None` when `coord` is outside the window.
    /// Empty cells are returned as `Some(&T::default())`.
    pub fn get_if<C: Into<Coord>>(&self, coord: C) -> Option<&T> {
        let index = self.offset_index(coord.into())?;
        Some(&self.cells[index])
    }

    /// The cell at `coord`, failing with [WindowError::OutOfWindow] when
    /// `coord` is outside the window.
    pub fn require<C: Into<Coord>>(&self, coord: C) -> Result<&T> {
        let coord: Coord = coord.into();
        self.get_if(coord)
            .ok_or_else(|| WindowError::out_of_window(coord))
    }

    /// Write `value` into the cell at `coord`, returning the previous value.
    /// Returns `None` without writing when `coord` is outside the window.
    pub fn replace<C: Into<Coord>>(&mut self, coord: C, value: T) -> Option<T> {
        let index = self.offset_index(coord.into())?;
        let empty = T::default();
        let old = std::mem::replace(&mut self.cells[index], value);
        match (old == empty, self.cells[index] == empty) {
            (true, false) => self.count += 1,
            (false, true) => self.count -= 1,
            _ => (),
        }
        Some(old)
    }

    /// Write `value` into the cell at `coord`.
    /// Returns `false` without writing when `coord` is outside the window.
    pub fn set<C: Into<Coord>>(&mut self, coord: C, value: T) -> bool {
        self.replace(coord, value).is_some()
    }

    /// Empty every cell, reporting each non-empty one to the eviction callback
    /// in buffer order. The window does not move.
    pub fn clear(&mut self) {
        let bounds = self.bounds();
        let empty = T::default();
        let Self { cells, count, on_evict, .. } = self;
        let mut evicted = 0usize;
        for (pos, cell) in bounds.iter().zip(cells.iter_mut()) {
            if *cell == empty {
                continue;
            }
            let value = std::mem::take(cell);
            evicted += 1;
            if let Some(evict) = on_evict.as_mut() {
                evict(pos, value);
            }
        }
        debug_assert_eq!(evicted, *count);
        *count = 0;
        debug!("cleared window at {:?}, evicted {evicted} cells", self.offset);
    }

    /// Move every non-empty cell into `target`, a buffer laid out for a window
    /// of `size` at `offset`. Cells that land outside that window are evicted
    /// with their current world coordinate. Returns the number of cells kept.
    fn migrate(&mut self, target: &mut [T], size: (usize, usize, usize), offset: Coord) -> usize {
        let (width, height, depth) = self.size;
        let (new_width, new_height, new_depth) = size;
        let (dx, dy, dz) = local_delta(offset, self.offset);
        let empty = T::default();
        let Self { cells, offset: origin, on_evict, .. } = self;
        let mut kept = 0usize;
        for z in 0..depth {
            for y in 0..height {
                for x in 0..width {
                    let index = (z * height + y) * width + x;
                    if cells[index] == empty {
                        continue;
                    }
                    let value = std::mem::take(&mut cells[index]);
                    let nx = x as i64 - dx;
                    let ny = y as i64 - dy;
                    let nz = z as i64 - dz;
                    if nx < 0
                        || ny < 0
                        || nz < 0
                        || nx >= new_width as i64
                        || ny >= new_height as i64
                        || nz >= new_depth as i64
                    {
                        if let Some(evict) = on_evict.as_mut() {
                            evict(
                                (
                                    origin.0 + x as i32,
                                    origin.1 + y as i32,
                                    origin.2 + z as i32,
                                ),
                                value,
                            );
                        }
                        continue;
                    }
                    let new_index = (nz as usize * new_height + ny as usize) * new_width + nx as usize;
                    target[new_index] = value;
                    kept += 1;
                }
            }
        }
        kept
    }

    /// Move the window origin to `target`, clamped so the far corner stays
    /// inside `i32`.
    fn shift_to(&mut self, target: (i64, i64, i64)) {
        let offset = clamp_origin(target, self.size);
        if offset == self.offset {
            return;
        }
        let mut scratch = std::mem::take(&mut self.scratch);
        debug_assert!({
            let empty = T::default();
            scratch.iter().all(|cell| *cell == empty)
        });
        let kept = self.migrate(&mut scratch, self.size, offset);
        let evicted = self.count - kept;
        self.scratch = std::mem::replace(&mut self.cells, scratch);
        self.count = kept;
        trace!("moved window from {:?} to {offset:?}, evicted {evicted} cells", self.offset);
        self.offset = offset;
    }

    /// Shift the window origin by `delta`.
    ///
    /// Cells whose world coordinate stays inside the window keep their value.
    /// Non-empty cells that fall outside are passed to the eviction callback
    /// with their world coordinate before the move.
    ///
    /// The origin is clamped to `i32::MIN..=i32::MAX - size` on each axis, so a
    /// window at the edge of the coordinate space stops there.
    pub fn translate<C: Into<Coord>>(&mut self, delta: C) {
        let delta: Coord = delta.into();
        if delta == (0, 0, 0) {
            return;
        }
        let (x, y, z) = self.offset;
        self.shift_to((
            x as i64 + delta.0 as i64,
            y as i64 + delta.1 as i64,
            z as i64 + delta.2 as i64,
        ));
    }

    /// Move the window origin to `offset` (clamped like [WindowedGrid::translate]).
    pub fn reposition<C: Into<Coord>>(&mut self, offset: C) {
        let (x, y, z): Coord = offset.into();
        self.shift_to((x as i64, y as i64, z as i64));
    }

    /// The world coordinate at the center of the window, `offset + size / 2`.
    pub fn center(&self) -> Coord {
        self.offset.add_coord(size_to_coord(self.size).div_coord(2))
    }

    /// Translate the window so that [WindowedGrid::center] becomes `center`.
    /// Near the edge of the coordinate space the origin is clamped like
    /// [WindowedGrid::translate] and the center stops short.
    pub fn set_center<C: Into<Coord>>(&mut self, center: C) {
        let half = size_to_coord(self.size).div_coord(2);
        self.shift_to(local_delta(center.into(), half));
    }

    /// Change the extents of the window.
    ///
    /// Each shrinking axis evicts the cells outside the centered band of the
    /// new width, which moves the origin by `(old - new) / 2` on that axis.
    /// Growing an axis keeps the origin and adds empty cells on the far side,
    /// unless the far side would pass `i32::MAX`, in which case the origin is
    /// pulled back just enough to fit.
    ///
    /// # Panics
    /// If any extent is 0 or the volume exceeds `i32::MAX`.
    pub fn resize(&mut self, width: usize, height: usize, depth: usize) {
        let volume = checked_volume(width, height, depth);
        if (width, height, depth) == self.size {
            return;
        }
        let old_size = self.size;
        let centered = |origin: i32, old: usize, new: usize| -> i64 {
            if new < old {
                origin as i64 + ((old - new) / 2) as i64
            } else {
                origin as i64
            }
        };
        let size = (width, height, depth);
        let offset = clamp_origin(
            (
                centered(self.offset.0, old_size.0, width),
                centered(self.offset.1, old_size.1, height),
                centered(self.offset.2, old_size.2, depth),
            ),
            size,
        );
        let mut cells: Vec<T> = empty_buffer(volume);
        let kept = self.migrate(&mut cells, size, offset);
        self.cells = cells;
        self.scratch = empty_buffer(volume);
        self.size = size;
        self.offset = offset;
        self.count = kept;
        debug!(
            "resized window from {old_size:?} to {:?} at {:?}",
            self.size, self.offset
        );
    }

    /// Iterate over every cell in buffer order along with its world coordinate.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        self.bounds().iter().zip(self.cells.iter())
    }
}

impl<T: Default + PartialEq + Clone> WindowedGrid<T> {
    /// The value at `coord`, or `T::default()` when `coord` is outside the window.
    pub fn get<C: Into<Coord>>(&self, coord: C) -> T {
        self.get_if(coord).cloned().unwrap_or_default()
    }

    /// The value at `coord` if it is inside the window and not empty,
    /// otherwise `default`.
    pub fn get_or<C: Into<Coord>>(&self, coord: C, default: T) -> T {
        match self.get_if(coord) {
            Some(value) if *value != T::default() => value.clone(),
            _ => default,
        }
    }
}

impl<T> WindowedGrid<T> {
    /// The number of non-empty cells in the window.
    pub fn count(&self) -> usize {
        self.count
    }

    /// The active buffer. Do not hold on to it across a mutation; translation
    /// swaps buffers and resizing reallocates them.
    pub fn buffer(&self) -> &[T] {
        &self.cells
    }

    /// `(width, height, depth)`.
    pub fn size(&self) -> (usize, usize, usize) {
        self.size
    }

    /// The size along the X axis.
    pub fn width(&self) -> usize {
        self.size.0
    }

    /// The size along the Y axis.
    pub fn height(&self) -> usize {
        self.size.1
    }

    /// The size along the Z axis (the window's length).
    pub fn depth(&self) -> usize {
        self.size.2
    }

    /// `width * height`.
    pub fn area(&self) -> usize {
        self.size.0 * self.size.1
    }

    /// `width * height * depth`.
    pub fn volume(&self) -> usize {
        self.size.0 * self.size.1 * self.size.2
    }

    /// World coordinate of the window's local origin.
    pub fn offset(&self) -> Coord {
        self.offset
    }

    /// The minimum bound along the `X` axis.
    pub fn x_min(&self) -> i32 {
        self.offset.0
    }

    /// The minimum bound along the `Y` axis.
    pub fn y_min(&self) -> i32 {
        self.offset.1
    }

    /// The minimum bound along the `Z` axis.
    pub fn z_min(&self) -> i32 {
        self.offset.2
    }

    /// The maximum bound along the `X` axis (exclusive).
    pub fn x_max(&self) -> i32 {
        self.offset.0 + self.size.0 as i32
    }

    /// The maximum bound along the `Y` axis (exclusive).
    pub fn y_max(&self) -> i32 {
        self.offset.1 + self.size.1 as i32
    }

    /// The maximum bound along the `Z` axis (exclusive).
    pub fn z_max(&self) -> i32 {
        self.offset.2 + self.size.2 as i32
    }

    /// The world-space [Bounds3D] covered by the window.
    pub fn bounds(&self) -> Bounds3D {
        Bounds3D::from_origin(self.offset, self.size)
    }

    /// `coord` relative to the window's origin.
    pub fn relative_offset<C: Into<Coord> + From<Coord>>(&self, coord: C) -> C {
        C::from(coord.into().sub_coord(self.offset))
    }
}

impl<T> std::fmt::Debug for WindowedGrid<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowedGrid")
            .field("size", &self.size)
            .field("offset", &self.offset)
            .field("count", &self.count)
            .field("on_evict", &self.on_evict.is_some())
            .finish_non_exhaustive()
    }
}
