//! A bounded 3D window that follows a moving focal point through an
//! unbounded integer grid.
//!
//! [WindowedGrid] keeps one value per cell inside its window. Moving the
//! window with [WindowedGrid::set_center] or shrinking it with
//! [WindowedGrid::resize] reports every non-empty cell that leaves the window
//! to the eviction callback exactly once, while cells that stay keep their
//! values.
//!
//! ```
//! use windowgrid::WindowedGrid;
//!
//! let mut grid = WindowedGrid::<u32>::new(3, 3, 3);
//! grid.set_evict_callback(|(x, y, z), chunk| {
//!     println!("unload chunk {chunk} at ({x}, {y}, {z})");
//! });
//! grid.set((0, 1, 1), 7);
//! grid.set_center((2, 1, 1));
//! assert_eq!(grid.count(), 0);
//! ```

pub mod bounds3d;
pub mod error;
pub mod math;
pub mod windowgrid;

pub use bounds3d::{Bounds3D, Bounds3DIter};
pub use error::{Result, WindowError};
pub use windowgrid::{Coord, EvictCallback, WindowedGrid};

pub(crate) mod error_messages {
    pub const SIZE_TOO_LARGE: &'static str = "Size is too large";
    pub const VOLUME_IS_ZERO: &'static str = "Width/Height/Depth cannot be 0";
    pub const OFFSET_TOO_CLOSE_TO_MAX: &'static str = "Offset is too close to maximum bound";
}
