//! # Block Orientation
//!
//! Blocks are placed on the grid facing one of six base directions. Grid-local axes follow the
//! host convention: Forward is -Z, Up is +Y and Right is +X.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// One of the six axis-aligned directions of the grid.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base6Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Orientation of a block, given by where its front and top face.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockOrientation {
    pub forward: Base6Direction,
    pub up: Base6Direction,
}

/// Local orientation matrix of a block.
///
/// Columns are the block's right, up and backward directions in grid-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrientationMatrix(Matrix3<i32>);

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Base6Direction {
    /// Unit vector of this direction in grid-local coordinates.
    pub fn vector(self) -> Vector3<i32> {
        match self {
            Base6Direction::Forward => Vector3::new(0, 0, -1),
            Base6Direction::Backward => Vector3::new(0, 0, 1),
            Base6Direction::Left => Vector3::new(-1, 0, 0),
            Base6Direction::Right => Vector3::new(1, 0, 0),
            Base6Direction::Up => Vector3::new(0, 1, 0),
            Base6Direction::Down => Vector3::new(0, -1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Base6Direction::Forward => Base6Direction::Backward,
            Base6Direction::Backward => Base6Direction::Forward,
            Base6Direction::Left => Base6Direction::Right,
            Base6Direction::Right => Base6Direction::Left,
            Base6Direction::Up => Base6Direction::Down,
            Base6Direction::Down => Base6Direction::Up,
        }
    }
}

impl Default for BlockOrientation {
    fn default() -> Self {
        Self {
            forward: Base6Direction::Forward,
            up: Base6Direction::Up,
        }
    }
}

impl BlockOrientation {
    pub fn new(forward: Base6Direction, up: Base6Direction) -> Self {
        Self { forward, up }
    }

    /// Build the local orientation matrix of the block.
    ///
    /// If `up` is not perpendicular to `forward` the right column is zero, but the forward and
    /// backward directions are still valid.
    pub fn matrix(&self) -> OrientationMatrix {
        let backward = self.forward.opposite().vector();
        let up = self.up.vector();
        let right = up.cross(&backward);

        OrientationMatrix(Matrix3::from_columns(&[right, up, backward]))
    }
}

impl OrientationMatrix {
    pub fn right(&self) -> Vector3<i32> {
        self.0.column(0).into_owned()
    }

    pub fn up(&self) -> Vector3<i32> {
        self.0.column(1).into_owned()
    }

    pub fn backward(&self) -> Vector3<i32> {
        self.0.column(2).into_owned()
    }

    pub fn forward(&self) -> Vector3<i32> {
        -self.backward()
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_matrix() {
        let m = BlockOrientation::default().matrix();

        assert_eq!(m.forward(), Vector3::new(0, 0, -1));
        assert_eq!(m.backward(), Vector3::new(0, 0, 1));
        assert_eq!(m.up(), Vector3::new(0, 1, 0));
        assert_eq!(m.right(), Vector3::new(1, 0, 0));
    }

    #[test]
    fn test_rotated_matrix() {
        // Facing right, lying on its back
        let m = BlockOrientation::new(Base6Direction::Right, Base6Direction::Down).matrix();

        assert_eq!(m.forward(), Base6Direction::Right.vector());
        assert_eq!(m.backward(), Base6Direction::Left.vector());
        assert_eq!(m.up(), Base6Direction::Down.vector());
        assert_eq!(m.right(), Vector3::new(0, 0, -1));
    }

    #[test]
    fn test_opposites() {
        let all = [
            Base6Direction::Forward,
            Base6Direction::Backward,
            Base6Direction::Left,
            Base6Direction::Right,
            Base6Direction::Up,
            Base6Direction::Down,
        ];

        for d in all.iter() {
            assert_eq!(d.opposite().vector(), -d.vector());
            assert_eq!(d.opposite().opposite(), *d);
        }
    }
}
