use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign};

use crate::errors::ChessError;

/// A square on the unbounded plane.
///
/// Ranks and files of the classic 8x8 area live at `1..=8`, but every `i64`
/// pair is a valid square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

/// Operand shapes accepted by [`Point`] arithmetic: another point
/// (componentwise), a scalar broadcast to both components, or a 2-element
/// pair. Anything else is rejected at compile time.
pub trait PointOperand {
    fn xy(self) -> (i64, i64);
}

impl PointOperand for Point {
    #[inline]
    fn xy(self) -> (i64, i64) {
        (self.x, self.y)
    }
}

impl PointOperand for i64 {
    #[inline]
    fn xy(self) -> (i64, i64) {
        (self, self)
    }
}

impl PointOperand for (i64, i64) {
    #[inline]
    fn xy(self) -> (i64, i64) {
        self
    }
}

impl PointOperand for [i64; 2] {
    #[inline]
    fn xy(self) -> (i64, i64) {
        (self[0], self[1])
    }
}

impl Point {
    #[inline]
    pub const fn new(x: i64, y: i64) -> Self {
        Point { x, y }
    }

    /// Componentwise absolute value. Not a distance metric.
    #[inline]
    pub fn abs(self) -> Self {
        Point::new(self.x.abs(), self.y.abs())
    }

    /// Componentwise division reporting a zero divisor instead of panicking
    /// like the `/` operator does.
    pub fn try_div<T: PointOperand>(self, rhs: T) -> Result<Point, ChessError> {
        let (rx, ry) = rhs.xy();
        if rx == 0 || ry == 0 {
            return Err(ChessError::DivisionByZero);
        }
        Ok(Point::new(self.x / rx, self.y / ry))
    }

    /// Componentwise remainder reporting a zero divisor instead of panicking
    /// like the `%` operator does.
    pub fn try_rem<T: PointOperand>(self, rhs: T) -> Result<Point, ChessError> {
        let (rx, ry) = rhs.xy();
        if rx == 0 || ry == 0 {
            return Err(ChessError::DivisionByZero);
        }
        Ok(Point::new(self.x % rx, self.y % ry))
    }

    /// Componentwise exponentiation. Exponents are taken as unsigned.
    pub fn pow<T: PointOperand>(self, rhs: T) -> Point {
        let (rx, ry) = rhs.xy();
        Point::new(self.x.pow(rx as u32), self.y.pow(ry as u32))
    }
}

impl<T: PointOperand> Add<T> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: T) -> Point {
        let (rx, ry) = rhs.xy();
        Point::new(self.x + rx, self.y + ry)
    }
}

impl<T: PointOperand> Sub<T> for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: T) -> Point {
        let (rx, ry) = rhs.xy();
        Point::new(self.x - rx, self.y - ry)
    }
}

impl<T: PointOperand> Mul<T> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: T) -> Point {
        let (rx, ry) = rhs.xy();
        Point::new(self.x * rx, self.y * ry)
    }
}

impl<T: PointOperand> Div<T> for Point {
    type Output = Point;

    /// Panics on a zero component, exactly like integer `/`.
    #[inline]
    fn div(self, rhs: T) -> Point {
        let (rx, ry) = rhs.xy();
        Point::new(self.x / rx, self.y / ry)
    }
}

impl<T: PointOperand> Rem<T> for Point {
    type Output = Point;

    /// Panics on a zero component, exactly like integer `%`.
    #[inline]
    fn rem(self, rhs: T) -> Point {
        let (rx, ry) = rhs.xy();
        Point::new(self.x % rx, self.y % ry)
    }
}

impl<T: PointOperand> AddAssign<T> for Point {
    #[inline]
    fn add_assign(&mut self, rhs: T) {
        *self = *self + rhs;
    }
}

impl<T: PointOperand> SubAssign<T> for Point {
    #[inline]
    fn sub_assign(&mut self, rhs: T) {
        *self = *self - rhs;
    }
}

impl<T: PointOperand> MulAssign<T> for Point {
    #[inline]
    fn mul_assign(&mut self, rhs: T) {
        *self = *self * rhs;
    }
}

impl<T: PointOperand> DivAssign<T> for Point {
    #[inline]
    fn div_assign(&mut self, rhs: T) {
        *self = *self / rhs;
    }
}

impl<T: PointOperand> RemAssign<T> for Point {
    #[inline]
    fn rem_assign(&mut self, rhs: T) {
        *self = *self % rhs;
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
