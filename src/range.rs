//! Arithmetic progressions usable both as iterators and as streams

use std::fmt;

use crate::aiter::{from_iter, AiterStream};
use crate::error::{StreamError, StreamResult};

/// Numeric types a [`Range`] can be built from
pub trait RangeValue: Copy + PartialOrd + fmt::Display + Send + Sync + 'static {
    fn zero() -> Self;
    fn one() -> Self;
    /// `false` for NaN and infinities
    fn is_finite_value(self) -> bool;
    /// `ceil((stop - start) / step)`, for a step pointing from `start` towards `stop`
    fn steps(start: Self, stop: Self, step: Self) -> usize;
    /// `start + step * index`
    fn nth(start: Self, step: Self, index: usize) -> Self;
}

macro_rules! impl_range_value_int {
    ($($t:ty),*) => {
        $(
            impl RangeValue for $t {
                fn zero() -> Self { 0 }
                fn one() -> Self { 1 }
                fn is_finite_value(self) -> bool { true }

                fn steps(start: Self, stop: Self, step: Self) -> usize {
                    let span = stop as i128 - start as i128;
                    let step = step as i128;
                    ((span + step - step.signum()) / step) as usize
                }

                fn nth(start: Self, step: Self, index: usize) -> Self {
                    (start as i128 + step as i128 * index as i128) as $t
                }
            }
        )*
    };
}

macro_rules! impl_range_value_float {
    ($($t:ty),*) => {
        $(
            impl RangeValue for $t {
                fn zero() -> Self { 0.0 }
                fn one() -> Self { 1.0 }
                fn is_finite_value(self) -> bool { self.is_finite() }

                fn steps(start: Self, stop: Self, step: Self) -> usize {
                    ((stop - start) / step).ceil() as usize
                }

                fn nth(start: Self, step: Self, index: usize) -> Self {
                    start + step * index as $t
                }
            }
        )*
    };
}

impl_range_value_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_range_value_float!(f32, f64);

/// The half-open progression `start, start + step, …` up to, but excluding, `stop`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range<T> {
    start: T,
    stop: T,
    step: T,
}

impl<T: RangeValue> Range<T> {
    /// Create a range, rejecting a zero step and non-finite bounds
    ///
    /// # Examples
    /// ```
    /// use aiter_stream::range::Range;
    ///
    /// let r = Range::new(10.0, -10.0, -3.5).unwrap();
    /// assert_eq!(r.len(), 6);
    /// assert_eq!(r.get(3), Some(-0.5));
    /// assert_eq!(r.get(-1), Some(-7.5));
    /// assert!(Range::new(0, 10, 0).is_err());
    /// ```
    pub fn new(start: T, stop: T, step: T) -> StreamResult<Self> {
        if step == T::zero() {
            return Err(StreamError::InvalidArgument("step cannot be zero".to_string()));
        }
        if !start.is_finite_value() {
            return Err(StreamError::InvalidArgument("start is invalid".to_string()));
        }
        if !stop.is_finite_value() {
            return Err(StreamError::InvalidArgument("stop is invalid".to_string()));
        }
        if !step.is_finite_value() {
            return Err(StreamError::InvalidArgument("step is invalid".to_string()));
        }

        Ok(Self { start, stop, step })
    }

    /// `0, 1, …, stop - 1`
    pub fn to(stop: T) -> StreamResult<Self> {
        Self::new(T::zero(), stop, T::one())
    }

    /// `start, start + 1, …, stop - 1`
    pub fn between(start: T, stop: T) -> StreamResult<Self> {
        Self::new(start, stop, T::one())
    }

    pub fn start(&self) -> T {
        self.start
    }

    pub fn stop(&self) -> T {
        self.stop
    }

    pub fn step(&self) -> T {
        self.step
    }

    /// Number of elements; always equal to `self.iter().count()`
    pub fn len(&self) -> usize {
        let zero = T::zero();
        if self.step < zero && self.start <= self.stop {
            return 0;
        }
        if self.step > zero && self.start >= self.stop {
            return 0;
        }
        T::steps(self.start, self.stop, self.step)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element at `index`; a negative index counts from the end
    pub fn get(&self, index: isize) -> Option<T> {
        let len = self.len();
        let index = if index < 0 {
            len.checked_sub(index.unsigned_abs())?
        } else {
            index as usize
        };
        if index >= len {
            return None;
        }
        Some(T::nth(self.start, self.step, index))
    }

    pub fn iter(&self) -> RangeIter<T> {
        RangeIter {
            range: *self,
            front: 0,
            back: self.len(),
        }
    }

    /// The range as a stream that never suspends
    pub fn stream(&self) -> AiterStream<T> {
        from_iter(self.iter())
    }
}

impl<T: RangeValue> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Range({}, {}, {})", self.start, self.stop, self.step)
    }
}

impl<T: RangeValue> IntoIterator for Range<T> {
    type Item = T;
    type IntoIter = RangeIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the elements of a [`Range`]
#[derive(Debug, Clone)]
pub struct RangeIter<T> {
    range: Range<T>,
    front: usize,
    back: usize,
}

impl<T: RangeValue> Iterator for RangeIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        let value = T::nth(self.range.start, self.range.step, self.front);
        self.front += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: RangeValue> DoubleEndedIterator for RangeIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(T::nth(self.range.start, self.range.step, self.back))
    }
}

impl<T: RangeValue> ExactSizeIterator for RangeIter<T> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_lengths() {
        assert_eq!(Range::to(10).unwrap().len(), 10);
        assert_eq!(Range::new(0, 10, 3).unwrap().len(), 4);
        assert_eq!(Range::new(10, 0, -3).unwrap().len(), 4);
        assert_eq!(Range::new(0, 10, -1).unwrap().len(), 0);
        assert_eq!(Range::new(5, 5, 1).unwrap().len(), 0);
        assert_eq!(Range::new(0u8, 255, 1).unwrap().len(), 255);
    }

    #[test]
    fn test_integer_elements() {
        let values: Vec<i64> = Range::new(-3, 4, 2).unwrap().into_iter().collect();
        assert_eq!(values, vec![-3, -1, 1, 3]);

        let values: Vec<i32> = Range::new(10, -10, -7).unwrap().iter().collect();
        assert_eq!(values, vec![10, 3, -4]);
    }

    #[test]
    fn test_float_elements_match_len() {
        let r = Range::new(10.0, -10.0, -3.5).unwrap();
        let values: Vec<f64> = r.iter().collect();
        assert_eq!(values, vec![10.0, 6.5, 3.0, -0.5, -4.0, -7.5]);
        assert_eq!(values.len(), r.len());
    }

    #[test]
    fn test_get_negative_and_out_of_range() {
        let r = Range::to(5).unwrap();
        assert_eq!(r.get(0), Some(0));
        assert_eq!(r.get(-1), Some(4));
        assert_eq!(r.get(-5), Some(0));
        assert_eq!(r.get(-6), None);
        assert_eq!(r.get(5), None);
        assert_eq!(Range::new(0, 5, -1).unwrap().get(0), None);
    }

    #[test]
    fn test_invalid_arguments() {
        assert_eq!(
            Range::new(0, 10, 0),
            Err(StreamError::InvalidArgument("step cannot be zero".to_string()))
        );
        assert!(Range::new(f64::NAN, 1.0, 1.0).is_err());
        assert!(Range::new(0.0, f64::INFINITY, 1.0).is_err());
        assert!(Range::new(0.0, 1.0, f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Range::new(1, 9, 2).unwrap().to_string(), "Range(1, 9, 2)");
        assert_eq!(Range::between(0.5, 2.0).unwrap().to_string(), "Range(0.5, 2, 1)");
    }

    #[test]
    fn test_double_ended() {
        let values: Vec<u32> = Range::to(4u32).unwrap().iter().rev().collect();
        assert_eq!(values, vec![3, 2, 1, 0]);
        assert_eq!(Range::to(4u32).unwrap().iter().len(), 4);
    }
}
