//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral plane with an origin at 0,0,
//! and a rectangle on the complex plane with an arbitrary pair of
//! corners defining the leftlower and rightupper corners of the
//! complex plane.
use crate::coords::CoordinateStream;
use crate::error::RenderError;
use num::Complex;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.  For that reason,
/// the lower-left-hand corner is not included.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub u32, pub u32);

/// Describes the lower-left corner and upper-right corner of the
/// Complex plane, treating the real part of each value as the
/// x-component and the imaginary part of each value as the
/// y-component.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// Describes the x, y of a point in a region.  Column first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub u32, pub u32);

/// Contains the definitions of two planes: an integral cartesian plane,
/// and a complex cartesian plane.  Pixel column `k` maps to the `k`th
/// value of the column stream, pixel row `k` to the `k`th value of the
/// row stream, so the two never disagree.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlaneMapper {
    /// The right-upper hand corner of the integral cartesian plane.
    /// The left-lower is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    /// The two coordinates defining the complex cartesian plane,
    /// left-lower and right-upper
    pub complex_plane: ComplexPlane,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the integral plane, and two
    /// points describing the complex plane.
    pub fn new(
        width: u32,
        height: u32,
        leftlower: Complex<f64>,
        rightupper: Complex<f64>,
    ) -> Result<PlaneMapper, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::Plane(format!(
                "The image must have at least one pixel, not {}x{}.",
                width, height
            )));
        }

        if !(leftlower.re < rightupper.re) {
            return Err(RenderError::Plane(
                "The left lower corner is not to the left of the right upper corner.".to_string(),
            ));
        }

        if !(leftlower.im < rightupper.im) {
            return Err(RenderError::Plane(
                "The left lower corner is not lower than the right upper corner.".to_string(),
            ));
        }

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            complex_plane: ComplexPlane(leftlower, rightupper),
        })
    }

    /// Width of the integral plane.
    pub fn width(&self) -> u32 {
        self.integral_plane.0
    }

    /// Height of the integral plane.
    pub fn height(&self) -> u32 {
        self.integral_plane.1
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        (self.integral_plane.0 as usize) * (self.integral_plane.1 as usize)
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// The real parts, one per pixel column.
    pub fn columns(&self) -> CoordinateStream {
        CoordinateStream::new(
            self.complex_plane.0.re,
            self.complex_plane.1.re,
            self.integral_plane.0 as usize,
        )
    }

    /// The imaginary parts, one per pixel row.
    pub fn rows(&self) -> CoordinateStream {
        CoordinateStream::new(
            self.complex_plane.0.im,
            self.complex_plane.1.im,
            self.integral_plane.1 as usize,
        )
    }

    /// Given a pixel on the integral cartesian plane, return the point
    /// on the complex plane the streams would produce for it.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.columns().at(pixel.0 as usize),
            self.rows().at(pixel.1 as usize),
        )
    }
}
