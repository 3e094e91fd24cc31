// src/ops/geometry.rs
// Plane and solid figure properties

use crate::error::{DomainError, Result};
use crate::format::{fixed, num};
use crate::registry::{Args, OperationDescriptor, ParameterSpec};
use crate::response::Response;
use std::f64::consts::PI;

pub const GROUP: &str = "geometry";

/// Tolerance for the Pythagorean check in triangle classification
const RIGHT_ANGLE_EPSILON: f64 = 1e-10;

fn dimension(name: &'static str, description: &'static str) -> ParameterSpec {
    ParameterSpec::number(name, description).positive()
}

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        OperationDescriptor::new(
            "circle_calculation",
            "Circle",
            "Area, circumference and diameter of a circle",
            circle,
        )
        .param(dimension("radius", "Radius")),
        OperationDescriptor::new(
            "rectangle_calculation",
            "Rectangle",
            "Area, perimeter and diagonal of a rectangle",
            rectangle,
        )
        .param(dimension("length", "Length"))
        .param(dimension("width", "Width")),
        OperationDescriptor::new(
            "triangle_calculation",
            "Triangle",
            "Area, perimeter, angles and classification of a triangle from its three sides",
            triangle,
        )
        .param(dimension("side_a", "Side a"))
        .param(dimension("side_b", "Side b"))
        .param(dimension("side_c", "Side c")),
        OperationDescriptor::new(
            "trapezoid_calculation",
            "Trapezoid",
            "Area of a trapezoid",
            trapezoid,
        )
        .param(dimension("top_base", "Top base"))
        .param(dimension("bottom_base", "Bottom base"))
        .param(dimension("height", "Height")),
        OperationDescriptor::new(
            "ellipse_calculation",
            "Ellipse",
            "Area, approximate perimeter, eccentricity and focal distance of an ellipse",
            ellipse,
        )
        .param(dimension("semi_major_axis", "Semi-major axis"))
        .param(dimension("semi_minor_axis", "Semi-minor axis")),
        OperationDescriptor::new(
            "sphere_calculation",
            "Sphere",
            "Volume and surface area of a sphere",
            sphere,
        )
        .param(dimension("radius", "Radius")),
        OperationDescriptor::new(
            "cylinder_calculation",
            "Cylinder",
            "Volume and surface area of a cylinder",
            cylinder,
        )
        .param(dimension("radius", "Base radius"))
        .param(dimension("height", "Height")),
        OperationDescriptor::new(
            "cone_calculation",
            "Cone",
            "Volume, slant height and surface area of a cone",
            cone,
        )
        .param(dimension("radius", "Base radius"))
        .param(dimension("height", "Height")),
        OperationDescriptor::new(
            "cuboid_calculation",
            "Cuboid",
            "Volume, surface area and space diagonal of a cuboid",
            cuboid,
        )
        .param(dimension("length", "Length"))
        .param(dimension("width", "Width"))
        .param(dimension("height", "Height")),
        OperationDescriptor::new(
            "regular_polygon",
            "Regular polygon",
            "Perimeter, apothem, area and angles of a regular polygon",
            regular_polygon,
        )
        .param(ParameterSpec::integer("sides", "Number of sides").min(3.0))
        .param(dimension("side_length", "Side length")),
    ]
}

fn circle(args: &Args) -> Result<Response> {
    let r = args.number("radius")?;
    Ok(Response::success(format!(
        "Circle:\nRadius: {}\nDiameter: {}\nCircumference: {}\nArea: {}\nπ ≈ {}",
        num(r),
        num(2.0 * r),
        fixed(2.0 * PI * r, 6),
        fixed(PI * r * r, 6),
        fixed(PI, 6)
    )))
}

fn rectangle(args: &Args) -> Result<Response> {
    let l = args.number("length")?;
    let w = args.number("width")?;
    Ok(Response::success(format!(
        "Rectangle:\nLength: {}\nWidth: {}\nArea: {}\nPerimeter: {}\nDiagonal: {}",
        num(l),
        num(w),
        num(l * w),
        num(2.0 * (l + w)),
        fixed(l.hypot(w), 6)
    )))
}

/// Sides, area and interior angles in degrees of a valid triangle
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub sides: [f64; 3],
    pub area: f64,
    pub angles: [f64; 3],
}

impl Triangle {
    pub fn from_sides(a: f64, b: f64, c: f64) -> Result<Self> {
        if a + b <= c || a + c <= b || b + c <= a {
            return Err(DomainError::out_of_domain(
                "The given side lengths do not form a triangle",
            )
            .into());
        }
        let s = (a + b + c) / 2.0;
        let area = (s * (s - a) * (s - b) * (s - c)).sqrt();
        let angle = |opposite: f64, x: f64, y: f64| {
            ((x * x + y * y - opposite * opposite) / (2.0 * x * y)).acos() * 180.0 / PI
        };
        Ok(Self {
            sides: [a, b, c],
            area,
            angles: [angle(a, b, c), angle(b, a, c), angle(c, a, b)],
        })
    }

    pub fn perimeter(&self) -> f64 {
        self.sides.iter().sum()
    }

    pub fn is_right(&self) -> bool {
        let mut s = self.sides;
        s.sort_by(f64::total_cmp);
        (s[0] * s[0] + s[1] * s[1] - s[2] * s[2]).abs() < RIGHT_ANGLE_EPSILON
    }

    pub fn classification(&self) -> String {
        let [a, b, c] = self.sides;
        let base = if a == b && b == c {
            "Equilateral"
        } else if a == b || b == c || a == c {
            "Isosceles"
        } else {
            "Scalene"
        };
        if self.is_right() {
            format!("{} (right triangle)", base)
        } else {
            base.to_string()
        }
    }
}

fn triangle(args: &Args) -> Result<Response> {
    let t = Triangle::from_sides(
        args.number("side_a")?,
        args.number("side_b")?,
        args.number("side_c")?,
    )?;
    let [a, b, c] = t.sides;
    let [angle_a, angle_b, angle_c] = t.angles;
    Ok(Response::success(format!(
        "Triangle:\nSides: a={}, b={}, c={}\nType: {}\nPerimeter: {}\nArea: {}\nAngles: ∠A={}°, ∠B={}°, ∠C={}°",
        num(a),
        num(b),
        num(c),
        t.classification(),
        num(t.perimeter()),
        fixed(t.area, 6),
        fixed(angle_a, 2),
        fixed(angle_b, 2),
        fixed(angle_c, 2)
    )))
}

fn trapezoid(args: &Args) -> Result<Response> {
    let top = args.number("top_base")?;
    let bottom = args.number("bottom_base")?;
    let h = args.number("height")?;
    let area = (top + bottom) * h / 2.0;
    Ok(Response::success(format!(
        "Trapezoid:\nTop base: {}\nBottom base: {}\nHeight: {}\nAverage base: {}\nArea: {}\nFormula: (top + bottom) × height ÷ 2 = {}",
        num(top),
        num(bottom),
        num(h),
        num((top + bottom) / 2.0),
        num(area),
        num(area)
    )))
}

/// Ramanujan's second approximation of an ellipse perimeter
pub fn ellipse_perimeter(a: f64, b: f64) -> f64 {
    let h = ((a - b) / (a + b)).powi(2);
    PI * (a + b) * (1.0 + 3.0 * h / (10.0 + (4.0 - 3.0 * h).sqrt()))
}

fn ellipse(args: &Args) -> Result<Response> {
    let a = args.number("semi_major_axis")?;
    let b = args.number("semi_minor_axis")?;
    if b > a {
        return Err(DomainError::out_of_domain(
            "Semi-minor axis cannot exceed the semi-major axis",
        )
        .into());
    }
    let eccentricity = (1.0 - (b * b) / (a * a)).sqrt();
    Ok(Response::success(format!(
        "Ellipse:\nSemi-major axis: {}\nSemi-minor axis: {}\nArea: {}\nPerimeter (approx.): {}\nEccentricity: {}\nFocal distance: {}",
        num(a),
        num(b),
        fixed(PI * a * b, 6),
        fixed(ellipse_perimeter(a, b), 6),
        fixed(eccentricity, 6),
        fixed(2.0 * a * eccentricity, 6)
    )))
}

fn sphere(args: &Args) -> Result<Response> {
    let r = args.number("radius")?;
    let volume = fixed(4.0 / 3.0 * PI * r.powi(3), 6);
    Ok(Response::success(format!(
        "Sphere:\nRadius: {}\nDiameter: {}\nSurface area: {}\nVolume: {}\nFormula: (4/3)πr³ = {}",
        num(r),
        num(2.0 * r),
        fixed(4.0 * PI * r * r, 6),
        volume,
        volume
    )))
}

fn cylinder(args: &Args) -> Result<Response> {
    let r = args.number("radius")?;
    let h = args.number("height")?;
    let base = PI * r * r;
    let lateral = 2.0 * PI * r * h;
    let volume = fixed(base * h, 6);
    Ok(Response::success(format!(
        "Cylinder:\nBase radius: {}\nHeight: {}\nBase area: {}\nLateral area: {}\nSurface area: {}\nVolume: {}\nFormula: πr²h = {}",
        num(r),
        num(h),
        fixed(base, 6),
        fixed(lateral, 6),
        fixed(2.0 * base + lateral, 6),
        volume,
        volume
    )))
}

fn cone(args: &Args) -> Result<Response> {
    let r = args.number("radius")?;
    let h = args.number("height")?;
    let base = PI * r * r;
    let slant = r.hypot(h);
    let lateral = PI * r * slant;
    let volume = fixed(base * h / 3.0, 6);
    Ok(Response::success(format!(
        "Cone:\nBase radius: {}\nHeight: {}\nSlant height: {}\nBase area: {}\nLateral area: {}\nSurface area: {}\nVolume: {}\nFormula: (1/3)πr²h = {}",
        num(r),
        num(h),
        fixed(slant, 6),
        fixed(base, 6),
        fixed(lateral, 6),
        fixed(base + lateral, 6),
        volume,
        volume
    )))
}

fn cuboid(args: &Args) -> Result<Response> {
    let l = args.number("length")?;
    let w = args.number("width")?;
    let h = args.number("height")?;
    let volume = l * w * h;
    Ok(Response::success(format!(
        "Cuboid:\nLength: {}\nWidth: {}\nHeight: {}\nVolume: {}\nSurface area: {}\nSpace diagonal: {}\nFormula: length × width × height = {}",
        num(l),
        num(w),
        num(h),
        num(volume),
        num(2.0 * (l * w + l * h + w * h)),
        fixed((l * l + w * w + h * h).sqrt(), 6),
        num(volume)
    )))
}

fn regular_polygon(args: &Args) -> Result<Response> {
    let n = args.integer("sides")?;
    let side = args.number("side_length")?;
    let sides = n as f64;
    let perimeter = sides * side;
    let apothem = side / (2.0 * (PI / sides).tan());
    Ok(Response::success(format!(
        "Regular {}-gon:\nSides: {}\nSide length: {}\nPerimeter: {}\nApothem: {}\nArea: {}\nCentral angle: {}°\nInterior angle: {}°",
        n,
        n,
        num(side),
        num(perimeter),
        fixed(apothem, 6),
        fixed(perimeter * apothem / 2.0, 6),
        num(360.0 / sides),
        num((sides - 2.0) * 180.0 / sides)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn call(op: &str, raw: Value) -> Result<Response> {
        crate::ops::testing::call(operations(), op, raw)
    }

    // ============================================================================
    // Triangles
    // ============================================================================

    #[test]
    fn test_right_triangle() {
        let t = Triangle::from_sides(3.0, 4.0, 5.0).unwrap();
        assert!((t.area - 6.0).abs() < 1e-12);
        assert!(t.is_right());
        assert_eq!(t.classification(), "Scalene (right triangle)");
        assert!((t.angles[2] - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_equilateral_and_isosceles() {
        let eq = Triangle::from_sides(2.0, 2.0, 2.0).unwrap();
        assert_eq!(eq.classification(), "Equilateral");
        let iso = Triangle::from_sides(5.0, 5.0, 8.0).unwrap();
        assert_eq!(iso.classification(), "Isosceles");
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        assert!(Triangle::from_sides(1.0, 2.0, 3.0).is_err());
        let r = call(
            "triangle_calculation",
            json!({"side_a": 1, "side_b": 1, "side_c": 5}),
        );
        assert!(matches!(r, Err(crate::error::CalcError::Domain(_))));
    }

    #[test]
    fn test_triangle_text() {
        let r = call(
            "triangle_calculation",
            json!({"side_a": 3, "side_b": 4, "side_c": 5}),
        )
        .unwrap();
        assert!(r.text().contains("Area: 6.000000"));
        assert!(r.text().contains("∠C=90.00°"));
    }

    // ============================================================================
    // Other figures
    // ============================================================================

    #[test]
    fn test_circle() {
        let r = call("circle_calculation", json!({"radius": 1})).unwrap();
        assert!(r.text().contains("Area: 3.141593"));
        assert!(r.text().contains("Circumference: 6.283185"));
    }

    #[test]
    fn test_ellipse_perimeter_of_circle() {
        assert!((ellipse_perimeter(1.0, 1.0) - 2.0 * PI).abs() < 1e-12);
        let r = call(
            "ellipse_calculation",
            json!({"semi_major_axis": 5, "semi_minor_axis": 3}),
        )
        .unwrap();
        assert!(r.text().contains("Eccentricity: 0.800000"));
        assert!(r.text().contains("Focal distance: 8.000000"));
    }

    #[test]
    fn test_cuboid() {
        let r = call(
            "cuboid_calculation",
            json!({"length": 2, "width": 3, "height": 4}),
        )
        .unwrap();
        assert!(r.text().contains("Volume: 24"));
        assert!(r.text().contains("Surface area: 52"));
    }

    #[test]
    fn test_square_as_regular_polygon() {
        let r = call("regular_polygon", json!({"sides": 4, "side_length": 2})).unwrap();
        assert!(r.text().contains("Area: 4.000000"));
        assert!(r.text().contains("Interior angle: 90°"));
    }

    #[test]
    fn test_dimensions_must_be_positive() {
        let desc = operations().into_iter().next().unwrap();
        let raw = json!({"radius": 0});
        assert!(crate::registry::validate(&desc.params, raw.as_object().unwrap()).is_err());
    }
}
