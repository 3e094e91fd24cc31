// src/ops/conversion.rs
// Unit conversion through a base unit per quantity

use crate::error::{DomainError, Result};
use crate::format::{fixed, num};
use crate::registry::{Args, Handler, OperationDescriptor, ParameterSpec};
use crate::response::Response;

pub const GROUP: &str = "conversion";

/// One unit: wire name, factor to the base unit, display label
pub struct Unit {
    pub name: &'static str,
    pub factor: f64,
    pub label: &'static str,
}

const fn unit(name: &'static str, factor: f64, label: &'static str) -> Unit {
    Unit {
        name,
        factor,
        label,
    }
}

pub struct UnitTable {
    pub quantity: &'static str,
    pub names: &'static [&'static str],
    pub units: &'static [Unit],
}

impl UnitTable {
    fn get(&self, name: &str) -> Result<&Unit> {
        self.units.iter().find(|u| u.name == name).ok_or_else(|| {
            DomainError::out_of_domain(format!("Unsupported {} unit: {}", self.quantity, name)).into()
        })
    }

    /// Convert through the base unit
    pub fn convert(&self, value: f64, from: &str, to: &str) -> Result<f64> {
        Ok(value * self.get(from)?.factor / self.get(to)?.factor)
    }
}

pub const LENGTH: UnitTable = UnitTable {
    quantity: "length",
    names: &["mm", "cm", "m", "km", "inch", "ft", "yard", "mile"],
    units: &[
        unit("mm", 0.001, "millimeters"),
        unit("cm", 0.01, "centimeters"),
        unit("m", 1.0, "meters"),
        unit("km", 1000.0, "kilometers"),
        unit("inch", 0.0254, "inches"),
        unit("ft", 0.3048, "feet"),
        unit("yard", 0.9144, "yards"),
        unit("mile", 1609.344, "miles"),
    ],
};

pub const WEIGHT: UnitTable = UnitTable {
    quantity: "weight",
    names: &["mg", "g", "kg", "t", "oz", "lb", "stone"],
    units: &[
        unit("mg", 0.001, "milligrams"),
        unit("g", 1.0, "grams"),
        unit("kg", 1000.0, "kilograms"),
        unit("t", 1_000_000.0, "tonnes"),
        unit("oz", 28.3495, "ounces"),
        unit("lb", 453.592, "pounds"),
        unit("stone", 6350.29, "stone"),
    ],
};

pub const AREA: UnitTable = UnitTable {
    quantity: "area",
    names: &["mm2", "cm2", "m2", "km2", "hectare", "acre", "in2", "ft2", "yard2"],
    units: &[
        unit("mm2", 0.000001, "square millimeters"),
        unit("cm2", 0.0001, "square centimeters"),
        unit("m2", 1.0, "square meters"),
        unit("km2", 1_000_000.0, "square kilometers"),
        unit("hectare", 10000.0, "hectares"),
        unit("acre", 4046.86, "acres"),
        unit("in2", 0.00064516, "square inches"),
        unit("ft2", 0.092903, "square feet"),
        unit("yard2", 0.836127, "square yards"),
    ],
};

pub const VOLUME: UnitTable = UnitTable {
    quantity: "volume",
    names: &[
        "ml", "l", "m3", "cm3", "in3", "ft3", "gallon_us", "gallon_uk", "quart", "pint",
    ],
    units: &[
        unit("ml", 0.001, "milliliters"),
        unit("l", 1.0, "liters"),
        unit("m3", 1000.0, "cubic meters"),
        unit("cm3", 0.001, "cubic centimeters"),
        unit("in3", 0.0163871, "cubic inches"),
        unit("ft3", 28.3168, "cubic feet"),
        unit("gallon_us", 3.78541, "US gallons"),
        unit("gallon_uk", 4.54609, "imperial gallons"),
        unit("quart", 0.946353, "quarts"),
        unit("pint", 0.473176, "pints"),
    ],
};

pub const TIME: UnitTable = UnitTable {
    quantity: "time",
    names: &["ms", "second", "minute", "hour", "day", "week", "month", "year"],
    units: &[
        unit("ms", 0.001, "milliseconds"),
        unit("second", 1.0, "seconds"),
        unit("minute", 60.0, "minutes"),
        unit("hour", 3600.0, "hours"),
        unit("day", 86400.0, "days"),
        unit("week", 604800.0, "weeks"),
        // mean Gregorian month and year
        unit("month", 2_629_746.0, "months"),
        unit("year", 31_556_952.0, "years"),
    ],
};

pub const SPEED: UnitTable = UnitTable {
    quantity: "speed",
    names: &["mps", "kmh", "mph", "fps", "knot"],
    units: &[
        unit("mps", 1.0, "meters/second"),
        unit("kmh", 0.277778, "kilometers/hour"),
        unit("mph", 0.44704, "miles/hour"),
        unit("fps", 0.3048, "feet/second"),
        unit("knot", 0.514444, "knots"),
    ],
};

const TEMPERATURE_UNITS: &[&str] = &["celsius", "fahrenheit", "kelvin"];

pub fn operations() -> Vec<OperationDescriptor> {
    vec![
        tabled("length_conversion", "Length conversion", &LENGTH, length_conversion),
        tabled("weight_conversion", "Weight conversion", &WEIGHT, weight_conversion),
        OperationDescriptor::new(
            "temperature_conversion",
            "Temperature conversion",
            "Convert between Celsius, Fahrenheit and Kelvin",
            temperature_conversion,
        )
        .param(ParameterSpec::number("value", "Temperature to convert"))
        .param(ParameterSpec::choice("from_unit", TEMPERATURE_UNITS, "Source unit"))
        .param(ParameterSpec::choice("to_unit", TEMPERATURE_UNITS, "Target unit")),
        tabled("area_conversion", "Area conversion", &AREA, area_conversion),
        tabled("volume_conversion", "Volume conversion", &VOLUME, volume_conversion),
        tabled("time_conversion", "Time conversion", &TIME, time_conversion),
        tabled("speed_conversion", "Speed conversion", &SPEED, speed_conversion),
    ]
}

fn tabled(
    name: &'static str,
    title: &'static str,
    table: &'static UnitTable,
    handler: Handler,
) -> OperationDescriptor {
    OperationDescriptor::new(name, title, "Convert a value between units", handler)
        .param(ParameterSpec::number("value", "Value to convert"))
        .param(ParameterSpec::choice("from_unit", table.names, "Source unit"))
        .param(ParameterSpec::choice("to_unit", table.names, "Target unit"))
}

fn convert_with(args: &Args, table: &UnitTable) -> Result<Response> {
    let value = args.number("value")?;
    let (from_name, to_name) = (args.choice("from_unit")?, args.choice("to_unit")?);
    let result = fixed(table.convert(value, from_name, to_name)?, 8);
    let (from, to) = (table.get(from_name)?, table.get(to_name)?);

    let mut heading = table.quantity.to_string();
    if let Some(first) = heading.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    Ok(Response::success(format!(
        "{} conversion result:\n{} {} = {} {}\nFormula: {} × {} ÷ {} = {}",
        heading,
        num(value),
        from.label,
        result,
        to.label,
        num(value),
        num(from.factor),
        num(to.factor),
        result
    )))
}

fn length_conversion(args: &Args) -> Result<Response> {
    convert_with(args, &LENGTH)
}

fn weight_conversion(args: &Args) -> Result<Response> {
    convert_with(args, &WEIGHT)
}

fn area_conversion(args: &Args) -> Result<Response> {
    convert_with(args, &AREA)
}

fn volume_conversion(args: &Args) -> Result<Response> {
    convert_with(args, &VOLUME)
}

fn time_conversion(args: &Args) -> Result<Response> {
    convert_with(args, &TIME)
}

fn speed_conversion(args: &Args) -> Result<Response> {
    convert_with(args, &SPEED)
}

fn symbol(unit: &str) -> &'static str {
    match unit {
        "celsius" => "°C",
        "fahrenheit" => "°F",
        _ => "K",
    }
}

/// Converted temperature and the formula applied
pub fn convert_temperature(value: f64, from: &str, to: &str) -> Result<(f64, String)> {
    if from == "kelvin" && value < 0.0 {
        return Err(DomainError::out_of_domain(
            "Kelvin temperature cannot be negative (absolute zero is 0 K)",
        )
        .into());
    }
    let v = num(value);
    let (result, formula) = match (from, to) {
        (f, t) if f == t => (value, "same unit, no conversion".to_string()),
        ("celsius", "fahrenheit") => {
            let r = value * 9.0 / 5.0 + 32.0;
            (r, format!("({} × 9/5) + 32 = {}", v, fixed(r, 4)))
        }
        ("celsius", "kelvin") => {
            let r = value + 273.15;
            (r, format!("{} + 273.15 = {}", v, fixed(r, 4)))
        }
        ("fahrenheit", "celsius") => {
            let r = (value - 32.0) * 5.0 / 9.0;
            (r, format!("({} - 32) × 5/9 = {}", v, fixed(r, 4)))
        }
        ("fahrenheit", "kelvin") => {
            let r = (value - 32.0) * 5.0 / 9.0 + 273.15;
            (r, format!("({} - 32) × 5/9 + 273.15 = {}", v, fixed(r, 4)))
        }
        ("kelvin", "celsius") => {
            let r = value - 273.15;
            (r, format!("{} - 273.15 = {}", v, fixed(r, 4)))
        }
        ("kelvin", "fahrenheit") => {
            let r = (value - 273.15) * 9.0 / 5.0 + 32.0;
            (r, format!("({} - 273.15) × 9/5 + 32 = {}", v, fixed(r, 4)))
        }
        _ => {
            return Err(DomainError::out_of_domain(format!(
                "Unsupported temperature conversion: {} to {}",
                from, to
            ))
            .into());
        }
    };
    Ok((result, formula))
}

fn temperature_conversion(args: &Args) -> Result<Response> {
    let value = args.number("value")?;
    let from = args.choice("from_unit")?;
    let to = args.choice("to_unit")?;
    let (result, formula) = convert_temperature(value, from, to)?;
    Ok(Response::success(format!(
        "Temperature conversion result:\n{}{} = {}{}\nFormula: {}",
        num(value),
        symbol(from),
        fixed(result, 4),
        symbol(to),
        formula
    )))
}
