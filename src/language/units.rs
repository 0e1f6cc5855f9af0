//! Physical units, and conversion of values into the canonical unit of the
//! quantity they measure

use super::{Vector2, Vector3};

/// The kinds of physical quantity a unit can measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Length,
    Time,
    Energy,
    ElectricField,
    MagneticField,
    Angle,
    Pressure,
}

impl Dimension {
    /// The unit every value of this quantity is converted into.
    pub fn canonical(&self) -> &'static str {
        match self {
            Dimension::Length => "mm",
            Dimension::Time => "us",
            Dimension::Energy => "keV",
            Dimension::ElectricField => "V/cm",
            Dimension::MagneticField => "T",
            Dimension::Angle => "rad",
            Dimension::Pressure => "bar",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    pub symbol: &'static str,
    pub dimension: Dimension,
    /// How many canonical units make up one of this unit.
    pub factor: f64,
}

const fn unit(symbol: &'static str, dimension: Dimension, factor: f64) -> Unit {
    Unit {
        symbol,
        dimension,
        factor,
    }
}

static UNITS: &[Unit] = &[
    unit("nm", Dimension::Length, 1e-6),
    unit("um", Dimension::Length, 1e-3),
    unit("mm", Dimension::Length, 1.0),
    unit("cm", Dimension::Length, 10.0),
    unit("dm", Dimension::Length, 100.0),
    unit("m", Dimension::Length, 1e3),
    unit("km", Dimension::Length, 1e6),
    unit("ps", Dimension::Time, 1e-6),
    unit("ns", Dimension::Time, 1e-3),
    unit("us", Dimension::Time, 1.0),
    unit("ms", Dimension::Time, 1e3),
    unit("s", Dimension::Time, 1e6),
    unit("min", Dimension::Time, 6e7),
    unit("hr", Dimension::Time, 3.6e9),
    unit("meV", Dimension::Energy, 1e-6),
    unit("eV", Dimension::Energy, 1e-3),
    unit("keV", Dimension::Energy, 1.0),
    unit("MeV", Dimension::Energy, 1e3),
    unit("GeV", Dimension::Energy, 1e6),
    unit("TeV", Dimension::Energy, 1e9),
    unit("mV/cm", Dimension::ElectricField, 1e-3),
    unit("V/mm", Dimension::ElectricField, 10.0),
    unit("V/cm", Dimension::ElectricField, 1.0),
    unit("V/m", Dimension::ElectricField, 1e-2),
    unit("kV/mm", Dimension::ElectricField, 1e4),
    unit("kV/cm", Dimension::ElectricField, 1e3),
    unit("kV/m", Dimension::ElectricField, 10.0),
    // older files write field units without the slash
    unit("Vmm", Dimension::ElectricField, 10.0),
    unit("Vcm", Dimension::ElectricField, 1.0),
    unit("Vm", Dimension::ElectricField, 1e-2),
    unit("kVmm", Dimension::ElectricField, 1e4),
    unit("kVcm", Dimension::ElectricField, 1e3),
    unit("kVm", Dimension::ElectricField, 10.0),
    unit("uT", Dimension::MagneticField, 1e-6),
    unit("mT", Dimension::MagneticField, 1e-3),
    unit("T", Dimension::MagneticField, 1.0),
    unit("G", Dimension::MagneticField, 1e-4),
    unit("kG", Dimension::MagneticField, 0.1),
    unit("rad", Dimension::Angle, 1.0),
    unit("mrad", Dimension::Angle, 1e-3),
    unit("deg", Dimension::Angle, std::f64::consts::PI / 180.0),
    unit("mbar", Dimension::Pressure, 1e-3),
    unit("bar", Dimension::Pressure, 1.0),
    unit("atm", Dimension::Pressure, 1.01325),
    unit("Pa", Dimension::Pressure, 1e-5),
    unit("kPa", Dimension::Pressure, 1e-2),
];

/// Find the unit with the given symbol. Symbols are case sensitive (`mV/cm`
/// and `MeV` are different things).
pub fn lookup(symbol: &str) -> Option<&'static Unit> {
    let symbol = symbol.trim_ascii();

    UNITS
        .iter()
        .find(|unit| unit.symbol == symbol)
}

/// Convert `value`, expressed in `symbol`, into the canonical unit of its
/// quantity. An unrecognized symbol yields NaN, which callers must check for.
pub fn to_canonical(value: f64, symbol: &str) -> f64 {
    match lookup(symbol) {
        Some(unit) => value * unit.factor,
        None => f64::NAN,
    }
}

/// As [`to_canonical`], but the unit must also measure the given quantity.
pub fn to_canonical_in(value: f64, symbol: &str, dimension: Dimension) -> f64 {
    match lookup(symbol) {
        Some(unit) if unit.dimension == dimension => value * unit.factor,
        _ => f64::NAN,
    }
}

pub fn vector2_to_canonical(value: Vector2, symbol: &str) -> Vector2 {
    Vector2 {
        x: to_canonical(value.x, symbol),
        y: to_canonical(value.y, symbol),
    }
}

pub fn vector3_to_canonical(value: Vector3, symbol: &str) -> Vector3 {
    Vector3 {
        x: to_canonical(value.x, symbol),
        y: to_canonical(value.y, symbol),
        z: to_canonical(value.z, symbol),
    }
}
