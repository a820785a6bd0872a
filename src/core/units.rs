use std::str::FromStr;

use crate::error::UnknownUnit;

/// Length units accepted on catalog records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthUnit {
    Millimeter,
    Centimeter,
    Meter,
    Inch,
    Foot,
}

impl LengthUnit {
    /// Multiplier converting a value in this unit to centimetres
    #[inline]
    pub fn to_cm(self) -> f64 {
        match self {
            LengthUnit::Millimeter => 0.1,
            LengthUnit::Centimeter => 1.0,
            LengthUnit::Meter => 100.0,
            LengthUnit::Inch => 2.54,
            LengthUnit::Foot => 30.48,
        }
    }
}

impl FromStr for LengthUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" | "millimetre" | "millimetres" => Ok(LengthUnit::Millimeter),
            "cm" | "centimeter" | "centimeters" | "centimetre" | "centimetres" => Ok(LengthUnit::Centimeter),
            "m" | "meter" | "meters" | "metre" | "metres" => Ok(LengthUnit::Meter),
            "in" | "inch" | "inches" | "\"" => Ok(LengthUnit::Inch),
            "ft" | "foot" | "feet" | "'" => Ok(LengthUnit::Foot),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}

/// Weight units accepted on catalog records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Gram,
    Kilogram,
    Ounce,
    Pound,
}

impl WeightUnit {
    /// Multiplier converting a value in this unit to kilograms
    #[inline]
    pub fn to_kg(self) -> f64 {
        match self {
            WeightUnit::Gram => 0.001,
            WeightUnit::Kilogram => 1.0,
            WeightUnit::Ounce => 0.028_349_523_125,
            WeightUnit::Pound => 0.453_592_37,
        }
    }
}

impl FromStr for WeightUnit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" | "gram" | "grams" => Ok(WeightUnit::Gram),
            "kg" | "kgs" | "kilogram" | "kilograms" => Ok(WeightUnit::Kilogram),
            "oz" | "ounce" | "ounces" => Ok(WeightUnit::Ounce),
            "lb" | "lbs" | "pound" | "pounds" => Ok(WeightUnit::Pound),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}
