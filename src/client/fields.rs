use crate::client::FormError;

/// Inputs of the quote / site visit form, named as they appear on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteField {
    FullName,
    Email,
    Phone,
    PropertySize,
    PropertyType,
    WorkRequired,
    Location,
}

impl QuoteField {
    pub fn name(&self) -> &'static str {
        match self {
            QuoteField::FullName => "fullName",
            QuoteField::Email => "email",
            QuoteField::Phone => "phone",
            QuoteField::PropertySize => "propertySize",
            QuoteField::PropertyType => "propertyType",
            QuoteField::WorkRequired => "workRequired",
            QuoteField::Location => "location",
        }
    }
}

impl std::str::FromStr for QuoteField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s {
            "fullName" => QuoteField::FullName,
            "email" => QuoteField::Email,
            "phone" => QuoteField::Phone,
            "propertySize" => QuoteField::PropertySize,
            "propertyType" => QuoteField::PropertyType,
            "workRequired" => QuoteField::WorkRequired,
            "location" => QuoteField::Location,
            other => return Err(FormError::UnknownField(other.to_string())),
        };
        Ok(field)
    }
}

/// Inputs of the cost calculator form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorField {
    SquareMeters,
    Email,
    Phone,
}

impl CalculatorField {
    pub fn name(&self) -> &'static str {
        match self {
            CalculatorField::SquareMeters => "squareMeters",
            CalculatorField::Email => "email",
            CalculatorField::Phone => "phone",
        }
    }
}

impl std::str::FromStr for CalculatorField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "squareMeters" => Ok(CalculatorField::SquareMeters),
            "email" => Ok(CalculatorField::Email),
            "phone" => Ok(CalculatorField::Phone),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}
